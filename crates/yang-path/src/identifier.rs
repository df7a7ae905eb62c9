//! `identifier` and `node-identifier` micro-parsers.

use crate::error::{ParseError, ParseResult};

/// Recognize a YANG `identifier`:
/// `(ALPHA / "_") *(ALPHA / DIGIT / "_" / "-" / ".")`, rejected if the first
/// three characters case-insensitively spell `xml`.
///
/// The reference xml-prefix check this was modeled on tests the first
/// character three times against different letters rather than testing
/// three distinct characters, which looks like a transcription bug rather
/// than intent. This implementation encodes the evidently intended rule:
/// reject any identifier whose first three bytes spell "xml" regardless of
/// case.
pub fn parse_identifier(input: &str) -> ParseResult<&str> {
    let bytes = input.as_bytes();
    let Some(&first) = bytes.first() else {
        return Err(ParseError::at(0));
    };
    if !(first.is_ascii_alphabetic() || first == b'_') {
        return Err(ParseError::at(0));
    }

    let mut len = 1usize;
    while len < bytes.len() {
        let b = bytes[len];
        if b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.') {
            len += 1;
        } else {
            break;
        }
    }

    let text = &input[..len];
    if starts_with_xml(text.as_bytes()) {
        return Err(ParseError::at(0));
    }

    Ok((len as u32, text))
}

fn starts_with_xml(bytes: &[u8]) -> bool {
    bytes.len() >= 3 && bytes[0..3].eq_ignore_ascii_case(b"xml")
}

/// A (possibly prefixed) `node-identifier`: `[module-name ":"] identifier`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeIdentifier<'a> {
    /// The module prefix, if one was given (`None` means "current module").
    pub prefix: Option<&'a str>,
    pub name: &'a str,
}

/// Parse a `node-identifier`.
pub fn parse_node_identifier(input: &str) -> ParseResult<NodeIdentifier<'_>> {
    let (first_len, first) = parse_identifier(input)?;
    let first_len = first_len as usize;

    if input.as_bytes().get(first_len) == Some(&b':') {
        let rest = &input[first_len + 1..];
        let (name_len, name) = parse_identifier(rest)
            .map_err(|e| ParseError::at((first_len + 1) as u32 + e.offset))?;
        let total = first_len as u32 + 1 + name_len;
        Ok((
            total,
            NodeIdentifier {
                prefix: Some(first),
                name,
            },
        ))
    } else {
        Ok((
            first_len as u32,
            NodeIdentifier {
                prefix: None,
                name: first,
            },
        ))
    }
}

#[cfg(test)]
#[path = "tests/identifier.rs"]
mod tests;
