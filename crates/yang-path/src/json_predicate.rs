//! `schema-json-predicate` — a JSON-flavored predicate form used internally
//! by `resolve-json-schema-nodeid`. Unlike the data-time `predicate`, the
//! value clause here is optional; the caller decides (via `require_value`)
//! whether a bare key marker is acceptable in its context.

use crate::error::{ParseError, ParseResult};
use crate::identifier::parse_identifier;

fn skip_wsp(input: &str, mut pos: u32) -> u32 {
    let bytes = input.as_bytes();
    while let Some(&b) = bytes.get(pos as usize) {
        if b == b' ' || b == b'\t' {
            pos += 1;
        } else {
            break;
        }
    }
    pos
}

fn parse_quoted_string(input: &str) -> ParseResult<&str> {
    let bytes = input.as_bytes();
    let Some(&quote) = bytes.first() else {
        return Err(ParseError::at(0));
    };
    if quote != b'"' && quote != b'\'' {
        return Err(ParseError::at(0));
    }
    let rest = &input[1..];
    let Some(end) = rest.find(quote as char) else {
        return Err(ParseError::at(input.len() as u32));
    };
    Ok(((end + 2) as u32, &rest[..end]))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaJsonKey<'a> {
    Identifier(&'a str),
    /// `.` — the leaf-list's own value.
    Current,
    /// `*=` — a wildcard match, accepting any instance.
    Wildcard,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaJsonPredicate<'a> {
    pub key: SchemaJsonKey<'a>,
    pub value: Option<String>,
}

pub fn parse_schema_json_predicate(
    input: &str,
    require_value: bool,
) -> ParseResult<SchemaJsonPredicate<'_>> {
    if input.as_bytes().first() != Some(&b'[') {
        return Err(ParseError::at(0));
    }
    let mut pos = skip_wsp(input, 1);

    let key = if input[pos as usize..].starts_with("*=") {
        pos += 2;
        SchemaJsonKey::Wildcard
    } else if input.as_bytes().get(pos as usize) == Some(&b'.') {
        pos += 1;
        SchemaJsonKey::Current
    } else {
        let (ilen, name) =
            parse_identifier(&input[pos as usize..]).map_err(|e| ParseError::at(pos + e.offset))?;
        pos += ilen;
        SchemaJsonKey::Identifier(name)
    };

    pos = skip_wsp(input, pos);

    let value = if input.as_bytes().get(pos as usize) == Some(&b'=') {
        pos = skip_wsp(input, pos + 1);
        let (vlen, value) = parse_quoted_string(&input[pos as usize..])
            .map_err(|e| ParseError::at(pos + e.offset))?;
        pos = skip_wsp(input, pos + vlen);
        Some(value.to_string())
    } else {
        if require_value {
            return Err(ParseError::at(pos));
        }
        None
    };

    if input.as_bytes().get(pos as usize) != Some(&b']') {
        return Err(ParseError::at(pos));
    }
    pos += 1;

    Ok((pos, SchemaJsonPredicate { key, value }))
}

#[cfg(test)]
#[path = "tests/json_predicate.rs"]
mod tests;
