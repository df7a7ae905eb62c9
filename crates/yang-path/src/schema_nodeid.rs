//! `schema-nodeid`: absolute or descendant schema node identifiers, used
//! to resolve augment/uses-augment/deviation targets.

use crate::error::{ParseError, ParseResult};
use crate::identifier::{NodeIdentifier, parse_node_identifier};

/// Which leading token introduced the schema-nodeid.
///
/// The grammar is `("/" / "./") node-identifier *( "/" node-identifier )`;
/// a lone leading `/` is absolute, an explicit `./` marks a descendant form.
/// Whether an absolute-looking nodeid is actually resolved as absolute or
/// descendant is a caller decision (`resolve_absolute_nodeid` vs
/// `resolve_descendant_nodeid` taking the *same* textual form and applying
/// different search roots) — this type only records which token was seen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SchemaNodeIdForm {
    /// Leading `/`.
    Slash,
    /// Leading `./`.
    DotSlash,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SchemaNodeId<'a> {
    pub form: SchemaNodeIdForm,
    pub segments: Vec<NodeIdentifier<'a>>,
}

/// Parse a full `schema-nodeid`.
pub fn parse_schema_nodeid(input: &str) -> ParseResult<SchemaNodeId<'_>> {
    let (form, mut pos) = if let Some(rest) = input.strip_prefix("./") {
        let _ = rest;
        (SchemaNodeIdForm::DotSlash, 2u32)
    } else if input.starts_with('/') {
        (SchemaNodeIdForm::Slash, 1u32)
    } else {
        return Err(ParseError::at(0));
    };

    let mut segments = Vec::new();
    loop {
        let rest = &input[pos as usize..];
        let (len, node) =
            parse_node_identifier(rest).map_err(|e| ParseError::at(pos + e.offset))?;
        segments.push(node);
        pos += len;

        if input.as_bytes().get(pos as usize) == Some(&b'/') {
            pos += 1;
        } else {
            break;
        }
    }

    Ok((pos, SchemaNodeId { form, segments }))
}

#[cfg(test)]
#[path = "tests/schema_nodeid.rs"]
mod tests;
