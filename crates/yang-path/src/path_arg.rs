//! `path-arg` / `path-predicate` / `path-key-expr`, the `leafref` path
//! grammar walked by schema-time leafref resolution.

use crate::error::{ParseError, ParseResult};
use crate::identifier::{NodeIdentifier, parse_node_identifier};

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

/// `path-key-expr = current() WSP "/" WSP (".." "/" WSP)+ (node-identifier WSP "/" WSP)* node-identifier`
///
/// The original C contract parses this incrementally across repeated calls
/// (first call consumes `current()` and the parent-refs, later calls
/// consume one `node-identifier` at a time). A single-owner Rust parser has
/// no reason to split that across calls; `parse_path_key_expr` recognizes
/// the whole production in one pass and returns every `up_levels` and
/// `node-identifier` it found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathKeyExpr<'a> {
    /// Number of leading `../` parent-reference steps.
    pub up_levels: u32,
    /// The node-identifier chain after the parent references, in order;
    /// the last element is the key leaf being compared against.
    pub segments: Vec<NodeIdentifier<'a>>,
}

pub fn parse_path_key_expr(input: &str) -> ParseResult<PathKeyExpr<'_>> {
    let rest = input
        .strip_prefix("current()")
        .ok_or_else(|| ParseError::at(0))?;
    let mut pos = (input.len() - rest.len()) as u32;
    pos = skip_wsp(input, pos);
    if input.as_bytes().get(pos as usize) != Some(&b'/') {
        return Err(ParseError::at(pos));
    }
    pos += 1;
    pos = skip_wsp(input, pos);

    let mut up_levels = 0u32;
    loop {
        if input[pos as usize..].starts_with("..") {
            pos += 2;
            pos = skip_wsp(input, pos);
            if input.as_bytes().get(pos as usize) != Some(&b'/') {
                return Err(ParseError::at(pos));
            }
            pos += 1;
            pos = skip_wsp(input, pos);
            up_levels += 1;
        } else {
            break;
        }
    }
    if up_levels == 0 {
        return Err(ParseError::at(pos));
    }

    let mut segments = Vec::new();
    loop {
        let (len, node) = parse_node_identifier(&input[pos as usize..])
            .map_err(|e| ParseError::at(pos + e.offset))?;
        segments.push(node);
        pos += len;
        let after_wsp = skip_wsp(input, pos);
        if input.as_bytes().get(after_wsp as usize) == Some(&b'/') {
            pos = skip_wsp(input, after_wsp + 1);
        } else {
            break;
        }
    }

    Ok((pos, PathKeyExpr { up_levels, segments }))
}

/// `path-predicate = "[" WSP node-identifier WSP "=" WSP path-key-expr WSP "]"`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathPredicate<'a> {
    pub key: NodeIdentifier<'a>,
    pub expr: PathKeyExpr<'a>,
}

fn parse_path_predicate(input: &str) -> ParseResult<PathPredicate<'_>> {
    if input.as_bytes().first() != Some(&b'[') {
        return Err(ParseError::at(0));
    }
    let mut pos = skip_wsp(input, 1);

    let (key_len, key) =
        parse_node_identifier(&input[pos as usize..]).map_err(|e| ParseError::at(pos + e.offset))?;
    pos = skip_wsp(input, pos + key_len);

    if input.as_bytes().get(pos as usize) != Some(&b'=') {
        return Err(ParseError::at(pos));
    }
    pos = skip_wsp(input, pos + 1);

    let (expr_len, expr) =
        parse_path_key_expr(&input[pos as usize..]).map_err(|e| ParseError::at(pos + e.offset))?;
    pos = skip_wsp(input, pos + expr_len);

    if input.as_bytes().get(pos as usize) != Some(&b']') {
        return Err(ParseError::at(pos));
    }
    pos += 1;

    Ok((pos, PathPredicate { key, expr }))
}

/// One `node-identifier` step of a `path-arg`, with zero or more trailing
/// `path-predicate`s (composite-key leafrefs chain one predicate per key
/// leaf).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathSegment<'a> {
    pub node: NodeIdentifier<'a>,
    pub predicates: Vec<PathPredicate<'a>>,
}

/// `path-arg = (".." "/")* node-identifier (path-predicate)? ( "/" node-identifier (path-predicate)? )*`
///
/// An absolute form begins with `/`; the relative form begins with zero or
/// more `../` steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathArg<'a> {
    pub is_absolute: bool,
    pub up_levels: u32,
    pub segments: Vec<PathSegment<'a>>,
}

pub fn parse_path_arg(input: &str) -> ParseResult<PathArg<'_>> {
    let mut pos = 0u32;
    let is_absolute = input.as_bytes().first() == Some(&b'/');
    if is_absolute {
        pos = 1;
    }

    let mut up_levels = 0u32;
    if !is_absolute {
        loop {
            if input[pos as usize..].starts_with("../") {
                pos += 3;
                up_levels += 1;
            } else {
                break;
            }
        }
    }

    let mut segments = Vec::new();
    loop {
        let (len, node) = parse_node_identifier(&input[pos as usize..])
            .map_err(|e| ParseError::at(pos + e.offset))?;
        pos += len;

        let mut predicates = Vec::new();
        while input.as_bytes().get(pos as usize) == Some(&b'[') {
            let (plen, predicate) = parse_path_predicate(&input[pos as usize..])
                .map_err(|e| ParseError::at(pos + e.offset))?;
            predicates.push(predicate);
            pos += plen;
        }

        segments.push(PathSegment { node, predicates });

        if input.as_bytes().get(pos as usize) == Some(&b'/') {
            pos += 1;
        } else {
            break;
        }
    }

    Ok((
        pos,
        PathArg {
            is_absolute,
            up_levels,
            segments,
        },
    ))
}

#[cfg(test)]
#[path = "tests/path_arg.rs"]
mod tests;
