//! `feature` declarations and `if-feature` expression evaluation.

use crate::ids::ModuleId;
use yang_common::Atom;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    pub name: Atom,
    pub module: ModuleId,
    /// A feature may itself be gated by other features.
    pub if_features: Vec<String>,
}

/// A parsed `if-feature` boolean expression: `feature-name`, `not expr`,
/// `expr and expr`, `expr or expr` (YANG 1.1 §7.20.2), evaluated once
/// every named feature referenced by it is known to exist.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IfFeatureAst {
    Name(String),
    Not(Box<IfFeatureAst>),
    And(Box<IfFeatureAst>, Box<IfFeatureAst>),
    Or(Box<IfFeatureAst>, Box<IfFeatureAst>),
}

impl IfFeatureAst {
    /// Evaluates the expression given a predicate answering "is this
    /// named feature enabled". Returns `None` if any referenced name is
    /// unknown to `is_enabled` (signaled by it returning `None`), so the
    /// caller can report `INRESOLV` rather than silently defaulting.
    pub fn eval(&self, is_enabled: &mut impl FnMut(&str) -> Option<bool>) -> Option<bool> {
        match self {
            IfFeatureAst::Name(name) => is_enabled(name),
            IfFeatureAst::Not(inner) => inner.eval(is_enabled).map(|v| !v),
            IfFeatureAst::And(a, b) => {
                let a = a.eval(is_enabled)?;
                if !a {
                    return Some(false);
                }
                b.eval(is_enabled)
            }
            IfFeatureAst::Or(a, b) => {
                let a = a.eval(is_enabled)?;
                if a {
                    return Some(true);
                }
                b.eval(is_enabled)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IfFeatureSyntaxError;

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Tokens<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn peek_word(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let end = self
            .rest
            .find(|c: char| c.is_whitespace() || c == '(' || c == ')')
            .unwrap_or(self.rest.len());
        if end == 0 {
            None
        } else {
            Some(&self.rest[..end])
        }
    }

    fn bump_word(&mut self) -> &'a str {
        let word = self.peek_word().expect("bump_word called with no word");
        self.rest = &self.rest[word.len()..];
        word
    }

    fn eat_char(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest.starts_with(c) {
            self.rest = &self.rest[1..];
            true
        } else {
            false
        }
    }
}

/// Parses an `if-feature-expr` string into its AST.
///
/// `not` binds tighter than `and`, which binds tighter than `or`;
/// parentheses override precedence.
pub fn parse_if_feature(text: &str) -> Result<IfFeatureAst, IfFeatureSyntaxError> {
    let mut toks = Tokens { rest: text };
    let ast = parse_or(&mut toks)?;
    toks.skip_ws();
    if !toks.rest.is_empty() {
        return Err(IfFeatureSyntaxError);
    }
    Ok(ast)
}

fn parse_or(toks: &mut Tokens<'_>) -> Result<IfFeatureAst, IfFeatureSyntaxError> {
    let mut lhs = parse_and(toks)?;
    loop {
        toks.skip_ws();
        if toks.rest.starts_with("or") && is_word_boundary(toks.rest, 2) {
            toks.rest = &toks.rest[2..];
            let rhs = parse_and(toks)?;
            lhs = IfFeatureAst::Or(Box::new(lhs), Box::new(rhs));
        } else {
            return Ok(lhs);
        }
    }
}

fn parse_and(toks: &mut Tokens<'_>) -> Result<IfFeatureAst, IfFeatureSyntaxError> {
    let mut lhs = parse_unary(toks)?;
    loop {
        toks.skip_ws();
        if toks.rest.starts_with("and") && is_word_boundary(toks.rest, 3) {
            toks.rest = &toks.rest[3..];
            let rhs = parse_unary(toks)?;
            lhs = IfFeatureAst::And(Box::new(lhs), Box::new(rhs));
        } else {
            return Ok(lhs);
        }
    }
}

fn parse_unary(toks: &mut Tokens<'_>) -> Result<IfFeatureAst, IfFeatureSyntaxError> {
    toks.skip_ws();
    if toks.rest.starts_with("not") && is_word_boundary(toks.rest, 3) {
        toks.rest = &toks.rest[3..];
        let inner = parse_unary(toks)?;
        return Ok(IfFeatureAst::Not(Box::new(inner)));
    }
    if toks.eat_char('(') {
        let inner = parse_or(toks)?;
        if !toks.eat_char(')') {
            return Err(IfFeatureSyntaxError);
        }
        return Ok(inner);
    }
    let word = toks.peek_word().ok_or(IfFeatureSyntaxError)?;
    if word == "and" || word == "or" || word == "not" {
        return Err(IfFeatureSyntaxError);
    }
    toks.bump_word();
    Ok(IfFeatureAst::Name(word.to_string()))
}

fn is_word_boundary(rest: &str, keyword_len: usize) -> bool {
    rest[keyword_len..]
        .chars()
        .next()
        .map_or(true, |c| c.is_whitespace() || c == '(' || c == ')')
}

#[cfg(test)]
#[path = "tests/feature.rs"]
mod tests;
