use super::*;

#[test]
fn evaluates_plain_name() {
    let ast = parse_if_feature("foo").unwrap();
    assert_eq!(ast.eval(&mut |n| Some(n == "foo")), Some(true));
}

#[test]
fn evaluates_not() {
    let ast = parse_if_feature("not foo").unwrap();
    assert_eq!(ast.eval(&mut |n| Some(n == "foo")), Some(false));
}

#[test]
fn and_short_circuits_on_false() {
    let ast = parse_if_feature("foo and bar").unwrap();
    assert_eq!(ast.eval(&mut |n| Some(n == "bar")), Some(false));
}

#[test]
fn or_binds_looser_than_and() {
    let ast = parse_if_feature("a and b or c").unwrap();
    // (a and b) or c
    let mut enabled = |n: &str| Some(matches!(n, "c"));
    assert_eq!(ast.eval(&mut enabled), Some(true));
}

#[test]
fn parens_override_precedence() {
    let ast = parse_if_feature("a and (b or c)").unwrap();
    let mut enabled = |n: &str| Some(matches!(n, "a" | "c"));
    assert_eq!(ast.eval(&mut enabled), Some(true));
}

#[test]
fn unknown_feature_yields_none() {
    let ast = parse_if_feature("mystery").unwrap();
    assert_eq!(ast.eval(&mut |_| None), None);
}

#[test]
fn rejects_dangling_operator() {
    assert!(parse_if_feature("foo and").is_err());
}

#[test]
fn rejects_unbalanced_parens() {
    assert!(parse_if_feature("(foo and bar").is_err());
}
