use super::*;

#[test]
fn parses_single_segment_no_predicate() {
    let (len, id) = parse_instance_identifier("/m:a").unwrap();
    assert_eq!(len, 4);
    assert_eq!(id.segments.len(), 1);
}

#[test]
fn parses_key_equals_predicate() {
    let (len, id) = parse_instance_identifier("/m:items[id='3']/ref").unwrap();
    assert_eq!(len, 21);
    assert_eq!(id.segments.len(), 2);
    match &id.segments[0].predicates[0] {
        Predicate::KeyEquals { key, value } => {
            assert_eq!(key.name, "id");
            assert_eq!(value, "3");
        }
        other => panic!("unexpected predicate: {other:?}"),
    }
}

#[test]
fn parses_double_quoted_value() {
    let (_, id) = parse_instance_identifier(r#"/m:items[id="3"]"#).unwrap();
    match &id.segments[0].predicates[0] {
        Predicate::KeyEquals { value, .. } => assert_eq!(value, "3"),
        other => panic!("unexpected predicate: {other:?}"),
    }
}

#[test]
fn parses_current_dot_predicate_for_leaf_list() {
    let (_, id) = parse_instance_identifier("/m:tags[.='red']").unwrap();
    match &id.segments[0].predicates[0] {
        Predicate::CurrentEquals { value } => assert_eq!(value, "red"),
        other => panic!("unexpected predicate: {other:?}"),
    }
}

#[test]
fn parses_positional_predicate() {
    let (_, id) = parse_instance_identifier("/m:items[3]").unwrap();
    assert_eq!(id.segments[0].predicates[0], Predicate::Position(3));
}

#[test]
fn position_zero_alone_is_legal() {
    let (_, id) = parse_instance_identifier("/m:items[0]").unwrap();
    assert_eq!(id.segments[0].predicates[0], Predicate::Position(0));
}

#[test]
fn position_with_leading_zero_is_a_syntax_error() {
    assert!(parse_instance_identifier("/m:items[01]").is_err());
}

#[test]
fn requires_leading_slash() {
    assert!(parse_instance_identifier("m:a").is_err());
}

#[test]
fn multiple_predicates_for_composite_keys() {
    let (_, id) = parse_instance_identifier("/m:items[k1='a'][k2='b']").unwrap();
    assert_eq!(id.segments[0].predicates.len(), 2);
}
