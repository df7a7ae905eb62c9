use super::*;

#[test]
fn parses_plain_identifier() {
    let (len, text) = parse_identifier("leaf-name rest").unwrap();
    assert_eq!(len, 9);
    assert_eq!(text, "leaf-name");
}

#[test]
fn rejects_leading_digit() {
    let err = parse_identifier("1abc").unwrap_err();
    assert_eq!(err.offset, 0);
}

#[test]
fn rejects_empty_input() {
    assert!(parse_identifier("").is_err());
}

#[test]
fn rejects_xml_prefix_case_insensitively() {
    assert!(parse_identifier("xml").is_err());
    assert!(parse_identifier("XML").is_err());
    assert!(parse_identifier("XmlFoo").is_err());
    assert!(parse_identifier("xMl-thing").is_err());
}

#[test]
fn allows_names_that_merely_contain_xml() {
    let (len, text) = parse_identifier("xxml").unwrap();
    assert_eq!(len, 4);
    assert_eq!(text, "xxml");
}

#[test]
fn underscore_is_a_valid_leading_character() {
    let (len, text) = parse_identifier("_private").unwrap();
    assert_eq!(len, 8);
    assert_eq!(text, "_private");
}

#[test]
fn stops_at_first_disallowed_byte() {
    let (len, text) = parse_identifier("a/b").unwrap();
    assert_eq!(len, 1);
    assert_eq!(text, "a");
}

#[test]
fn node_identifier_without_prefix() {
    let (len, node) = parse_node_identifier("leaf1/x").unwrap();
    assert_eq!(len, 5);
    assert_eq!(node.prefix, None);
    assert_eq!(node.name, "leaf1");
}

#[test]
fn node_identifier_with_prefix() {
    let (len, node) = parse_node_identifier("ietf-ip:address").unwrap();
    assert_eq!(len, 16);
    assert_eq!(node.prefix, Some("ietf-ip"));
    assert_eq!(node.name, "address");
}

#[test]
fn node_identifier_rejects_missing_name_after_colon() {
    let err = parse_node_identifier("ietf-ip:").unwrap_err();
    assert_eq!(err.offset, 8);
}
