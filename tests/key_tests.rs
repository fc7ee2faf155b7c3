// tests/key_tests.rs

use flyql::ast::{Key, KeyError, parse_key};
use flyql::{Expression, FlyqlError, Operator, Value};

// ============================================================================
// Segmentation
// ============================================================================

#[test]
fn test_single_segment() {
    let key = parse_key("status").unwrap();
    assert_eq!(key.segments, vec!["status"]);
    assert_eq!(key.raw, "status");
    assert!(!key.is_segmented());
}

#[test]
fn test_colon_segments() {
    let key = parse_key("a:b:c").unwrap();
    assert_eq!(key.segments, vec!["a", "b", "c"]);
    assert!(key.is_segmented());
}

#[test]
fn test_trailing_colon_adds_empty_segment() {
    let key = parse_key("a:").unwrap();
    assert_eq!(key.segments, vec!["a", ""]);
}

#[test]
fn test_empty_middle_segment() {
    let key = parse_key("a::b").unwrap();
    assert_eq!(key.segments, vec!["a", "", "b"]);
}

#[test]
fn test_empty_input_has_no_segments() {
    let key = parse_key("").unwrap();
    assert!(key.segments.is_empty());
    assert!(key.is_empty());
    assert_eq!(key.raw, "");
}

#[test]
fn test_dots_and_slashes_do_not_split() {
    let key = parse_key("http.request/path").unwrap();
    assert_eq!(key.segments, vec!["http.request/path"]);
}

// ============================================================================
// Quoting and Escapes
// ============================================================================

#[test]
fn test_quoted_segment_keeps_colon() {
    let key = parse_key(r#""a:b":c"#).unwrap();
    assert_eq!(key.segments, vec!["a:b", "c"]);
    assert_eq!(key.raw, r#""a:b":c"#);
}

#[test]
fn test_single_quoted_segment() {
    let key = parse_key("'x:y':'z'").unwrap();
    assert_eq!(key.segments, vec!["x:y", "z"]);
}

#[test]
fn test_quote_inside_segment() {
    let key = parse_key(r#"pre"fix:mid"post:next"#).unwrap();
    assert_eq!(key.segments, vec!["prefix:midpost", "next"]);
}

#[test]
fn test_escape_sequences() {
    let test_cases = vec![
        (r#"'a\'b'"#, "a'b"),
        (r#""a\"b""#, "a\"b"),
        (r"'a\\b'", "a\\b"),
        (r"'a\nb'", "a\nb"),
        (r"'a\tb'", "a\tb"),
        (r"a\qb", "aqb"),
        (r"a\:b", "a:b"),
    ];

    for (input, expected) in test_cases {
        let key = parse_key(input).unwrap();
        assert_eq!(key.segments, vec![expected], "Failed for input: {}", input);
    }
}

#[test]
fn test_unterminated_quote() {
    assert_eq!(
        parse_key("ab'cd"),
        Err(KeyError::UnterminatedQuote { position: 2 })
    );
}

#[test]
fn test_incomplete_escape() {
    assert_eq!(
        parse_key(r"abc\"),
        Err(KeyError::IncompleteEscape { position: 4 })
    );
}

#[test]
fn test_key_error_message() {
    let err = parse_key("'open").unwrap_err();
    assert!(err.to_string().contains("Unterminated quoted segment"));
}

// ============================================================================
// Key and Expression construction
// ============================================================================

#[test]
fn test_key_raw_defaults_to_joined_segments() {
    let key = Key::new(vec!["user".to_string(), "name".to_string()], None);
    assert_eq!(key.raw, "user:name");

    let key = Key::new(vec!["user".to_string()], Some("'user'".to_string()));
    assert_eq!(key.raw, "'user'");
}

#[test]
fn test_expression_rejects_unknown_operator() {
    let err = Expression::from_raw("key", "==", "value", false).unwrap_err();
    assert_eq!(err, FlyqlError::InvalidOperator("==".to_string()));
}

#[test]
fn test_expression_rejects_empty_key() {
    let err = Expression::from_raw("", "=", "value", false).unwrap_err();
    assert_eq!(err, FlyqlError::EmptyKey);
}

#[test]
fn test_expression_propagates_key_errors() {
    let err = Expression::from_raw("'open", "=", "value", false).unwrap_err();
    assert!(matches!(err, FlyqlError::Key(KeyError::UnterminatedQuote { .. })));
}

#[test]
fn test_expression_value_typing() {
    let expr = Expression::from_raw("n", "=", "42", false).unwrap();
    assert_eq!(expr.value, Value::Integer(42));

    let expr = Expression::from_raw("n", "=", "42", true).unwrap();
    assert_eq!(expr.value, Value::String("42".to_string()));
}

#[test]
fn test_expression_display() {
    let expr = Expression::from_raw("user:id", "!=", "7", false).unwrap();
    assert_eq!(expr.operator, Operator::NotEquals);
    assert_eq!(expr.to_string(), "user:id!=7");
}
