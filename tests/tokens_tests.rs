// tests/tokens_tests.rs

use flyql::parser::{CharType, ParseOptions, parse_with};
use flyql::tokens::{TOKEN_TYPES, semantic_tokens, tokenize};
use pretty_assertions::assert_eq;

fn tokens_for(query: &str) -> Vec<u32> {
    let parser = parse_with(query, ParseOptions::new().raise_error(false)).unwrap();
    semantic_tokens(parser.typed_chars())
}

// ============================================================================
// Legend
// ============================================================================

#[test]
fn test_token_type_legend() {
    let names: Vec<&str> = TOKEN_TYPES.iter().map(|t| t.as_str()).collect();
    assert_eq!(
        names,
        vec!["flyqlKey", "flyqlValue", "flyqlOperator", "number", "string"]
    );
}

// ============================================================================
// Grouping
// ============================================================================

#[test]
fn test_tokenize_groups_runs() {
    let parser = parse_with("key = value", ParseOptions::default()).unwrap();
    let tokens = tokenize(parser.typed_chars());

    let summary: Vec<(CharType, &str)> = tokens
        .iter()
        .map(|t| (t.kind, t.value.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (CharType::Key, "key"),
            (CharType::Space, " "),
            (CharType::Operator, "="),
            (CharType::Space, " "),
            (CharType::String, "value"),
        ]
    );
}

#[test]
fn test_tokenize_refines_values() {
    let parser = parse_with("a=12.5 and b=x", ParseOptions::default()).unwrap();
    let kinds: Vec<CharType> = tokenize(parser.typed_chars())
        .iter()
        .filter(|t| t.kind != CharType::Space)
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            CharType::Key,
            CharType::Operator,
            CharType::Number,
            CharType::Operator,
            CharType::Key,
            CharType::Operator,
            CharType::String,
        ]
    );
}

#[test]
fn test_quoted_number_is_a_string_token() {
    let parser = parse_with(r#"code="10""#, ParseOptions::default()).unwrap();
    let tokens = tokenize(parser.typed_chars());
    let last = tokens.last().unwrap();
    assert_eq!(last.value, r#""10""#);
    assert_eq!(last.kind, CharType::String);
}

#[test]
fn test_token_start_and_length() {
    let parser = parse_with("status=200", ParseOptions::default()).unwrap();
    let tokens = tokenize(parser.typed_chars());
    assert_eq!(tokens[2].start.column, 7);
    assert_eq!(tokens[2].length, 3);
    assert_eq!(tokens[2].type_index(), Some(3));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_simple_encoding() {
    assert_eq!(
        tokens_for("key=value"),
        vec![0, 0, 3, 0, 0, 0, 3, 1, 2, 0, 0, 1, 5, 4, 0]
    );
}

#[test]
fn test_whitespace_is_not_emitted() {
    assert_eq!(
        tokens_for("a=1 and b=2"),
        vec![
            0, 0, 1, 0, 0, // a
            0, 1, 1, 2, 0, // =
            0, 1, 1, 3, 0, // 1
            0, 2, 3, 2, 0, // and
            0, 4, 1, 0, 0, // b
            0, 1, 1, 2, 0, // =
            0, 1, 1, 3, 0, // 2
        ]
    );
}

#[test]
fn test_line_change_resets_column() {
    assert_eq!(
        tokens_for("a=1\n and b=2"),
        vec![
            0, 0, 1, 0, 0, //
            0, 1, 1, 2, 0, //
            0, 1, 1, 3, 0, //
            1, 1, 3, 2, 0, // `and` on the second line
            0, 4, 1, 0, 0, //
            0, 1, 1, 2, 0, //
            0, 1, 1, 3, 0, //
        ]
    );
}

#[test]
fn test_quoted_value_spanning_lines_is_split() {
    let parser = parse_with("a='x\ny'", ParseOptions::default()).unwrap();
    let values: Vec<String> = tokenize(parser.typed_chars())
        .into_iter()
        .filter(|t| t.kind == CharType::String)
        .map(|t| t.value)
        .collect();
    assert_eq!(values, vec!["'x", "y'"]);
}

#[test]
fn test_negative_number() {
    let data = tokens_for("v=-5");
    assert_eq!(&data[10..], &[0, 1, 2, 3, 0]);
}

#[test]
fn test_failed_input_still_tokenized() {
    // Tokens stop where the parser stopped
    assert_eq!(tokens_for("ab@c=1"), vec![0, 0, 2, 0, 0]);
}

#[test]
fn test_empty_input() {
    assert!(tokens_for("").is_empty());
    assert!(semantic_tokens(&[]).is_empty());
}
