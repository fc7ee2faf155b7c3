// tests/lexer_tests.rs

use flyql::lexer::{Char, Position};

fn ch(value: char) -> Char {
    Char::new(value, Position::default())
}

// ============================================================================
// Delimiters and Brackets
// ============================================================================

#[test]
fn test_only_space_is_a_delimiter() {
    assert!(ch(' ').is_delimiter());
    assert!(!ch('\t').is_delimiter());
    assert!(!ch('\n').is_delimiter());
}

#[test]
fn test_group_chars() {
    assert!(ch('(').is_group_open());
    assert!(ch(')').is_group_close());
    assert!(!ch('(').is_group_close());
    assert!(!ch('[').is_group_open());
}

#[test]
fn test_newline() {
    assert!(ch('\n').is_newline());
    assert!(!ch('\r').is_newline());
}

// ============================================================================
// Keys, Operators and Values
// ============================================================================

#[test]
fn test_key_chars() {
    let test_cases = vec![
        ('a', true),
        ('Z', true),
        ('7', true),
        ('_', true),
        ('.', true),
        (':', true),
        ('/', true),
        ('-', false),
        ('@', false),
        ('"', false),
        ('=', false),
    ];

    for (input, expected) in test_cases {
        assert_eq!(ch(input).is_key(), expected, "Failed for input: {:?}", input);
    }
}

#[test]
fn test_operator_chars() {
    for c in ['=', '!', '~', '<', '>'] {
        assert!(ch(c).is_op(), "Failed for input: {:?}", c);
    }
    for c in ['a', '-', ' ', '&', '|'] {
        assert!(!ch(c).is_op(), "Failed for input: {:?}", c);
    }
}

#[test]
fn test_value_chars() {
    for c in ['a', '1', '-', '.', '*', '!', '~', '<', '\\'] {
        assert!(ch(c).is_value(), "Failed for input: {:?}", c);
    }
    for c in ['"', '\'', ' ', '(', ')', '='] {
        assert!(!ch(c).is_value(), "Failed for input: {:?}", c);
    }
}

#[test]
fn test_quotes_are_tracked_independently() {
    assert!(ch('\'').is_single_quote());
    assert!(!ch('\'').is_double_quote());
    assert!(ch('\'').is_double_quoted_value());
    assert!(!ch('\'').is_single_quoted_value());

    assert!(ch('"').is_double_quote());
    assert!(ch('"').is_single_quoted_value());
    assert!(!ch('"').is_double_quoted_value());
}
