//! Character classification for FlyQL input.
//!
//! The parser never builds a token stream up front. Instead every input
//! character is wrapped in a [`Char`] that knows where it came from and which
//! lexical classes it belongs to; the state machine asks those questions one
//! character at a time.

use serde::Serialize;

pub const DELIMITER: char = ' ';
pub const DOT: char = '.';
pub const UNDERSCORE: char = '_';
pub const COLON: char = ':';
pub const SLASH: char = '/';
pub const BACKSLASH: char = '\\';
pub const BRACKET_OPEN: char = '(';
pub const BRACKET_CLOSE: char = ')';
pub const EQUAL_SIGN: char = '=';
pub const EXCL_MARK: char = '!';
pub const TILDE: char = '~';
pub const LOWER_THAN: char = '<';
pub const GREATER_THAN: char = '>';
pub const DOUBLE_QUOTE: char = '"';
pub const SINGLE_QUOTE: char = '\'';
pub const NEWLINE: char = '\n';

/// Location of a character in the query text.
///
/// `pos` counts characters from the start of the input (newlines included),
/// `line` and `column` are zero-based.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Position {
    pub pos: usize,
    pub line: usize,
    pub column: usize,
}

/// A single input character together with its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Char {
    pub value: char,
    pub position: Position,
}

impl Char {
    pub fn new(value: char, position: Position) -> Self {
        Char { value, position }
    }

    pub fn pos(&self) -> usize {
        self.position.pos
    }

    pub fn is_delimiter(&self) -> bool {
        self.value == DELIMITER
    }

    /// Characters allowed in an unquoted key.
    ///
    /// A hyphen is not a key character: `user-agent=x` fails with errno 3.
    pub fn is_key(&self) -> bool {
        self.value.is_ascii_alphanumeric()
            || matches!(self.value, UNDERSCORE | DOT | COLON | SLASH)
    }

    pub fn is_op(&self) -> bool {
        matches!(
            self.value,
            EQUAL_SIGN | EXCL_MARK | TILDE | LOWER_THAN | GREATER_THAN
        )
    }

    pub fn is_group_open(&self) -> bool {
        self.value == BRACKET_OPEN
    }

    pub fn is_group_close(&self) -> bool {
        self.value == BRACKET_CLOSE
    }

    pub fn is_double_quote(&self) -> bool {
        self.value == DOUBLE_QUOTE
    }

    pub fn is_double_quoted_value(&self) -> bool {
        !self.is_double_quote()
    }

    pub fn is_single_quote(&self) -> bool {
        self.value == SINGLE_QUOTE
    }

    pub fn is_single_quoted_value(&self) -> bool {
        !self.is_single_quote()
    }

    pub fn is_equals(&self) -> bool {
        self.value == EQUAL_SIGN
    }

    /// Characters allowed in an unquoted value.
    pub fn is_value(&self) -> bool {
        !self.is_double_quote()
            && !self.is_single_quote()
            && !self.is_delimiter()
            && !self.is_group_open()
            && !self.is_group_close()
            && !self.is_equals()
    }

    pub fn is_newline(&self) -> bool {
        self.value == NEWLINE
    }
}

#[cfg(test)]
fn ch(value: char) -> Char {
    Char::new(value, Position::default())
}

#[test]
fn test_key_chars() {
    for c in ['a', 'Z', '0', '9', '_', '.', ':', '/'] {
        assert!(ch(c).is_key(), "expected {c:?} to be a key char");
    }
    for c in ['-', ' ', '=', '(', '"', 'é'] {
        assert!(!ch(c).is_key(), "expected {c:?} not to be a key char");
    }
}

#[test]
fn test_value_chars() {
    assert!(ch('-').is_value());
    assert!(ch('!').is_value());
    assert!(ch('é').is_value());
    assert!(!ch('=').is_value());
    assert!(!ch(')').is_value());
    assert!(!ch('\'').is_value());
}
