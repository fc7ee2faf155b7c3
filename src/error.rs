use crate::ast::KeyError;
use thiserror::Error;

/// Stable numeric error codes reported by the parser.
///
/// Consumers branch on these values, so they never change.
pub mod errno {
    pub const INVALID_CHAR_INITIAL: u32 = 1;
    pub const INVALID_CHAR_KEY: u32 = 3;
    pub const INVALID_CHAR_OPERATOR: u32 = 4;
    pub const UNMATCHED_PAREN_VALUE: u32 = 9;
    pub const INVALID_OPERATOR: u32 = 10;
    /// Reserved for compatibility; quoted values accept every character.
    pub const INVALID_CHAR_QUOTED_VALUE: u32 = 11;
    pub const UNMATCHED_PAREN_BOOL_DELIMITER: u32 = 15;
    pub const INVALID_CHAR_BOOL_DELIMITER: u32 = 18;
    pub const UNMATCHED_PAREN_EXPECT_BOOL_OP: u32 = 19;
    pub const INVALID_CHAR_BOOL_OP: u32 = 20;
    pub const EXPECTED_DELIMITER_AFTER_BOOL_OP: u32 = 23;
    pub const EMPTY_INPUT: u32 = 24;
    pub const UNEXPECTED_EOF: u32 = 25;
    pub const UNEXPECTED_EOF_AFTER_BOOL_OP: u32 = 26;
    pub const UNMATCHED_PAREN_EOF: u32 = 27;
    pub const EXPECTED_OPERATOR: u32 = 28;
    pub const EXPECTED_VALUE: u32 = 29;
    /// Reserved for compatibility; quoted keys accept every character.
    pub const INVALID_CHAR_SINGLE_QUOTED_KEY: u32 = 30;
    /// Reserved for compatibility; quoted keys accept every character.
    pub const INVALID_CHAR_DOUBLE_QUOTED_KEY: u32 = 31;
    pub const INVALID_KEY: u32 = 32;
}

/// A terminal parser error: a human-readable message plus a stable code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParserError {
    pub message: String,
    pub errno: u32,
}

impl ParserError {
    pub fn new(message: impl Into<String>, errno: u32) -> Self {
        ParserError {
            message: message.into(),
            errno,
        }
    }

    /// Whether this error reports an unbalanced parenthesis.
    pub fn is_unmatched_parenthesis(&self) -> bool {
        matches!(
            self.errno,
            errno::UNMATCHED_PAREN_VALUE
                | errno::UNMATCHED_PAREN_BOOL_DELIMITER
                | errno::UNMATCHED_PAREN_EXPECT_BOOL_OP
                | errno::UNMATCHED_PAREN_EOF
        )
    }
}

/// Any error raised by this crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FlyqlError {
    #[error(transparent)]
    Parser(#[from] ParserError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error("invalid operator: {0}")]
    InvalidOperator(String),

    #[error("empty key")]
    EmptyKey,
}

impl FlyqlError {
    /// The parser error code, when this is a parser error.
    pub fn errno(&self) -> Option<u32> {
        match self {
            FlyqlError::Parser(e) => Some(e.errno),
            _ => None,
        }
    }
}
