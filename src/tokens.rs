//! Semantic tokens for editors.
//!
//! Built purely from the per-character classification the parser records
//! (see [`crate::Parser::typed_chars`]); nothing here feeds back into
//! parsing. Runs of characters with the same [`CharType`] become one token,
//! value tokens are refined into numbers or strings, and the result is
//! encoded as the flat, delta-relative stream that editors such as Monaco
//! consume: five integers per token.
//!
//! ```
//! use flyql::{ParseOptions, Parser, semantic_tokens};
//!
//! let parser = Parser::parse("a=1", ParseOptions::default()).unwrap();
//! // key `a`, operator `=`, number `1`
//! assert_eq!(
//!     semantic_tokens(parser.typed_chars()),
//!     vec![0, 0, 1, 0, 0, 0, 1, 1, 2, 0, 0, 1, 1, 3, 0]
//! );
//! ```

use crate::lexer::Position;
use crate::parser::{CharType, TypedChar};
use crate::value::is_numeric;
use serde::Serialize;

/// Token type legend; a token's type index is its position here.
pub const TOKEN_TYPES: [CharType; 5] = [
    CharType::Key,
    CharType::Value,
    CharType::Operator,
    CharType::Number,
    CharType::String,
];

/// A run of same-typed characters on one line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Token {
    pub start: Position,
    pub length: usize,
    pub kind: CharType,
    pub value: String,
}

impl Token {
    fn new(tc: &TypedChar) -> Self {
        Token {
            start: tc.char.position,
            length: 1,
            kind: tc.kind,
            value: tc.char.value.to_string(),
        }
    }

    fn accepts(&self, tc: &TypedChar) -> bool {
        self.kind == tc.kind && self.start.line == tc.char.position.line
    }

    fn push(&mut self, tc: &TypedChar) {
        self.value.push(tc.char.value);
        self.length += 1;
    }

    pub fn type_index(&self) -> Option<u32> {
        TOKEN_TYPES
            .iter()
            .position(|kind| *kind == self.kind)
            .map(|i| i as u32)
    }
}

/// Group typed characters into tokens, refining values into numbers and
/// strings. Whitespace runs are kept as [`CharType::Space`] tokens.
pub fn tokenize(typed_chars: &[TypedChar]) -> Vec<Token> {
    let mut tokens: Vec<Token> = vec![];

    for tc in typed_chars {
        match tokens.last_mut() {
            Some(token) if token.accepts(tc) => token.push(tc),
            _ => tokens.push(Token::new(tc)),
        }
    }

    for token in tokens.iter_mut().filter(|t| t.kind == CharType::Value) {
        token.kind = if is_numeric(&token.value) {
            CharType::Number
        } else {
            CharType::String
        };
    }

    tokens
}

/// Encode tokens as `(lineDelta, columnDelta, length, typeIndex, modifiers)`
/// quintuples, each relative to the previous emitted token.
///
/// Whitespace is not emitted. On the same line the column delta is relative
/// to the previous token's start; on a new line it is the absolute column.
pub fn semantic_tokens(typed_chars: &[TypedChar]) -> Vec<u32> {
    let mut data = vec![];
    let mut previous: Option<Position> = None;

    for token in tokenize(typed_chars) {
        let Some(type_index) = token.type_index() else {
            continue;
        };

        let (line_delta, column_delta) = match previous {
            Some(prev) if prev.line == token.start.line => {
                (0, token.start.column - prev.column)
            }
            Some(prev) => (token.start.line - prev.line, token.start.column),
            None => (token.start.line, token.start.column),
        };

        data.extend([
            line_delta as u32,
            column_delta as u32,
            token.length as u32,
            type_index,
            0,
        ]);
        previous = Some(token.start);
    }

    data
}
