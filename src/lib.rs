//! FlyQL: a compact boolean filter query language.
//!
//! ```text
//! status=200 and (service=api or service=web) and user:name="john doe"
//! ```
//!
//! [`parse`] turns such a query into a [`Node`] tree. [`parse_with`] exposes
//! the parsing machine itself for partial input and for highlighting.
pub mod ast;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod tokens;
pub mod value;

pub use ast::{BoolOperator, Expression, Key, KeyError, KeyParser, Node, Operator, parse_key};
pub use error::{FlyqlError, ParserError, errno};
pub use lexer::{Char, Position};
pub use output::{to_json, to_json_pretty};
pub use parser::{CharType, ParseOptions, Parser, State, TypedChar, parse, parse_with};
pub use tokens::{Token, semantic_tokens, tokenize};
pub use value::{Value, is_numeric};
