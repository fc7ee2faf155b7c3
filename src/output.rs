//! JSON rendering of parse results.
//!
//! A leaf renders as its expression, an internal node as its operator and
//! children:
//!
//! ```
//! use flyql::{parse, to_json};
//!
//! let root = parse("a=1").unwrap();
//! assert_eq!(
//!     to_json(&root).unwrap(),
//!     r#"{"key":{"segments":["a"],"raw":"a"},"operator":"=","value":1}"#
//! );
//! ```

use crate::ast::Node;
use crate::parser::{Parser, State};
use serde::Serialize;

/// Snapshot of a parser after a call, for callers that do not raise errors
/// or that parse partial input.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostics<'a> {
    pub state: State,
    pub errno: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
    pub key: &'a str,
    pub key_value_operator: &'a str,
    pub value: &'a str,
    pub bool_operator: &'a str,
    pub open_groups: usize,
    pub root: Option<&'a Node>,
}

impl<'a> Diagnostics<'a> {
    pub fn new(parser: &'a Parser) -> Self {
        Diagnostics {
            state: parser.state(),
            errno: parser.errno(),
            message: parser.error().map(|e| e.message.as_str()),
            key: parser.key(),
            key_value_operator: parser.key_value_operator(),
            value: parser.value(),
            bool_operator: parser.bool_operator(),
            open_groups: parser.depth(),
            root: parser.root(),
        }
    }
}

/// Compact JSON.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(value)
}

/// JSON with 2-space indentation.
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(value)
}
