//! # FlyQL - Abstract Syntax Tree
//!
//! FlyQL queries are flat lists of comparisons joined by `and` / `or`, with
//! parentheses for grouping:
//!
//! ```text
//! status=200 and (service=api or service=web) and message=~".*timeout.*"
//! ```
//!
//! The AST module is organized into focused submodules:
//!
//! - **[operators]** - Comparison and boolean operators
//! - **[key]** - Segmented keys (`user:name`) and the key segmenter
//! - **[expressions]** - A single `key<op>value` comparison
//! - **[tree]** - The binary tree joining expressions
//!
//! ## Association
//!
//! `and` and `or` have the same precedence and fold to the left, so
//! `a=1 or b=2 and c=3` means `(a=1 or b=2) and c=3`. Only parentheses change
//! the grouping.
//!
//! ## Values
//!
//! Unquoted values that are numbers become integers or floats; everything
//! else, and every quoted value, is a string.
//!
//! ```text
//! count=10        // Integer(10)
//! price=12.34     // Float(12.34)
//! name=abc        // String("abc")
//! code="10"       // String("10")
//! ```
pub mod expressions;
pub mod key;
pub mod operators;
pub mod tree;

pub use expressions::Expression;
pub use key::{Key, KeyError, KeyParser, parse_key};
pub use operators::{BoolOperator, Operator};
pub use tree::Node;
