//! CLI support for flyql
//!
//! Provides programmatic access to the `flyql` command line so the same
//! behaviour can be embedded in other tools and tested without a process.

mod check;
mod parse;
mod tokens;

pub use check::{CheckResult, execute_check};
pub use parse::{ParseOutput, execute_parse};
pub use tokens::execute_tokens;

use crate::ParserError;
use std::io;
use thiserror::Error;

/// Options shared by the CLI commands
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    /// The FlyQL query
    pub query: String,
    /// Pretty-print JSON output
    pub pretty: bool,
    /// Report failures as diagnostics instead of errors
    pub no_raise: bool,
    /// Skip end-of-input validation (partial input)
    pub partial: bool,
}

impl CliOptions {
    pub fn parse_options(&self) -> crate::ParseOptions {
        crate::ParseOptions::new()
            .raise_error(!self.no_raise)
            .ignore_last_char(self.partial)
    }
}

/// Errors that can occur during CLI operations
#[derive(Debug, Error)]
pub enum CliError {
    /// Parser error
    #[error("Parse error: {0}")]
    Parse(#[from] ParserError),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// No query provided
    #[error("No query provided. Pass it as an argument or pipe it to stdin.")]
    NoInput,
}

impl CliError {
    /// Parser error code, if any
    pub fn errno(&self) -> Option<u32> {
        match self {
            CliError::Parse(e) => Some(e.errno),
            _ => None,
        }
    }
}

fn render<T: serde::Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        crate::to_json_pretty(value)
    } else {
        crate::to_json(value)
    }?;
    Ok(json)
}
