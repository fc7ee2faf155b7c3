//! Validate flyql query syntax

use super::{CliError, CliOptions};
use crate::Parser;

/// Result of a check operation
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
}

/// Execute a flyql check operation
pub fn execute_check(options: &CliOptions) -> Result<CheckResult, CliError> {
    let parse_options = options.parse_options().raise_error(true);
    Parser::parse(&options.query, parse_options)?;
    Ok(CheckResult::SyntaxValid)
}
