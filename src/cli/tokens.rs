//! Export semantic highlighting tokens

use super::{CliError, CliOptions, render};
use crate::{Parser, semantic_tokens};

/// Execute a flyql tokens operation
///
/// Tokens are produced for whatever the parser consumed, so failing or
/// partial input still yields tokens up to the point where parsing stopped.
pub fn execute_tokens(options: &CliOptions) -> Result<String, CliError> {
    let parse_options = options.parse_options().raise_error(false);
    let parser = Parser::parse(&options.query, parse_options)?;
    render(&semantic_tokens(parser.typed_chars()), options.pretty)
}
