//! Parse flyql queries and render the tree as JSON

use super::{CliError, CliOptions, render};
use crate::Parser;
use crate::output::Diagnostics;

/// Rendered result of a parse command
#[derive(Debug)]
pub struct ParseOutput {
    /// JSON document to print
    pub json: String,
    /// Whether the parse failed (only possible with `no_raise`)
    pub failed: bool,
}

/// Execute a flyql parse operation
///
/// In raising mode the tree is printed. With `no_raise` or `partial` the
/// whole machine snapshot is printed instead, so incomplete input can be
/// inspected.
pub fn execute_parse(options: &CliOptions) -> Result<ParseOutput, CliError> {
    let parser = Parser::parse(&options.query, options.parse_options())?;

    if options.no_raise || options.partial {
        let diagnostics = Diagnostics::new(&parser);
        return Ok(ParseOutput {
            json: render(&diagnostics, options.pretty)?,
            failed: parser.error().is_some(),
        });
    }

    Ok(ParseOutput {
        json: render(&parser.root(), options.pretty)?,
        failed: false,
    })
}
