//! # sqlnode-cli
//!
//! Command-line front end for `sqlnode-core`: parses SQL text under a chosen
//! dialect or configuration and prints syntax trees, node counts or an
//! equivalence verdict.

pub mod args;
pub mod error;
pub mod report;

pub use args::Cli;
pub use error::{CliError, Result};
pub use report::{render, Mode};

use sqlnode_core::SqlParser;
use tracing::info;

/// Parses the input selected by `cli` and renders it.
///
/// # Errors
///
/// Fails on unusable options, unreadable input or a parse error.
pub fn run(cli: &Cli) -> Result<String> {
    let config = cli.parser_config()?;
    let mut parser = SqlParser::new(config)?;
    let text = cli.input()?;
    let statements = parser.parse_statements(&text)?;
    info!(statements = statements.len(), "parsed input");
    render(parser.context_mut(), statements, cli.mode())
}
