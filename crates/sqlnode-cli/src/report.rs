//! Rendering of parsed statements.

use std::fmt::Write;

use sqlnode_core::{Node, NodeCounter, ParserContext};

use crate::error::{CliError, Result};

/// What to print for the parsed statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One tree per statement.
    Tree,
    /// Node count per statement.
    Count,
    /// Equivalence of the first two statements.
    Equivalence,
}

/// Renders `statements` in the given mode.
///
/// # Errors
///
/// [`CliError::NeedTwoStatements`] in equivalence mode with fewer than two
/// statements, [`CliError::Render`] if the output cannot be written, or any
/// error a visitor raises.
pub fn render(context: &mut ParserContext, statements: Vec<Node>, mode: Mode) -> Result<String> {
    let mut out = String::new();
    match mode {
        Mode::Tree => {
            for (index, statement) in statements.iter().enumerate() {
                writeln!(out, "-- statement {}", index + 1)?;
                context.tree_print(statement, &mut out)?;
            }
        }
        Mode::Count => {
            for (index, statement) in statements.into_iter().enumerate() {
                let mut counter = NodeCounter::new();
                statement.accept(&mut counter)?;
                writeln!(out, "statement {}: {} nodes", index + 1, counter.visited())?;
            }
        }
        Mode::Equivalence => {
            let [first, second, ..] = statements.as_slice() else {
                return Err(CliError::NeedTwoStatements(statements.len()));
            };
            let verdict = if first.is_equivalent(second) {
                "equivalent"
            } else {
                "not equivalent"
            };
            writeln!(out, "{verdict}")?;
        }
    }
    Ok(out)
}
