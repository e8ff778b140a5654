//! Error types for the command-line front end.

use std::path::PathBuf;

use sqlnode_core::SqlError;

/// Errors raised while resolving options, reading input or parsing.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Standard input could not be read.
    #[error("Failed to read standard input: {0}")]
    Stdin(#[source] std::io::Error),

    /// The configuration file is not a valid parser configuration.
    #[error("Invalid configuration file '{path}': {source}")]
    ConfigFile {
        /// Path to the configuration file.
        path: PathBuf,
        /// The JSON error.
        source: serde_json::Error,
    },

    /// No dialect with this name.
    #[error("Unknown dialect '{0}' (expected one of: generic, ansi, mysql)")]
    UnknownDialect(String),

    /// `--equivalence` needs two statements to compare.
    #[error("Equivalence check needs two statements, found {0}")]
    NeedTwoStatements(usize),

    /// Output could not be formatted.
    #[error("Failed to render output: {0}")]
    Render(#[from] std::fmt::Error),

    /// Parsing or configuration failed.
    #[error(transparent)]
    Sql(#[from] SqlError),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
