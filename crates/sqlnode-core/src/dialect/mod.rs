//! SQL dialect presets.
//!
//! A dialect is a named bundle of grammar features and identifier rules. It
//! only produces a [`ParserConfig`]; the grammar never asks which dialect is
//! active.

mod generic;
mod mysql;

pub use generic::GenericDialect;
pub use mysql::MySqlDialect;

use crate::config::{
    Features, IdentifierCase, ParserConfig, DEFAULT_MAX_IDENTIFIER_LENGTH,
    DEFAULT_MAX_STRING_LENGTH,
};

/// Trait for SQL dialect-specific behavior.
pub trait Dialect {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the optional grammar features the dialect enables.
    fn features(&self) -> Features {
        Features::default()
    }

    /// Returns how unquoted identifiers are cased.
    fn identifier_case(&self) -> IdentifierCase {
        IdentifierCase::default()
    }

    /// Returns the longest accepted identifier, in characters.
    fn max_identifier_length(&self) -> usize {
        DEFAULT_MAX_IDENTIFIER_LENGTH
    }

    /// Returns the longest accepted string literal, in characters.
    fn max_string_length(&self) -> usize {
        DEFAULT_MAX_STRING_LENGTH
    }

    /// Builds the parser configuration for this dialect.
    fn config(&self) -> ParserConfig {
        ParserConfig::new()
            .with_features(self.features())
            .with_identifier_case(self.identifier_case())
            .with_max_identifier_length(self.max_identifier_length())
            .with_max_string_length(self.max_string_length())
    }
}

/// Looks up a built-in dialect by name, ignoring case.
#[must_use]
pub fn dialect_by_name(name: &str) -> Option<Box<dyn Dialect>> {
    match name.to_ascii_lowercase().as_str() {
        "generic" | "ansi" => Some(Box::new(GenericDialect::new())),
        "mysql" => Some(Box::new(MySqlDialect::new())),
        _ => None,
    }
}
