//! The default dialect.

use super::Dialect;

/// ANSI-leaning grammar: `%` and `DIV` are accepted, every other optional
/// feature is off and unquoted identifiers fold to lower case.
///
/// Its configuration is exactly [`crate::ParserConfig::default`], so a
/// parser built from it behaves like [`crate::SqlParser::default`].
#[derive(Debug, Default, Clone, Copy)]
pub struct GenericDialect;

impl GenericDialect {
    /// Returns the dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for GenericDialect {
    fn name(&self) -> &'static str {
        "generic"
    }
}
