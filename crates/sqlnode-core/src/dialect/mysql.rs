//! MySQL-flavored dialect.

use super::Dialect;
use crate::config::{Features, IdentifierCase};

/// MySQL operators and types: bit operators, `&&`/`||` as logic,
/// `UNSIGNED`, double-quoted strings and `ROLLUP`, `CUBE` and
/// `GROUPING SETS`.
///
/// Identifiers keep the case they were written in.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn features(&self) -> Features {
        Features::default()
            | Features::GROUPING
            | Features::INFIX_BIT_OPERATORS
            | Features::INFIX_LOGICAL_OPERATORS
            | Features::UNSIGNED
            | Features::DOUBLE_QUOTED_STRING
    }

    fn identifier_case(&self) -> IdentifierCase {
        IdentifierCase::Preserve
    }

    fn max_identifier_length(&self) -> usize {
        64
    }
}
