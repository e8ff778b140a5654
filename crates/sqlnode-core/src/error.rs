//! Error types for node construction and parsing.

use crate::ast::NodeType;

/// Errors raised while building nodes or parsing SQL text.
///
/// Contract violations (`TypeMismatch`, `ArityMismatch`, `NotImplemented`)
/// point at a defect in whatever produced the `make_node` call; the other
/// variants describe problems with the user's SQL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SqlError {
    /// An `init` argument did not have the shape the variant expects.
    #[error("{node_type}: argument {position} should be {expected}, found {found}")]
    TypeMismatch {
        /// The node type being initialized.
        node_type: NodeType,
        /// 0-based argument position.
        position: usize,
        /// The expected argument shape.
        expected: &'static str,
        /// The shape that was supplied.
        found: &'static str,
    },

    /// No `init` overload of the variant takes this many arguments.
    #[error("{node_type}: no initializer takes {found} arguments (accepted: {expected:?})")]
    ArityMismatch {
        /// The node type being initialized.
        node_type: NodeType,
        /// Number of arguments supplied.
        found: usize,
        /// Arities the variant declares.
        expected: &'static [usize],
    },

    /// A raw node tag with no registry entry.
    #[error("node type tag {tag} is not implemented")]
    NotImplemented {
        /// The unknown tag.
        tag: u16,
    },

    /// The input did not match any grammar production.
    #[error("syntax error at offset {offset}: {message}")]
    Syntax {
        /// Description of what went wrong.
        message: String,
        /// 0-based character offset into the source text.
        offset: usize,
    },

    /// The character stream could not be tokenized.
    #[error("lexical error at offset {offset}: {message}")]
    Lexical {
        /// Description of what went wrong.
        message: String,
        /// 0-based character offset into the source text.
        offset: usize,
    },

    /// An identifier exceeds the configured ceiling.
    #[error("identifier '{identifier}' is longer than {max} characters")]
    IdentifierTooLong {
        /// The offending identifier.
        identifier: String,
        /// Configured maximum length.
        max: usize,
    },

    /// A string literal exceeds the configured ceiling.
    #[error("string literal of {length} characters is longer than {max} characters")]
    StringTooLong {
        /// Length of the literal, in characters.
        length: usize,
        /// Configured maximum length.
        max: usize,
    },

    /// The same exposed table name appears twice in one FROM list.
    #[error("duplicate table name in FROM list: {name}")]
    DuplicateTableName {
        /// The repeated exposed name.
        name: String,
    },

    /// An invalid configuration value.
    #[error("invalid parser configuration: {0}")]
    Config(String),
}

impl SqlError {
    /// Returns the 0-based character offset of the error, or 0 when the error
    /// has no meaningful position.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match self {
            Self::Syntax { offset, .. } | Self::Lexical { offset, .. } => *offset,
            _ => 0,
        }
    }

    /// Returns true for errors caused by a defective node producer rather
    /// than by the SQL text.
    #[must_use]
    pub const fn is_contract_violation(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. } | Self::ArityMismatch { .. } | Self::NotImplemented { .. }
        )
    }
}

/// Result type for node construction and parsing.
pub type Result<T> = std::result::Result<T, SqlError>;
