//! Failures raised inside the grammar engine.

use crate::error::SqlError;
use crate::lexer::{LexError, Token};

/// Whether the engine stopped at the token or the character level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrammarErrorKind {
    /// The tokens did not match any production.
    Syntax,
    /// The characters did not form a token.
    Lexical,
}

/// A grammar-level failure with the line/column it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at line {line}, column {column}")]
pub struct GrammarError {
    /// Syntax or lexical.
    pub kind: GrammarErrorKind,
    /// Description of what went wrong.
    pub message: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
}

impl GrammarError {
    /// Creates a syntax error positioned at `token`.
    #[must_use]
    pub fn at(token: &Token, message: impl Into<String>) -> Self {
        Self {
            kind: GrammarErrorKind::Syntax,
            message: message.into(),
            line: token.line,
            column: token.column,
        }
    }

    /// Creates an "unexpected token" error.
    #[must_use]
    pub fn unexpected(token: &Token, expected: &str) -> Self {
        let message = if token.is_eof() {
            format!("unexpected end of input, expected {expected}")
        } else {
            format!("unexpected '{}', expected {expected}", token.kind)
        };
        Self::at(token, message)
    }
}

impl From<LexError> for GrammarError {
    fn from(error: LexError) -> Self {
        Self {
            kind: GrammarErrorKind::Lexical,
            message: error.message,
            line: error.line,
            column: error.column,
        }
    }
}

/// Why a grammar production gave up.
#[derive(Debug, thiserror::Error)]
pub enum EngineFailure {
    /// Syntax or lexical failure; still needs its offset resolved.
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    /// The node factory refused a constructed node.
    #[error(transparent)]
    Node(#[from] SqlError),
}

impl From<LexError> for EngineFailure {
    fn from(error: LexError) -> Self {
        Self::Grammar(error.into())
    }
}

/// Result of a grammar production.
pub type EngineResult<T> = Result<T, EngineFailure>;
