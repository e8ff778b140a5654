//! SQL parser.
//!
//! A hand-written recursive descent grammar with Pratt expression parsing,
//! driven by a reusable [`SqlParser`] that maps grammar failures to
//! character offsets.

mod driver;
mod error;
mod grammar;
mod pratt;

pub use driver::{char_offset, SqlParser};
pub use error::{EngineFailure, EngineResult, GrammarError, GrammarErrorKind};
pub use grammar::SqlGrammar;
