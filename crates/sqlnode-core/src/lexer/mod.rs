//! SQL lexer.
//!
//! A hand-written lexer that turns SQL text into tokens carrying character
//! spans and line/column positions.

mod span;
mod token;
mod tokenizer;

pub use span::Span;
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::{LexError, Lexer};
