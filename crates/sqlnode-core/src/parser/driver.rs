//! The reusable parser front end.

use tracing::{debug, warn};

use super::error::{EngineFailure, EngineResult, GrammarErrorKind};
use super::grammar::SqlGrammar;
use crate::ast::Node;
use crate::config::ParserConfig;
use crate::context::ParserContext;
use crate::dialect::Dialect;
use crate::error::{Result, SqlError};

/// Converts a 1-based line/column position into a 0-based character offset.
///
/// Positions past the end of `text` clamp to its length.
#[must_use]
pub fn char_offset(text: &str, line: usize, column: usize) -> usize {
    let total = text.chars().count();
    let line_start = if line <= 1 {
        0
    } else {
        text.chars()
            .enumerate()
            .filter(|&(_, c)| c == '\n')
            .nth(line - 2)
            .map_or(total, |(index, _)| index + 1)
    };
    (line_start + column.saturating_sub(1)).min(total)
}

/// A SQL parser that can be reused for any number of unrelated parses.
///
/// The parser owns its [`ParserContext`] and a cached grammar engine. Each
/// call to [`SqlParser::parse_statement`] or [`SqlParser::parse_statements`]
/// starts from a clean parse session, so nothing leaks from one parse into
/// the next. A lexical error discards the engine; the next parse builds a
/// fresh one. A syntax error leaves it in place.
///
/// A parser is meant to be used by one thread at a time.
///
/// # Example
///
/// ```
/// use sqlnode_core::{NodeType, SqlParser};
///
/// let mut parser = SqlParser::default();
/// let statement = parser.parse_statement("SELECT a FROM t WHERE a = ?").unwrap();
/// assert_eq!(statement.node_type(), NodeType::Cursor);
/// assert_eq!(parser.parameters(), &[0]);
/// ```
#[derive(Debug, Default)]
pub struct SqlParser {
    context: ParserContext,
    engine: Option<SqlGrammar>,
    engine_builds: usize,
}

impl SqlParser {
    /// Creates a parser for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Config`] if the configuration is invalid.
    pub fn new(config: ParserConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            context: ParserContext::new(config),
            engine: None,
            engine_builds: 0,
        })
    }

    /// Creates a parser configured by `dialect`.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Config`] if the dialect's configuration is invalid.
    pub fn with_dialect(dialect: &dyn Dialect) -> Result<Self> {
        debug!(dialect = dialect.name(), "configuring parser");
        Self::new(dialect.config())
    }

    /// Parses exactly one statement.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Syntax`] or [`SqlError::Lexical`] with the
    /// character offset of the problem, or the error raised while building
    /// a node (for example [`SqlError::DuplicateTableName`]).
    pub fn parse_statement(&mut self, text: &str) -> Result<Node> {
        self.run(text, SqlGrammar::statement)
    }

    /// Parses a semicolon-separated list of statements, in source order.
    ///
    /// # Errors
    ///
    /// See [`SqlParser::parse_statement`]. No statements are returned if any
    /// of them fails.
    pub fn parse_statements(&mut self, text: &str) -> Result<Vec<Node>> {
        self.run(text, SqlGrammar::statements)
    }

    fn run<T>(
        &mut self,
        text: &str,
        production: fn(&mut SqlGrammar, &mut ParserContext) -> EngineResult<T>,
    ) -> Result<T> {
        let Self {
            context,
            engine,
            engine_builds,
        } = self;
        context.reset();
        debug!(bytes = text.len(), "parsing");

        let grammar = engine.get_or_insert_with(|| {
            *engine_builds += 1;
            debug!(builds = *engine_builds, "building grammar engine");
            SqlGrammar::new(context.config())
        });
        let outcome = grammar
            .start(text, context.config())
            .and_then(|()| production(&mut *grammar, &mut *context));

        match outcome {
            Ok(parsed) => {
                debug!(
                    parameters = context.session().parameters().len(),
                    "parse finished"
                );
                Ok(parsed)
            }
            Err(EngineFailure::Node(error)) => {
                debug!(%error, "node construction failed");
                Err(error)
            }
            Err(EngineFailure::Grammar(error)) => {
                let offset = char_offset(text, error.line, error.column);
                match error.kind {
                    GrammarErrorKind::Syntax => {
                        debug!(offset, message = %error.message, "syntax error");
                        Err(SqlError::Syntax {
                            message: error.message,
                            offset,
                        })
                    }
                    GrammarErrorKind::Lexical => {
                        warn!(offset, message = %error.message, "lexical error, discarding grammar engine");
                        *engine = None;
                        Err(SqlError::Lexical {
                            message: error.message,
                            offset,
                        })
                    }
                }
            }
        }
    }

    /// The parser context, for further node construction after a parse.
    #[must_use]
    pub const fn context(&self) -> &ParserContext {
        &self.context
    }

    /// The parser context, mutably.
    pub fn context_mut(&mut self) -> &mut ParserContext {
        &mut self.context
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        self.context.config()
    }

    /// Replaces the configuration; takes effect on the next parse.
    ///
    /// # Errors
    ///
    /// Returns [`SqlError::Config`] if the configuration is invalid.
    pub fn set_config(&mut self, config: ParserConfig) -> Result<()> {
        self.context.set_config(config)
    }

    /// Parameter numbers of the last parse, in source order.
    #[must_use]
    pub fn parameters(&self) -> &[u32] {
        self.context.session().parameters()
    }

    /// True if the last parse was a `? = CALL` statement.
    #[must_use]
    pub const fn has_return_parameter(&self) -> bool {
        self.context.session().has_return_parameter()
    }

    /// Number of grammar engines built so far.
    #[must_use]
    pub const fn engine_builds(&self) -> usize {
        self.engine_builds
    }

    /// True if a grammar engine is cached for the next parse.
    #[must_use]
    pub const fn has_engine(&self) -> bool {
        self.engine.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::NodeType;

    #[test]
    fn test_char_offset() {
        assert_eq!(char_offset("SELECT a FROM WHERE;", 1, 15), 14);
        assert_eq!(char_offset("SELECT a\nFROM WHERE;", 2, 6), 14);
        assert_eq!(char_offset("SELECT é\nFROM x", 2, 1), 9);
        assert_eq!(char_offset("abc", 9, 9), 3);
        assert_eq!(char_offset("", 1, 1), 0);
    }

    #[test]
    fn test_syntax_error_keeps_engine() {
        let mut parser = SqlParser::default();
        let error = parser.parse_statement("SELECT a FROM WHERE;").unwrap_err();
        assert_eq!(error.offset(), 14);
        assert!(matches!(error, SqlError::Syntax { .. }));
        assert!(parser.has_engine());

        parser.parse_statement("SELECT 1").unwrap();
        assert_eq!(parser.engine_builds(), 1);
    }

    #[test]
    fn test_lexical_error_discards_engine() {
        let mut parser = SqlParser::default();
        parser.parse_statement("SELECT 1").unwrap();
        let error = parser.parse_statement("SELECT 'open").unwrap_err();
        assert!(matches!(error, SqlError::Lexical { offset: 7, .. }));
        assert!(!parser.has_engine());

        let statement = parser.parse_statement("SELECT 2").unwrap();
        assert_eq!(statement.node_type(), NodeType::Cursor);
        assert_eq!(parser.engine_builds(), 2);
    }

    #[test]
    fn test_session_state_does_not_leak() {
        let mut parser = SqlParser::default();
        parser.parse_statement("? = CALL proc(?, ?)").unwrap();
        assert_eq!(parser.parameters(), &[0, 1, 2]);
        assert!(parser.has_return_parameter());

        parser.parse_statement("SELECT a FROM t WHERE b = ?").unwrap();
        assert_eq!(parser.parameters(), &[0]);
        assert!(!parser.has_return_parameter());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = ParserConfig::new().with_max_string_length(0);
        assert!(matches!(SqlParser::new(config), Err(SqlError::Config(_))));
    }
}
