//! Per-parser shared state.

use core::fmt;
use std::collections::HashSet;

use crate::ast::{Node, NodeArgs, NodeId, NodeType, TreePrinter};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::factory::NodeFactory;

/// Prefix of generated result column names.
pub const GENERATED_COLUMN_PREFIX: &str = "_SQL_COL_";

/// State that lives for exactly one parse call.
#[derive(Debug, Default)]
pub struct ParseSession {
    parameters: Vec<u32>,
    has_return_parameter: bool,
    printed: HashSet<NodeId>,
    generated_names: u32,
}

impl ParseSession {
    /// Allocates the next 0-based parameter number and records it.
    pub fn next_parameter(&mut self) -> u32 {
        let number = u32::try_from(self.parameters.len()).unwrap_or(u32::MAX);
        self.parameters.push(number);
        number
    }

    /// Parameter numbers allocated in this parse, in source order.
    #[must_use]
    pub fn parameters(&self) -> &[u32] {
        &self.parameters
    }

    /// Marks the statement as `? = CALL ...`.
    pub fn set_return_parameter(&mut self) {
        self.has_return_parameter = true;
    }

    /// True if the statement has a return parameter.
    #[must_use]
    pub const fn has_return_parameter(&self) -> bool {
        self.has_return_parameter
    }

    /// Returns a fresh `_SQL_COL_<n>` name, numbered from 1.
    pub fn next_generated_column_name(&mut self) -> String {
        self.generated_names += 1;
        format!("{GENERATED_COLUMN_PREFIX}{}", self.generated_names)
    }

    /// Clears all per-parse state, keeping allocations.
    pub fn reset(&mut self) {
        self.parameters.clear();
        self.has_return_parameter = false;
        self.printed.clear();
        self.generated_names = 0;
    }
}

/// Configuration, session state and node factory of one parser.
///
/// Grammar productions build nodes through [`ParserContext::make_node`];
/// downstream stages can keep using the same context to synthesize or copy
/// nodes after parsing.
#[derive(Debug, Default)]
pub struct ParserContext {
    config: ParserConfig,
    session: ParseSession,
    factory: NodeFactory,
}

impl ParserContext {
    /// Creates a context with a fresh factory and session.
    #[must_use]
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            session: ParseSession::default(),
            factory: NodeFactory::new(),
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replaces the configuration after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::SqlError::Config`] if the configuration is invalid.
    pub fn set_config(&mut self, config: ParserConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// The current parse session.
    #[must_use]
    pub const fn session(&self) -> &ParseSession {
        &self.session
    }

    /// The current parse session, mutably.
    pub fn session_mut(&mut self) -> &mut ParseSession {
        &mut self.session
    }

    /// The node factory.
    #[must_use]
    pub const fn factory(&self) -> &NodeFactory {
        &self.factory
    }

    /// Builds a node with the context's configuration.
    ///
    /// # Errors
    ///
    /// See [`NodeFactory::make_node`].
    pub fn make_node(&mut self, node_type: NodeType, args: NodeArgs) -> Result<Node> {
        self.factory.make_node(node_type, &self.config, args)
    }

    /// Deep-copies a node through the factory.
    pub fn copy_node(&mut self, node: &Node) -> Node {
        self.factory.copy_node(node)
    }

    /// Prints `node` into `out`. Nodes already printed in this session
    /// show up as back references.
    pub fn tree_print(&mut self, node: &Node, out: &mut dyn fmt::Write) -> fmt::Result {
        TreePrinter::with_printed(out, &mut self.session.printed).print(node)
    }

    /// Prints `node` into a new string; see [`ParserContext::tree_print`].
    ///
    /// # Errors
    ///
    /// Returns [`fmt::Error`] if a field fails to format.
    pub fn tree_string(&mut self, node: &Node) -> core::result::Result<String, fmt::Error> {
        let mut out = String::new();
        self.tree_print(node, &mut out)?;
        Ok(out)
    }

    /// Resets the session for a new parse.
    pub fn reset(&mut self) {
        self.session.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node_args;

    #[test]
    fn test_session_counters_restart_after_reset() {
        let mut session = ParseSession::default();
        assert_eq!(session.next_parameter(), 0);
        assert_eq!(session.next_parameter(), 1);
        assert_eq!(session.next_generated_column_name(), "_SQL_COL_1");
        session.set_return_parameter();

        session.reset();
        assert!(session.parameters().is_empty());
        assert!(!session.has_return_parameter());
        assert_eq!(session.next_generated_column_name(), "_SQL_COL_1");
    }

    #[test]
    fn test_tree_print_marks_repeats() {
        let mut context = ParserContext::default();
        let node = context
            .make_node(NodeType::BooleanConstant, node_args![true])
            .unwrap();
        let first = context.tree_string(&node).unwrap();
        let second = context.tree_string(&node).unwrap();
        assert!(first.contains("value: true"));
        assert!(second.contains("(printed above)"));

        context.reset();
        assert!(!context.tree_string(&node).unwrap().contains("(printed above)"));
    }

    struct Closed;

    impl fmt::Write for Closed {
        fn write_str(&mut self, _: &str) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    #[test]
    fn test_tree_print_propagates_write_errors() {
        let mut context = ParserContext::default();
        let node = context
            .make_node(NodeType::IntConstant, node_args![1_i64])
            .unwrap();
        assert_eq!(context.tree_print(&node, &mut Closed), Err(fmt::Error));
    }

    #[test]
    fn test_set_config_validates() {
        let mut context = ParserContext::default();
        let bad = ParserConfig::new().with_max_identifier_length(0);
        assert!(context.set_config(bad).is_err());
        assert_eq!(context.config(), &ParserConfig::default());
    }
}
