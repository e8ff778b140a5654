//! The node factory: the only place nodes are created or copied.

use tracing::trace;

use crate::ast::{Node, NodeArgs, NodeId, NodeType};
use crate::config::ParserConfig;
use crate::error::{Result, SqlError};
use crate::registry::VariantBinding;

/// Creates nodes from a node type and an untyped argument list.
///
/// Registry entries are resolved once per node type and cached. The cache
/// and the id counter are plain fields behind `&mut self`; use one factory
/// per thread.
#[derive(Debug)]
pub struct NodeFactory {
    next_id: u64,
    cache: Vec<Option<&'static VariantBinding>>,
}

impl Default for NodeFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeFactory {
    /// Creates a factory with an empty binding cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next_id: 0,
            cache: vec![None; NodeType::ALL.len()],
        }
    }

    fn binding(&mut self, node_type: NodeType) -> &'static VariantBinding {
        let slot = &mut self.cache[usize::from(node_type.tag())];
        *slot.get_or_insert_with(|| {
            let binding = node_type.variant().binding();
            trace!(
                node_type = node_type.name(),
                variant = binding.name(),
                "resolved node binding"
            );
            binding
        })
    }

    fn next_id(&mut self) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Builds a node of `node_type` from `args`.
    ///
    /// The argument count is checked against the variant's declared arities
    /// before any initializer runs. A failed initializer yields no node and
    /// consumes no id.
    ///
    /// # Errors
    ///
    /// [`SqlError::ArityMismatch`] when no overload takes `args.len()`
    /// arguments, [`SqlError::TypeMismatch`] when an argument has the wrong
    /// shape, and any semantic error the initializer raises (identifier or
    /// string length, duplicate FROM-list name).
    pub fn make_node(
        &mut self,
        node_type: NodeType,
        config: &ParserConfig,
        args: NodeArgs,
    ) -> Result<Node> {
        let binding = self.binding(node_type);
        if !binding.accepts_arity(args.len()) {
            return Err(SqlError::ArityMismatch {
                node_type,
                found: args.len(),
                expected: binding.arities(),
            });
        }
        let kind = binding.init(node_type, args, config)?;
        Ok(Node::new(self.next_id(), node_type, kind))
    }

    /// Builds a node from a raw integer tag.
    ///
    /// # Errors
    ///
    /// [`SqlError::NotImplemented`] for tags outside the registry, otherwise
    /// as [`NodeFactory::make_node`].
    pub fn make_node_by_tag(
        &mut self,
        tag: u16,
        config: &ParserConfig,
        args: NodeArgs,
    ) -> Result<Node> {
        self.make_node(NodeType::from_tag(tag)?, config, args)
    }

    /// Deep-copies `node`: same node type, scalar fields and span, a fresh
    /// id, and every child copied through this method in turn.
    pub fn copy_node(&mut self, node: &Node) -> Node {
        let binding = self.binding(node.node_type());
        debug_assert_eq!(binding.variant(), node.variant());
        let id = self.next_id();
        let kind = node.kind().copy_with(self);
        Node::new(id, node.node_type(), kind)
    }

    /// Number of node types whose binding has been resolved so far.
    #[must_use]
    pub fn cached_bindings(&self) -> usize {
        self.cache.iter().filter(|slot| slot.is_some()).count()
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub const fn nodes_created(&self) -> u64 {
        self.next_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeArg, NodeKind};
    use crate::node_args;

    fn config() -> ParserConfig {
        ParserConfig::default()
    }

    #[test]
    fn test_make_node_assigns_fresh_ids() {
        let mut factory = NodeFactory::new();
        let first = factory
            .make_node(NodeType::UntypedNullConstant, &config(), node_args![])
            .unwrap();
        let second = factory
            .make_node(NodeType::UntypedNullConstant, &config(), node_args![])
            .unwrap();
        assert_ne!(first.id(), second.id());
        assert_eq!(factory.nodes_created(), 2);
    }

    #[test]
    fn test_arity_checked_before_init() {
        let mut factory = NodeFactory::new();
        let err = factory
            .make_node(NodeType::Cast, &config(), node_args![NodeArg::Null])
            .unwrap_err();
        assert_eq!(
            err,
            SqlError::ArityMismatch {
                node_type: NodeType::Cast,
                found: 1,
                expected: &[2],
            }
        );
        assert_eq!(factory.nodes_created(), 0);
    }

    #[test]
    fn test_failed_init_consumes_no_id() {
        let mut factory = NodeFactory::new();
        let err = factory
            .make_node(NodeType::IntConstant, &config(), node_args!["seven"])
            .unwrap_err();
        assert!(err.is_contract_violation());
        assert_eq!(factory.nodes_created(), 0);
    }

    #[test]
    fn test_unknown_tag() {
        let mut factory = NodeFactory::new();
        let err = factory
            .make_node_by_tag(u16::MAX, &config(), node_args![])
            .unwrap_err();
        assert_eq!(err, SqlError::NotImplemented { tag: u16::MAX });
    }

    #[test]
    fn test_binding_cache_fills_once_per_type() {
        let mut factory = NodeFactory::new();
        assert_eq!(factory.cached_bindings(), 0);
        for _ in 0..3 {
            factory
                .make_node(NodeType::IntConstant, &config(), node_args![1])
                .unwrap();
        }
        assert_eq!(factory.cached_bindings(), 1);
        factory
            .make_node(NodeType::LongintConstant, &config(), node_args![1])
            .unwrap();
        assert_eq!(factory.cached_bindings(), 2);
    }

    #[test]
    fn test_copy_keeps_type_and_value() {
        let mut factory = NodeFactory::new();
        let node = factory
            .make_node(NodeType::VarcharConstant, &config(), node_args!["abc"])
            .unwrap();
        let copy = factory.copy_node(&node);
        assert_ne!(copy.id(), node.id());
        assert_eq!(copy.node_type(), NodeType::VarcharConstant);
        assert!(matches!(copy.kind(), NodeKind::CharConstant(c) if c.value == "abc"));
    }
}
