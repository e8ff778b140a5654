//! Capabilities every node payload provides.
//!
//! The traits are orthogonal: construction, copying, comparison, traversal
//! and printing never depend on each other, so a payload implements each
//! one next to its data and [`NodeKind`](super::NodeKind) dispatches to
//! them.

use core::fmt;

use super::args::ArgReader;
use super::print::TreePrinter;
use super::{Node, NodeType};
use crate::config::ParserConfig;
use crate::error::{Result, SqlError};
use crate::factory::NodeFactory;
use crate::visitor::Visitor;

/// Typed construction from untyped arguments.
pub trait NodeInit: Sized {
    /// Argument counts the variant accepts, one per `init` overload.
    const ARITIES: &'static [usize];

    /// Builds the payload from `args`, whose count is already known to be
    /// one of [`Self::ARITIES`].
    fn init(node_type: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self>;
}

/// Field-by-field copy with fresh children.
pub trait DeepCopy {
    /// Copies scalar fields and copies every child through the factory.
    fn copy_from(&self, factory: &mut NodeFactory) -> Self;
}

/// Semantic comparison, ignoring identity and source positions.
pub trait Equivalence {
    /// Returns true if `self` and `other` mean the same thing. Callers
    /// guarantee both payloads belong to nodes of the same type.
    fn is_equivalent(&self, other: &Self) -> bool;
}

/// Traversal of child slots.
pub trait AcceptChildren: Sized {
    /// Offers every present child slot to the visitor in declaration order
    /// and stores back whatever it returns.
    fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> Result<Self>;

    /// Pushes every present child, in the same order `accept_children`
    /// visits them.
    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>);
}

/// Diagnostic tree output.
pub trait TreeFields {
    /// Prints scalar fields, then child slots.
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result;
}

/// Visits one child slot unless the traversal has been stopped.
pub(crate) fn walk<V: Visitor + ?Sized>(node: Node, visitor: &mut V) -> Result<Node> {
    if visitor.stop_traversal() {
        Ok(node)
    } else {
        node.accept(visitor)
    }
}

pub(crate) fn walk_boxed<V: Visitor + ?Sized>(node: Box<Node>, visitor: &mut V) -> Result<Box<Node>> {
    walk(*node, visitor).map(Box::new)
}

pub(crate) fn walk_opt<V: Visitor + ?Sized>(
    node: Option<Box<Node>>,
    visitor: &mut V,
) -> Result<Option<Box<Node>>> {
    node.map(|node| walk_boxed(node, visitor)).transpose()
}

pub(crate) fn walk_all<V: Visitor + ?Sized>(nodes: Vec<Node>, visitor: &mut V) -> Result<Vec<Node>> {
    nodes.into_iter().map(|node| walk(node, visitor)).collect()
}

pub(crate) fn copy_boxed(node: &Node, factory: &mut NodeFactory) -> Box<Node> {
    Box::new(factory.copy_node(node))
}

pub(crate) fn copy_opt(node: Option<&Node>, factory: &mut NodeFactory) -> Option<Box<Node>> {
    node.map(|node| copy_boxed(node, factory))
}

pub(crate) fn copy_all(nodes: &[Node], factory: &mut NodeFactory) -> Vec<Node> {
    nodes.iter().map(|node| factory.copy_node(node)).collect()
}

pub(crate) fn equivalent_opt(left: Option<&Node>, right: Option<&Node>) -> bool {
    match (left, right) {
        (None, None) => true,
        (Some(left), Some(right)) => left.is_equivalent(right),
        _ => false,
    }
}

pub(crate) fn equivalent_all(left: &[Node], right: &[Node]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .all(|(left, right)| left.is_equivalent(right))
}

/// Derives a payload field from the node type, for variants shared by
/// several tags.
pub(crate) fn from_tag<T>(node_type: NodeType, lookup: fn(NodeType) -> Option<T>) -> Result<T> {
    lookup(node_type).ok_or(SqlError::NotImplemented {
        tag: node_type.tag(),
    })
}
