//! The visitor protocol and a few stock visitors.
//!
//! Traversal is driven by [`Node::accept`]: the node asks the visitor
//! whether to go children-first, whether to skip its children and whether
//! the traversal is over, and hands itself to [`Visitor::visit`] by value.
//! Whatever `visit` returns takes the node's place in its parent, so a
//! rewrite is just a visitor that returns a different node.

use crate::ast::{Node, NodeId, NodeType};
use crate::error::Result;

/// A caller-owned traversal over a node tree.
pub trait Visitor {
    /// Visits one node and returns the node that should take its place.
    fn visit(&mut self, node: Node) -> Result<Node>;

    /// Once true, no further node is visited.
    fn stop_traversal(&self) -> bool {
        false
    }

    /// Returns true to leave the children of `node` unvisited.
    fn skip_children(&self, _node: &Node) -> bool {
        false
    }

    /// Returns true to visit the children of `node` before `node` itself.
    fn visit_children_first(&self, _node: &Node) -> bool {
        false
    }
}

/// Counts visited nodes.
#[derive(Debug, Default)]
pub struct NodeCounter {
    visited: usize,
    post_order: bool,
}

impl NodeCounter {
    /// Creates a pre-order counter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            visited: 0,
            post_order: false,
        }
    }

    /// Creates a counter that visits children first.
    #[must_use]
    pub const fn post_order() -> Self {
        Self {
            visited: 0,
            post_order: true,
        }
    }

    /// Number of nodes visited.
    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }
}

impl Visitor for NodeCounter {
    fn visit(&mut self, node: Node) -> Result<Node> {
        self.visited += 1;
        Ok(node)
    }

    fn visit_children_first(&self, _: &Node) -> bool {
        self.post_order
    }
}

/// Looks for the first node matching a predicate and stops there.
///
/// An optional skip predicate keeps the search out of selected subtrees,
/// e.g. out of subqueries.
pub struct HasNodeVisitor<F, S = fn(&Node) -> bool> {
    matches: F,
    skip: Option<S>,
    found: Option<(NodeId, NodeType)>,
    visited: usize,
}

impl<F> HasNodeVisitor<F>
where
    F: Fn(&Node) -> bool,
{
    /// Creates a visitor that searches the whole tree.
    pub const fn new(matches: F) -> Self {
        Self {
            matches,
            skip: None,
            found: None,
            visited: 0,
        }
    }
}

impl HasNodeVisitor<fn(&Node) -> bool> {
    /// Searches for a node of the given type.
    #[must_use]
    pub fn of_type(node_type: NodeType) -> HasNodeVisitor<impl Fn(&Node) -> bool> {
        HasNodeVisitor::new(move |node: &Node| node.node_type() == node_type)
    }
}

impl<F, S> HasNodeVisitor<F, S>
where
    F: Fn(&Node) -> bool,
    S: Fn(&Node) -> bool,
{
    /// Leaves the children of nodes matching `skip` unsearched.
    pub fn skipping<T>(self, skip: T) -> HasNodeVisitor<F, T>
    where
        T: Fn(&Node) -> bool,
    {
        HasNodeVisitor {
            matches: self.matches,
            skip: Some(skip),
            found: self.found,
            visited: self.visited,
        }
    }

    /// Returns true once a matching node was seen.
    #[must_use]
    pub const fn has_node(&self) -> bool {
        self.found.is_some()
    }

    /// Id and type of the first matching node.
    #[must_use]
    pub const fn found(&self) -> Option<(NodeId, NodeType)> {
        self.found
    }

    /// Number of nodes visited, including the match.
    #[must_use]
    pub const fn visited(&self) -> usize {
        self.visited
    }
}

impl<F, S> Visitor for HasNodeVisitor<F, S>
where
    F: Fn(&Node) -> bool,
    S: Fn(&Node) -> bool,
{
    fn visit(&mut self, node: Node) -> Result<Node> {
        self.visited += 1;
        if self.found.is_none() && (self.matches)(&node) {
            self.found = Some((node.id(), node.node_type()));
        }
        Ok(node)
    }

    fn stop_traversal(&self) -> bool {
        self.found.is_some()
    }

    fn skip_children(&self, node: &Node) -> bool {
        self.skip.as_ref().is_some_and(|skip| skip(node))
    }
}

/// Collects id and type of every node matching a predicate, in visit order.
pub struct CollectNodes<F> {
    matches: F,
    post_order: bool,
    collected: Vec<(NodeId, NodeType)>,
}

impl<F> CollectNodes<F>
where
    F: Fn(&Node) -> bool,
{
    /// Collects in pre-order.
    pub const fn new(matches: F) -> Self {
        Self {
            matches,
            post_order: false,
            collected: Vec::new(),
        }
    }

    /// Switches to children-first order.
    #[must_use]
    pub fn children_first(mut self) -> Self {
        self.post_order = true;
        self
    }

    /// The matches, in visit order.
    #[must_use]
    pub fn collected(&self) -> &[(NodeId, NodeType)] {
        &self.collected
    }

    /// Types of the matches, in visit order.
    #[must_use]
    pub fn node_types(&self) -> Vec<NodeType> {
        self.collected.iter().map(|(_, ty)| *ty).collect()
    }
}

impl CollectNodes<fn(&Node) -> bool> {
    /// Collects every node.
    #[must_use]
    pub fn all() -> Self {
        Self::new(|_| true)
    }
}

impl<F> Visitor for CollectNodes<F>
where
    F: Fn(&Node) -> bool,
{
    fn visit(&mut self, node: Node) -> Result<Node> {
        if (self.matches)(&node) {
            self.collected.push((node.id(), node.node_type()));
        }
        Ok(node)
    }

    fn visit_children_first(&self, _: &Node) -> bool {
        self.post_order
    }
}

/// Replaces nodes through a closure.
///
/// Runs children-first by default, so the closure sees already rewritten
/// children.
pub struct Rewriter<F> {
    rewrite: F,
    post_order: bool,
}

impl<F> Rewriter<F>
where
    F: FnMut(Node) -> Result<Node>,
{
    /// Creates a children-first rewriter.
    pub const fn new(rewrite: F) -> Self {
        Self {
            rewrite,
            post_order: true,
        }
    }

    /// Creates a rewriter that sees each node before its children. A
    /// replacement returned by the closure is not traversed further.
    pub const fn top_down(rewrite: F) -> Self {
        Self {
            rewrite,
            post_order: false,
        }
    }
}

impl<F> Visitor for Rewriter<F>
where
    F: FnMut(Node) -> Result<Node>,
{
    fn visit(&mut self, node: Node) -> Result<Node> {
        (self.rewrite)(node)
    }

    fn visit_children_first(&self, _: &Node) -> bool {
        self.post_order
    }
}
