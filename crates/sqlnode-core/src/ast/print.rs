//! Indented diagnostic tree output.

use core::fmt::{self, Write};
use std::collections::HashSet;

use super::{Node, NodeId};

/// Writes a node tree, one line per node and per field.
///
/// With a printed-node set attached, a node that was already written in the
/// same session is shown as a one-line back reference.
pub struct TreePrinter<'a> {
    out: &'a mut dyn Write,
    depth: usize,
    printed: Option<&'a mut HashSet<NodeId>>,
}

impl<'a> TreePrinter<'a> {
    /// Creates a printer without deduplication.
    pub fn new(out: &'a mut dyn Write) -> Self {
        Self {
            out,
            depth: 0,
            printed: None,
        }
    }

    /// Creates a printer that records every node it writes in `printed`.
    pub fn with_printed(out: &'a mut dyn Write, printed: &'a mut HashSet<NodeId>) -> Self {
        Self {
            out,
            depth: 0,
            printed: Some(printed),
        }
    }

    fn indent(&mut self) -> fmt::Result {
        for _ in 0..self.depth {
            self.out.write_str("  ")?;
        }
        Ok(())
    }

    /// Writes `node` and everything below it.
    pub fn print(&mut self, node: &Node) -> fmt::Result {
        self.indent()?;
        write!(self.out, "{} {}", node.node_type(), node.id())?;
        if let Some(span) = node.span() {
            write!(self.out, " @{span}")?;
        }
        if let Some(printed) = self.printed.as_deref_mut() {
            if !printed.insert(node.id()) {
                return writeln!(self.out, " (printed above)");
            }
        }
        writeln!(self.out)?;
        self.depth += 1;
        let result = node.kind().print_fields(self);
        self.depth -= 1;
        result
    }

    /// Writes a scalar field.
    pub fn field(&mut self, label: &str, value: impl fmt::Display) -> fmt::Result {
        self.indent()?;
        writeln!(self.out, "{label}: {value}")
    }

    /// Writes an optional scalar field; absent values are skipped.
    pub fn opt_field(&mut self, label: &str, value: Option<impl fmt::Display>) -> fmt::Result {
        value.map_or(Ok(()), |value| self.field(label, value))
    }

    /// Writes a child slot.
    pub fn child(&mut self, label: &str, node: &Node) -> fmt::Result {
        self.indent()?;
        writeln!(self.out, "{label}:")?;
        self.depth += 1;
        let result = self.print(node);
        self.depth -= 1;
        result
    }

    /// Writes an optional child slot; absent children are skipped.
    pub fn opt_child(&mut self, label: &str, node: Option<&Node>) -> fmt::Result {
        node.map_or(Ok(()), |node| self.child(label, node))
    }

    /// Writes a list of children under one label.
    pub fn children(&mut self, label: &str, nodes: &[Node]) -> fmt::Result {
        if nodes.is_empty() {
            return self.field(label, "[]");
        }
        self.indent()?;
        writeln!(self.out, "{label}:")?;
        self.depth += 1;
        let result = nodes.iter().try_for_each(|node| self.print(node));
        self.depth -= 1;
        result
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TreePrinter::new(f).print(self)
    }
}
