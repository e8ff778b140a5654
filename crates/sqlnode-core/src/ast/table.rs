//! FROM-list items: base tables, derived tables and joins.

use core::fmt;

use super::args::ArgReader;
use super::clause::TableNameNode;
use super::contract::{
    copy_boxed, copy_opt, equivalent_opt, from_tag, walk_boxed, walk_opt, AcceptChildren, DeepCopy,
    Equivalence, NodeInit, TreeFields,
};
use super::print::TreePrinter;
use super::value::JoinType;
use super::{Node, NodeKind, NodeType};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::factory::NodeFactory;
use crate::visitor::Visitor;

/// A named table, optionally with a correlation name.
#[derive(Debug)]
pub struct FromBaseTableNode {
    /// The `TableName` node.
    pub table: Box<Node>,
    /// `AS alias`.
    pub correlation_name: Option<String>,
}

impl FromBaseTableNode {
    /// Returns the table name payload.
    #[must_use]
    pub fn table_name(&self) -> Option<&TableNameNode> {
        match self.table.kind() {
            NodeKind::TableName(table) => Some(table),
            _ => None,
        }
    }
}

impl NodeInit for FromBaseTableNode {
    const ARITIES: &'static [usize] = &[1, 2];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let table = Box::new(args.node_of(NodeType::TableName)?);
        let correlation_name = if args.arity() == 2 {
            args.opt_text()?
        } else {
            None
        };
        if let Some(name) = &correlation_name {
            config.check_identifier(name)?;
        }
        Ok(Self {
            table,
            correlation_name,
        })
    }
}

impl DeepCopy for FromBaseTableNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            table: copy_boxed(&self.table, factory),
            correlation_name: self.correlation_name.clone(),
        }
    }
}

impl Equivalence for FromBaseTableNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.correlation_name == other.correlation_name && self.table.is_equivalent(&other.table)
    }
}

impl AcceptChildren for FromBaseTableNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.table = walk_boxed(self.table, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.table);
    }
}

impl TreeFields for FromBaseTableNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.opt_field("correlationName", self.correlation_name.as_deref())?;
        printer.child("tableName", &self.table)
    }
}

/// A derived table: `(query) AS name`.
#[derive(Debug)]
pub struct FromSubqueryNode {
    /// The query.
    pub subquery: Box<Node>,
    /// Required correlation name.
    pub correlation_name: String,
}

impl NodeInit for FromSubqueryNode {
    const ARITIES: &'static [usize] = &[2];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let subquery = Box::new(args.result_set()?);
        let correlation_name = args.text()?;
        config.check_identifier(&correlation_name)?;
        Ok(Self {
            subquery,
            correlation_name,
        })
    }
}

impl DeepCopy for FromSubqueryNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            subquery: copy_boxed(&self.subquery, factory),
            correlation_name: self.correlation_name.clone(),
        }
    }
}

impl Equivalence for FromSubqueryNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.correlation_name == other.correlation_name
            && self.subquery.is_equivalent(&other.subquery)
    }
}

impl AcceptChildren for FromSubqueryNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.subquery = walk_boxed(self.subquery, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.subquery);
    }
}

impl TreeFields for FromSubqueryNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("correlationName", &self.correlation_name)?;
        printer.child("subquery", &self.subquery)
    }
}

/// Two table references joined together.
#[derive(Debug)]
pub struct JoinNode {
    /// Join type, fixed by the node type.
    pub join_type: JoinType,
    /// Left input.
    pub left: Box<Node>,
    /// Right input.
    pub right: Box<Node>,
    /// `ON` condition.
    pub on: Option<Box<Node>>,
    /// `USING` columns, as a `ValueNodeList` of column references.
    pub using: Option<Box<Node>>,
}

impl NodeInit for JoinNode {
    const ARITIES: &'static [usize] = &[2, 4];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let join_type = from_tag(node_type, JoinType::from_node_type)?;
        let left = Box::new(args.from_item()?);
        let right = Box::new(args.from_item()?);
        let (on, using) = if args.arity() == 4 {
            let on = args.opt_value()?;
            let using = args.opt_node_of(NodeType::ValueNodeList)?;
            if on.is_some() && using.is_some() {
                return Err(args.mismatch(3, "no USING list next to ON", "ValueNodeList"));
            }
            (on.map(Box::new), using.map(Box::new))
        } else {
            (None, None)
        };
        if join_type == JoinType::Cross && (on.is_some() || using.is_some()) {
            return Err(args.mismatch(2, "no join condition on CROSS JOIN", "join condition"));
        }
        Ok(Self {
            join_type,
            left,
            right,
            on,
            using,
        })
    }
}

impl DeepCopy for JoinNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            join_type: self.join_type,
            left: copy_boxed(&self.left, factory),
            right: copy_boxed(&self.right, factory),
            on: copy_opt(self.on.as_deref(), factory),
            using: copy_opt(self.using.as_deref(), factory),
        }
    }
}

impl Equivalence for JoinNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.join_type == other.join_type
            && self.left.is_equivalent(&other.left)
            && self.right.is_equivalent(&other.right)
            && equivalent_opt(self.on.as_deref(), other.on.as_deref())
            && equivalent_opt(self.using.as_deref(), other.using.as_deref())
    }
}

impl AcceptChildren for JoinNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.left = walk_boxed(self.left, visitor)?;
        self.right = walk_boxed(self.right, visitor)?;
        self.on = walk_opt(self.on, visitor)?;
        self.using = walk_opt(self.using, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.left);
        out.push(&self.right);
        out.extend(self.on.as_deref());
        out.extend(self.using.as_deref());
    }
}

impl TreeFields for JoinNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("joinType", self.join_type)?;
        printer.child("leftResultSet", &self.left)?;
        printer.child("rightResultSet", &self.right)?;
        printer.opt_child("joinClause", self.on.as_deref())?;
        printer.opt_child("usingClause", self.using.as_deref())
    }
}
