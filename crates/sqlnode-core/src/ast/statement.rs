//! Statement and query-expression payloads.

use core::fmt;

use super::args::ArgReader;
use super::contract::{
    copy_boxed, copy_opt, equivalent_opt, from_tag, walk_boxed, walk_opt, AcceptChildren, DeepCopy,
    Equivalence, NodeInit, TreeFields,
};
use super::print::TreePrinter;
use super::value::SetOperator;
use super::{Node, NodeKind, NodeType};
use crate::config::ParserConfig;
use crate::error::Result;
use crate::factory::NodeFactory;
use crate::visitor::Visitor;

/// Root of a query statement.
#[derive(Debug)]
pub struct CursorNode {
    /// The query expression.
    pub result_set: Box<Node>,
    /// `OrderByList`.
    pub order_by: Option<Box<Node>>,
    /// `OFFSET` expression.
    pub offset: Option<Box<Node>>,
    /// `LIMIT` expression.
    pub fetch_first: Option<Box<Node>>,
}

impl NodeInit for CursorNode {
    const ARITIES: &'static [usize] = &[1, 4];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let result_set = Box::new(args.result_set()?);
        if args.arity() == 1 {
            return Ok(Self {
                result_set,
                order_by: None,
                offset: None,
                fetch_first: None,
            });
        }
        Ok(Self {
            result_set,
            order_by: args.opt_node_of(NodeType::OrderByList)?.map(Box::new),
            offset: args.opt_value()?.map(Box::new),
            fetch_first: args.opt_value()?.map(Box::new),
        })
    }
}

impl DeepCopy for CursorNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            result_set: copy_boxed(&self.result_set, factory),
            order_by: copy_opt(self.order_by.as_deref(), factory),
            offset: copy_opt(self.offset.as_deref(), factory),
            fetch_first: copy_opt(self.fetch_first.as_deref(), factory),
        }
    }
}

impl Equivalence for CursorNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.result_set.is_equivalent(&other.result_set)
            && equivalent_opt(self.order_by.as_deref(), other.order_by.as_deref())
            && equivalent_opt(self.offset.as_deref(), other.offset.as_deref())
            && equivalent_opt(self.fetch_first.as_deref(), other.fetch_first.as_deref())
    }
}

impl AcceptChildren for CursorNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.result_set = walk_boxed(self.result_set, visitor)?;
        self.order_by = walk_opt(self.order_by, visitor)?;
        self.offset = walk_opt(self.offset, visitor)?;
        self.fetch_first = walk_opt(self.fetch_first, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.result_set);
        out.extend(self.order_by.as_deref());
        out.extend(self.offset.as_deref());
        out.extend(self.fetch_first.as_deref());
    }
}

impl TreeFields for CursorNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "SELECT")?;
        printer.child("resultSet", &self.result_set)?;
        printer.opt_child("orderByList", self.order_by.as_deref())?;
        printer.opt_child("offset", self.offset.as_deref())?;
        printer.opt_child("fetchFirst", self.fetch_first.as_deref())
    }
}

/// One SELECT query block.
#[derive(Debug)]
pub struct SelectNode {
    /// `SELECT DISTINCT`.
    pub distinct: bool,
    /// `ResultColumnList`.
    pub result_columns: Box<Node>,
    /// `FromList`, empty for `SELECT 1`.
    pub from_list: Box<Node>,
    /// `WHERE` predicate.
    pub where_clause: Option<Box<Node>>,
    /// `GroupByList`.
    pub group_by: Option<Box<Node>>,
    /// `HAVING` predicate.
    pub having: Option<Box<Node>>,
}

impl NodeInit for SelectNode {
    const ARITIES: &'static [usize] = &[6];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            result_columns: Box::new(args.node_of(NodeType::ResultColumnList)?),
            from_list: Box::new(args.node_of(NodeType::FromList)?),
            where_clause: args.opt_value()?.map(Box::new),
            group_by: args.opt_node_of(NodeType::GroupByList)?.map(Box::new),
            having: args.opt_value()?.map(Box::new),
            distinct: args.bool()?,
        })
    }
}

impl DeepCopy for SelectNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            distinct: self.distinct,
            result_columns: copy_boxed(&self.result_columns, factory),
            from_list: copy_boxed(&self.from_list, factory),
            where_clause: copy_opt(self.where_clause.as_deref(), factory),
            group_by: copy_opt(self.group_by.as_deref(), factory),
            having: copy_opt(self.having.as_deref(), factory),
        }
    }
}

impl Equivalence for SelectNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.distinct == other.distinct
            && self.result_columns.is_equivalent(&other.result_columns)
            && self.from_list.is_equivalent(&other.from_list)
            && equivalent_opt(self.where_clause.as_deref(), other.where_clause.as_deref())
            && equivalent_opt(self.group_by.as_deref(), other.group_by.as_deref())
            && equivalent_opt(self.having.as_deref(), other.having.as_deref())
    }
}

impl AcceptChildren for SelectNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.result_columns = walk_boxed(self.result_columns, visitor)?;
        self.from_list = walk_boxed(self.from_list, visitor)?;
        self.where_clause = walk_opt(self.where_clause, visitor)?;
        self.group_by = walk_opt(self.group_by, visitor)?;
        self.having = walk_opt(self.having, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.result_columns);
        out.push(&self.from_list);
        out.extend(self.where_clause.as_deref());
        out.extend(self.group_by.as_deref());
        out.extend(self.having.as_deref());
    }
}

impl TreeFields for SelectNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("isDistinct", self.distinct)?;
        printer.child("resultColumns", &self.result_columns)?;
        printer.child("fromList", &self.from_list)?;
        printer.opt_child("whereClause", self.where_clause.as_deref())?;
        printer.opt_child("groupByList", self.group_by.as_deref())?;
        printer.opt_child("havingClause", self.having.as_deref())
    }
}

/// `left UNION|INTERSECT|EXCEPT [ALL] right`.
#[derive(Debug)]
pub struct SetOperationNode {
    /// The operation, fixed by the node type.
    pub operator: SetOperator,
    /// `ALL` (keep duplicates).
    pub all: bool,
    /// Left query expression.
    pub left: Box<Node>,
    /// Right query expression.
    pub right: Box<Node>,
}

impl NodeInit for SetOperationNode {
    const ARITIES: &'static [usize] = &[3];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            operator: from_tag(node_type, SetOperator::from_node_type)?,
            left: Box::new(args.result_set()?),
            right: Box::new(args.result_set()?),
            all: args.bool()?,
        })
    }
}

impl DeepCopy for SetOperationNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            operator: self.operator,
            all: self.all,
            left: copy_boxed(&self.left, factory),
            right: copy_boxed(&self.right, factory),
        }
    }
}

impl Equivalence for SetOperationNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.operator == other.operator
            && self.all == other.all
            && self.left.is_equivalent(&other.left)
            && self.right.is_equivalent(&other.right)
    }
}

impl AcceptChildren for SetOperationNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.left = walk_boxed(self.left, visitor)?;
        self.right = walk_boxed(self.right, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.left);
        out.push(&self.right);
    }
}

impl TreeFields for SetOperationNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("operator", self.operator)?;
        printer.field("all", self.all)?;
        printer.child("leftResultSet", &self.left)?;
        printer.child("rightResultSet", &self.right)
    }
}

/// `VALUES (...), (...)`.
#[derive(Debug)]
pub struct RowsResultSetNode {
    /// `RowsList` of `ValueNodeList` rows.
    pub rows: Box<Node>,
}

impl NodeInit for RowsResultSetNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            rows: Box::new(args.node_of(NodeType::RowsList)?),
        })
    }
}

impl DeepCopy for RowsResultSetNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            rows: copy_boxed(&self.rows, factory),
        }
    }
}

impl Equivalence for RowsResultSetNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.rows.is_equivalent(&other.rows)
    }
}

impl AcceptChildren for RowsResultSetNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.rows = walk_boxed(self.rows, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.rows);
    }
}

impl TreeFields for RowsResultSetNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.child("rows", &self.rows)
    }
}

/// `INSERT INTO table [(columns)] source`.
#[derive(Debug)]
pub struct InsertNode {
    /// Target `TableName`.
    pub target: Box<Node>,
    /// `ValueNodeList` of column references.
    pub columns: Option<Box<Node>>,
    /// The inserted rows: VALUES or a query.
    pub source: Box<Node>,
}

impl NodeInit for InsertNode {
    const ARITIES: &'static [usize] = &[3];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let target = Box::new(args.node_of(NodeType::TableName)?);
        let columns = args.opt_node_of(NodeType::ValueNodeList)?;
        if let Some(NodeKind::NodeList(list)) = columns.as_ref().map(Node::kind) {
            if let Some(bad) = list
                .iter()
                .find(|column| column.node_type() != NodeType::ColumnReference)
            {
                return Err(args.mismatch(1, "list of column references", bad.node_type().name()));
            }
        }
        Ok(Self {
            target,
            columns: columns.map(Box::new),
            source: Box::new(args.result_set()?),
        })
    }
}

impl DeepCopy for InsertNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            target: copy_boxed(&self.target, factory),
            columns: copy_opt(self.columns.as_deref(), factory),
            source: copy_boxed(&self.source, factory),
        }
    }
}

impl Equivalence for InsertNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.target.is_equivalent(&other.target)
            && equivalent_opt(self.columns.as_deref(), other.columns.as_deref())
            && self.source.is_equivalent(&other.source)
    }
}

impl AcceptChildren for InsertNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.target = walk_boxed(self.target, visitor)?;
        self.columns = walk_opt(self.columns, visitor)?;
        self.source = walk_boxed(self.source, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.target);
        out.extend(self.columns.as_deref());
        out.push(&self.source);
    }
}

impl TreeFields for InsertNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "INSERT")?;
        printer.child("targetTableName", &self.target)?;
        printer.opt_child("targetColumnList", self.columns.as_deref())?;
        printer.child("resultSet", &self.source)
    }
}

/// `UPDATE table SET ... [WHERE ...]`.
#[derive(Debug)]
pub struct UpdateNode {
    /// Target `FromBaseTable`.
    pub target: Box<Node>,
    /// `ResultColumnList` of `column = value` assignments.
    pub set_clause: Box<Node>,
    /// `WHERE` predicate.
    pub where_clause: Option<Box<Node>>,
}

impl NodeInit for UpdateNode {
    const ARITIES: &'static [usize] = &[2, 3];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let target = Box::new(args.node_of(NodeType::FromBaseTable)?);
        let set_clause = Box::new(args.node_of(NodeType::ResultColumnList)?);
        let where_clause = if args.arity() == 3 {
            args.opt_value()?.map(Box::new)
        } else {
            None
        };
        Ok(Self {
            target,
            set_clause,
            where_clause,
        })
    }
}

impl DeepCopy for UpdateNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            target: copy_boxed(&self.target, factory),
            set_clause: copy_boxed(&self.set_clause, factory),
            where_clause: copy_opt(self.where_clause.as_deref(), factory),
        }
    }
}

impl Equivalence for UpdateNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.target.is_equivalent(&other.target)
            && self.set_clause.is_equivalent(&other.set_clause)
            && equivalent_opt(self.where_clause.as_deref(), other.where_clause.as_deref())
    }
}

impl AcceptChildren for UpdateNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.target = walk_boxed(self.target, visitor)?;
        self.set_clause = walk_boxed(self.set_clause, visitor)?;
        self.where_clause = walk_opt(self.where_clause, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.target);
        out.push(&self.set_clause);
        out.extend(self.where_clause.as_deref());
    }
}

impl TreeFields for UpdateNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "UPDATE")?;
        printer.child("targetTable", &self.target)?;
        printer.child("setClause", &self.set_clause)?;
        printer.opt_child("whereClause", self.where_clause.as_deref())
    }
}

/// `DELETE FROM table [WHERE ...]`.
#[derive(Debug)]
pub struct DeleteNode {
    /// Target `FromBaseTable`.
    pub target: Box<Node>,
    /// `WHERE` predicate.
    pub where_clause: Option<Box<Node>>,
}

impl NodeInit for DeleteNode {
    const ARITIES: &'static [usize] = &[1, 2];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let target = Box::new(args.node_of(NodeType::FromBaseTable)?);
        let where_clause = if args.arity() == 2 {
            args.opt_value()?.map(Box::new)
        } else {
            None
        };
        Ok(Self {
            target,
            where_clause,
        })
    }
}

impl DeepCopy for DeleteNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            target: copy_boxed(&self.target, factory),
            where_clause: copy_opt(self.where_clause.as_deref(), factory),
        }
    }
}

impl Equivalence for DeleteNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.target.is_equivalent(&other.target)
            && equivalent_opt(self.where_clause.as_deref(), other.where_clause.as_deref())
    }
}

impl AcceptChildren for DeleteNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.target = walk_boxed(self.target, visitor)?;
        self.where_clause = walk_opt(self.where_clause, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.target);
        out.extend(self.where_clause.as_deref());
    }
}

impl TreeFields for DeleteNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "DELETE")?;
        printer.child("targetTable", &self.target)?;
        printer.opt_child("whereClause", self.where_clause.as_deref())
    }
}

/// `CALL proc(args)` or `? = CALL proc(args)`.
#[derive(Debug)]
pub struct CallStatementNode {
    /// The invoked `FunctionCall`.
    pub procedure: Box<Node>,
    /// The `?` receiving the return value.
    pub return_parameter: Option<Box<Node>>,
}

impl NodeInit for CallStatementNode {
    const ARITIES: &'static [usize] = &[1, 2];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let procedure = Box::new(args.node_of(NodeType::FunctionCall)?);
        let return_parameter = if args.arity() == 2 {
            args.opt_node_of(NodeType::Parameter)?.map(Box::new)
        } else {
            None
        };
        Ok(Self {
            procedure,
            return_parameter,
        })
    }
}

impl DeepCopy for CallStatementNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            procedure: copy_boxed(&self.procedure, factory),
            return_parameter: copy_opt(self.return_parameter.as_deref(), factory),
        }
    }
}

impl Equivalence for CallStatementNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.procedure.is_equivalent(&other.procedure)
            && equivalent_opt(
                self.return_parameter.as_deref(),
                other.return_parameter.as_deref(),
            )
    }
}

impl AcceptChildren for CallStatementNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.return_parameter = walk_opt(self.return_parameter, visitor)?;
        self.procedure = walk_boxed(self.procedure, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.return_parameter.as_deref());
        out.push(&self.procedure);
    }
}

impl TreeFields for CallStatementNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "CALL")?;
        printer.opt_child("returnParameter", self.return_parameter.as_deref())?;
        printer.child("methodCall", &self.procedure)
    }
}

/// `CREATE TABLE [IF NOT EXISTS] name (elements)`.
#[derive(Debug)]
pub struct CreateTableNode {
    /// `TableName`.
    pub table_name: Box<Node>,
    /// `TableElementList` of column definitions.
    pub elements: Box<Node>,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
}

impl NodeInit for CreateTableNode {
    const ARITIES: &'static [usize] = &[2, 3];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let table_name = Box::new(args.node_of(NodeType::TableName)?);
        let elements = Box::new(args.node_of(NodeType::TableElementList)?);
        let if_not_exists = if args.arity() == 3 { args.bool()? } else { false };
        Ok(Self {
            table_name,
            elements,
            if_not_exists,
        })
    }
}

impl DeepCopy for CreateTableNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            table_name: copy_boxed(&self.table_name, factory),
            elements: copy_boxed(&self.elements, factory),
            if_not_exists: self.if_not_exists,
        }
    }
}

impl Equivalence for CreateTableNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.if_not_exists == other.if_not_exists
            && self.table_name.is_equivalent(&other.table_name)
            && self.elements.is_equivalent(&other.elements)
    }
}

impl AcceptChildren for CreateTableNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.table_name = walk_boxed(self.table_name, visitor)?;
        self.elements = walk_boxed(self.elements, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.table_name);
        out.push(&self.elements);
    }
}

impl TreeFields for CreateTableNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "CREATE TABLE")?;
        printer.field("ifNotExists", self.if_not_exists)?;
        printer.child("objectName", &self.table_name)?;
        printer.child("tableElementList", &self.elements)
    }
}

/// `DROP TABLE [IF EXISTS] name`.
#[derive(Debug)]
pub struct DropTableNode {
    /// `TableName`.
    pub table_name: Box<Node>,
    /// `IF EXISTS`.
    pub if_exists: bool,
}

impl NodeInit for DropTableNode {
    const ARITIES: &'static [usize] = &[1, 2];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let table_name = Box::new(args.node_of(NodeType::TableName)?);
        let if_exists = if args.arity() == 2 { args.bool()? } else { false };
        Ok(Self {
            table_name,
            if_exists,
        })
    }
}

impl DeepCopy for DropTableNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            table_name: copy_boxed(&self.table_name, factory),
            if_exists: self.if_exists,
        }
    }
}

impl Equivalence for DropTableNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.if_exists == other.if_exists && self.table_name.is_equivalent(&other.table_name)
    }
}

impl AcceptChildren for DropTableNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.table_name = walk_boxed(self.table_name, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.table_name);
    }
}

impl TreeFields for DropTableNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("statementType", "DROP TABLE")?;
        printer.field("ifExists", self.if_exists)?;
        printer.child("objectName", &self.table_name)
    }
}
