//! Lists, result columns, ordering/grouping entries and table names.

use core::fmt;

use super::args::{ArgReader, NodeArg};
use super::contract::{
    copy_all, copy_boxed, copy_opt, equivalent_all, equivalent_opt, from_tag, walk_all, walk_boxed,
    walk_opt, AcceptChildren, DeepCopy, Equivalence, NodeInit, TreeFields,
};
use super::print::TreePrinter;
use super::value::{GroupingKind, NullOrdering, SqlType};
use super::{Node, NodeKind, NodeType, Variant};
use crate::config::ParserConfig;
use crate::error::{Result, SqlError};
use crate::factory::NodeFactory;
use crate::lexer::Span;
use crate::visitor::Visitor;

/// An ordered list of sibling nodes.
///
/// One payload serves every list node type; the type decides which items
/// the list accepts. A `FromList` additionally rejects two items exposing
/// the same table name.
#[derive(Debug, Default)]
pub struct NodeList {
    items: Vec<Node>,
}

type ItemRule = (&'static str, fn(&Node) -> bool);

fn item_rule(node_type: NodeType) -> Option<ItemRule> {
    match node_type {
        NodeType::ResultColumnList => Some(("result column", |node: &Node| {
            matches!(node.variant(), Variant::ResultColumn | Variant::AllResultColumn)
        })),
        NodeType::FromList => Some(("table reference", |node: &Node| node.variant().is_from_item())),
        NodeType::ValueNodeList => Some(("value expression", |node: &Node| {
            node.variant().is_value() || node.node_type() == NodeType::ValueNodeList
        })),
        NodeType::OrderByList => Some(("ORDER BY column", |node: &Node| {
            node.node_type() == NodeType::OrderByColumn
        })),
        NodeType::GroupByList => Some(("GROUP BY column", |node: &Node| {
            node.node_type() == NodeType::GroupByColumn
        })),
        NodeType::TableElementList => Some(("column definition", |node: &Node| {
            node.node_type() == NodeType::ColumnDefinition
        })),
        NodeType::RowsList => Some(("row value list", |node: &Node| {
            node.node_type() == NodeType::ValueNodeList
        })),
        _ => None,
    }
}

/// Returns the name under which a FROM-list item is visible to the rest
/// of the query: the correlation name if present, else the table name.
/// Joins expose no single name.
#[must_use]
pub fn exposed_name(node: &Node) -> Option<String> {
    match node.kind() {
        NodeKind::FromBaseTable(table) => table
            .correlation_name
            .clone()
            .or_else(|| table.table_name().map(TableNameNode::full_name)),
        NodeKind::FromSubquery(subquery) => Some(subquery.correlation_name.clone()),
        _ => None,
    }
}

impl NodeList {
    /// Returns the number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the list has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the items in order.
    #[must_use]
    pub fn items(&self) -> &[Node] {
        &self.items
    }

    /// Returns the items for in-place edits.
    pub fn items_mut(&mut self) -> &mut Vec<Node> {
        &mut self.items
    }

    /// Iterates over the items.
    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.items.iter()
    }

    /// Consumes the list and returns its items.
    #[must_use]
    pub fn into_items(self) -> Vec<Node> {
        self.items
    }

    /// Appends a FROM-list item, rejecting a second item with the same
    /// exposed name.
    pub fn add_from_table(&mut self, table: Node) -> Result<()> {
        if let Some(name) = exposed_name(&table) {
            if self
                .items
                .iter()
                .filter_map(exposed_name)
                .any(|existing| existing == name)
            {
                return Err(SqlError::DuplicateTableName { name });
            }
        }
        self.items.push(table);
        Ok(())
    }
}

impl<'a> IntoIterator for &'a NodeList {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl NodeInit for NodeList {
    const ARITIES: &'static [usize] = &[0, 1];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let items = if args.arity() == 1 {
            args.nodes()?
        } else {
            Vec::new()
        };
        let (expected, accepts) = item_rule(node_type).ok_or(SqlError::NotImplemented {
            tag: node_type.tag(),
        })?;
        if let Some(bad) = items.iter().find(|item| !accepts(item)) {
            return Err(args.mismatch(0, expected, bad.node_type().name()));
        }
        if node_type != NodeType::FromList {
            return Ok(Self { items });
        }
        let mut list = Self::default();
        for item in items {
            list.add_from_table(item)?;
        }
        Ok(list)
    }
}

impl DeepCopy for NodeList {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            items: copy_all(&self.items, factory),
        }
    }
}

impl Equivalence for NodeList {
    fn is_equivalent(&self, other: &Self) -> bool {
        equivalent_all(&self.items, &other.items)
    }
}

impl AcceptChildren for NodeList {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.items = walk_all(self.items, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(&self.items);
    }
}

impl TreeFields for NodeList {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        self.items.iter().try_for_each(|item| printer.print(item))
    }
}

/// One SELECT-list entry, or one `column = value` of an UPDATE.
#[derive(Debug)]
pub struct ResultColumnNode {
    /// Alias, derived column name or generated name.
    pub name: Option<String>,
    /// True when `name` was generated rather than written or derived.
    pub name_generated: bool,
    /// The value expression.
    pub expression: Box<Node>,
}

impl NodeInit for ResultColumnNode {
    const ARITIES: &'static [usize] = &[2, 3];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let name = args.opt_text()?;
        let expression = Box::new(args.value()?);
        let name_generated = if args.arity() == 3 { args.bool()? } else { false };
        if let (Some(name), false) = (&name, name_generated) {
            config.check_identifier(name)?;
        }
        Ok(Self {
            name,
            name_generated,
            expression,
        })
    }
}

impl DeepCopy for ResultColumnNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            name: self.name.clone(),
            name_generated: self.name_generated,
            expression: copy_boxed(&self.expression, factory),
        }
    }
}

impl Equivalence for ResultColumnNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.name == other.name && self.expression.is_equivalent(&other.expression)
    }
}

impl AcceptChildren for ResultColumnNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.expression = walk_boxed(self.expression, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.expression);
    }
}

impl TreeFields for ResultColumnNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.opt_field("name", self.name.as_deref())?;
        if self.name_generated {
            printer.field("nameGenerated", true)?;
        }
        printer.child("expression", &self.expression)
    }
}

/// `*` or `table.*` in a SELECT list.
#[derive(Debug)]
pub struct AllResultColumnNode {
    /// Qualifying `TableName`, for `table.*`.
    pub table_name: Option<Box<Node>>,
}

impl NodeInit for AllResultColumnNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            table_name: args.opt_node_of(NodeType::TableName)?.map(Box::new),
        })
    }
}

impl DeepCopy for AllResultColumnNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            table_name: copy_opt(self.table_name.as_deref(), factory),
        }
    }
}

impl Equivalence for AllResultColumnNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        equivalent_opt(self.table_name.as_deref(), other.table_name.as_deref())
    }
}

impl AcceptChildren for AllResultColumnNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.table_name = walk_opt(self.table_name, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.table_name.as_deref());
    }
}

impl TreeFields for AllResultColumnNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.opt_child("tableName", self.table_name.as_deref())
    }
}

/// One ORDER BY entry.
#[derive(Debug)]
pub struct OrderByColumnNode {
    /// The sort key.
    pub expression: Box<Node>,
    /// False for `DESC`.
    pub ascending: bool,
    /// Explicit `NULLS FIRST` / `NULLS LAST`.
    pub null_ordering: Option<NullOrdering>,
}

impl NodeInit for OrderByColumnNode {
    const ARITIES: &'static [usize] = &[1, 2, 3];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let expression = Box::new(args.value()?);
        let ascending = if args.arity() >= 2 { args.bool()? } else { true };
        let null_ordering = if args.arity() == 3 {
            args.opt_bool()?.map(|nulls_first| {
                if nulls_first {
                    NullOrdering::First
                } else {
                    NullOrdering::Last
                }
            })
        } else {
            None
        };
        Ok(Self {
            expression,
            ascending,
            null_ordering,
        })
    }
}

impl DeepCopy for OrderByColumnNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            expression: copy_boxed(&self.expression, factory),
            ascending: self.ascending,
            null_ordering: self.null_ordering,
        }
    }
}

impl Equivalence for OrderByColumnNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.ascending == other.ascending
            && self.null_ordering == other.null_ordering
            && self.expression.is_equivalent(&other.expression)
    }
}

impl AcceptChildren for OrderByColumnNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.expression = walk_boxed(self.expression, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.expression);
    }
}

impl TreeFields for OrderByColumnNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("ascending", self.ascending)?;
        printer.opt_field("nullOrdering", self.null_ordering.map(NullOrdering::as_str))?;
        printer.child("expression", &self.expression)
    }
}

/// One GROUP BY entry.
#[derive(Debug)]
pub struct GroupByColumnNode {
    /// A value expression or a grouping construct.
    pub expression: Box<Node>,
}

impl NodeInit for GroupByColumnNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let (position, arg) = args.next_arg();
        match arg {
            NodeArg::Node(node)
                if node.variant().is_value() || node.variant() == Variant::GroupingConstruct =>
            {
                Ok(Self {
                    expression: Box::new(node),
                })
            }
            arg => Err(args.mismatch(position, "grouping expression", arg.shape())),
        }
    }
}

impl DeepCopy for GroupByColumnNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            expression: copy_boxed(&self.expression, factory),
        }
    }
}

impl Equivalence for GroupByColumnNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.expression.is_equivalent(&other.expression)
    }
}

impl AcceptChildren for GroupByColumnNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.expression = walk_boxed(self.expression, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.expression);
    }
}

impl TreeFields for GroupByColumnNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.child("columnExpression", &self.expression)
    }
}

/// `ROLLUP (...)`, `CUBE (...)` or `GROUPING SETS (...)`.
///
/// Items are value expressions; a nested `ValueNodeList` stands for a
/// parenthesized set.
#[derive(Debug)]
pub struct GroupingConstructNode {
    /// Which construct.
    pub kind: GroupingKind,
    /// `ValueNodeList` of grouping items.
    pub items: Box<Node>,
}

impl NodeInit for GroupingConstructNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            kind: from_tag(node_type, GroupingKind::from_node_type)?,
            items: Box::new(args.node_of(NodeType::ValueNodeList)?),
        })
    }
}

impl DeepCopy for GroupingConstructNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            kind: self.kind,
            items: copy_boxed(&self.items, factory),
        }
    }
}

impl Equivalence for GroupingConstructNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind && self.items.is_equivalent(&other.items)
    }
}

impl AcceptChildren for GroupingConstructNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.items = walk_boxed(self.items, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.items);
    }
}

impl TreeFields for GroupingConstructNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("kind", self.kind)?;
        printer.child("items", &self.items)
    }
}

/// A column in CREATE TABLE.
#[derive(Debug)]
pub struct ColumnDefinitionNode {
    /// Column name.
    pub name: String,
    /// Declared type.
    pub data_type: SqlType,
    /// `NOT NULL`.
    pub not_null: bool,
    /// `DEFAULT` expression.
    pub default: Option<Box<Node>>,
}

impl NodeInit for ColumnDefinitionNode {
    const ARITIES: &'static [usize] = &[2, 4];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let name = args.text()?;
        config.check_identifier(&name)?;
        let data_type = args.sql_type()?;
        let (not_null, default) = if args.arity() == 4 {
            (args.bool()?, args.opt_value()?.map(Box::new))
        } else {
            (false, None)
        };
        Ok(Self {
            name,
            data_type,
            not_null,
            default,
        })
    }
}

impl DeepCopy for ColumnDefinitionNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            name: self.name.clone(),
            data_type: self.data_type.clone(),
            not_null: self.not_null,
            default: copy_opt(self.default.as_deref(), factory),
        }
    }
}

impl Equivalence for ColumnDefinitionNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.name == other.name
            && self.data_type == other.data_type
            && self.not_null == other.not_null
            && equivalent_opt(self.default.as_deref(), other.default.as_deref())
    }
}

impl AcceptChildren for ColumnDefinitionNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.default = walk_opt(self.default, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.default.as_deref());
    }
}

impl TreeFields for ColumnDefinitionNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("name", &self.name)?;
        printer.field("type", &self.data_type)?;
        printer.field("notNull", self.not_null)?;
        printer.opt_child("defaultValue", self.default.as_deref())
    }
}

/// A possibly schema-qualified table name.
#[derive(Debug)]
pub struct TableNameNode {
    /// Schema qualifier.
    pub schema: Option<String>,
    /// Table name.
    pub table: String,
    /// Source position.
    pub span: Option<Span>,
}

impl TableNameNode {
    /// Returns `schema.table` or `table`.
    #[must_use]
    pub fn full_name(&self) -> String {
        self.schema.as_ref().map_or_else(
            || self.table.clone(),
            |schema| format!("{schema}.{}", self.table),
        )
    }

    /// Returns true if both names are spelled the same.
    #[must_use]
    pub fn same_name(&self, other: &Self) -> bool {
        self.schema == other.schema && self.table == other.table
    }
}

impl NodeInit for TableNameNode {
    const ARITIES: &'static [usize] = &[1, 2, 4];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let schema = if args.arity() >= 2 {
            args.opt_text()?
        } else {
            None
        };
        let table = args.text()?;
        if let Some(schema) = &schema {
            config.check_identifier(schema)?;
        }
        config.check_identifier(&table)?;
        let span = if args.arity() == 4 {
            let start = args.offset()?;
            let end = args.offset()?;
            Some(Span::new(start, end))
        } else {
            None
        };
        Ok(Self {
            schema,
            table,
            span,
        })
    }
}

impl DeepCopy for TableNameNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self {
            schema: self.schema.clone(),
            table: self.table.clone(),
            span: self.span,
        }
    }
}

impl Equivalence for TableNameNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.same_name(other)
    }
}

impl AcceptChildren for TableNameNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for TableNameNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.opt_field("schemaName", self.schema.as_deref())?;
        printer.field("tableName", &self.table)
    }
}

impl fmt::Display for TableNameNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}
