//! Value expression payloads.

use core::fmt;

use super::args::{ArgReader, NodeArg};
use super::clause::TableNameNode;
use super::contract::{
    copy_boxed, copy_opt, equivalent_opt, from_tag, walk_boxed, walk_opt, AcceptChildren, DeepCopy,
    Equivalence, NodeInit, TreeFields,
};
use super::print::TreePrinter;
use super::value::{
    ArithmeticOperator, ComparisonOperator, LogicalOperator, NumericValue, SqlType, SubqueryKind,
    UnaryOperator,
};
use super::{Node, NodeKind, NodeType};
use crate::config::ParserConfig;
use crate::error::{Result, SqlError};
use crate::factory::NodeFactory;
use crate::lexer::Span;
use crate::visitor::Visitor;

/// A reference to a column, optionally qualified by a table name.
#[derive(Debug)]
pub struct ColumnReferenceNode {
    /// Column name.
    pub column_name: String,
    /// Qualifying `TableName` node, if written.
    pub table_name: Option<Box<Node>>,
    /// Number of the FROM-list table the column belongs to, once bound.
    pub table_number: Option<u32>,
    /// Source position of the reference.
    pub span: Option<Span>,
}

impl ColumnReferenceNode {
    /// Returns the qualifier, if any.
    #[must_use]
    pub fn qualifier(&self) -> Option<&TableNameNode> {
        match self.table_name.as_deref().map(Node::kind) {
            Some(NodeKind::TableName(table)) => Some(table),
            _ => None,
        }
    }

    /// Records the FROM-list table the column resolves to.
    pub fn bind(&mut self, table_number: u32) {
        self.table_number = Some(table_number);
    }
}

impl NodeInit for ColumnReferenceNode {
    const ARITIES: &'static [usize] = &[2, 4];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let column_name = args.text()?;
        config.check_identifier(&column_name)?;
        let table_name = args.opt_node_of(NodeType::TableName)?.map(Box::new);
        let span = if args.arity() == 4 {
            let start = args.offset()?;
            let end = args.offset()?;
            Some(Span::new(start, end))
        } else {
            None
        };
        Ok(Self {
            column_name,
            table_name,
            table_number: None,
            span,
        })
    }
}

impl DeepCopy for ColumnReferenceNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            column_name: self.column_name.clone(),
            table_name: copy_opt(self.table_name.as_deref(), factory),
            table_number: self.table_number,
            span: self.span,
        }
    }
}

impl Equivalence for ColumnReferenceNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        if self.column_name != other.column_name {
            return false;
        }
        match (self.table_number, other.table_number) {
            (Some(left), Some(right)) => left == right,
            (None, None) => match (self.qualifier(), other.qualifier()) {
                (None, None) => true,
                (Some(left), Some(right)) => left.same_name(right),
                _ => false,
            },
            _ => false,
        }
    }
}

impl AcceptChildren for ColumnReferenceNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.table_name = walk_opt(self.table_name, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.table_name.as_deref());
    }
}

impl TreeFields for ColumnReferenceNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("columnName", &self.column_name)?;
        printer.opt_field("tableNumber", self.table_number)?;
        printer.opt_child("tableName", self.table_name.as_deref())
    }
}

/// A numeric literal. The node type fixes the SQL type.
#[derive(Debug)]
pub struct NumericConstantNode {
    /// The literal value.
    pub value: NumericValue,
}

fn bounded_integer(
    args: &ArgReader,
    position: usize,
    value: i64,
    (min, max): (i64, i64),
    expected: &'static str,
) -> Result<NumericValue> {
    if (min..=max).contains(&value) {
        Ok(NumericValue::Integer(value))
    } else {
        Err(args.mismatch(position, expected, "out-of-range integer"))
    }
}

impl NodeInit for NumericConstantNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let (position, arg) = args.next_arg();
        let value = match (node_type, arg) {
            (NodeType::TinyintConstant, NodeArg::Int(value)) => bounded_integer(
                args,
                position,
                value,
                (i64::from(i8::MIN), i64::from(i8::MAX)),
                "TINYINT value",
            )?,
            (NodeType::SmallintConstant, NodeArg::Int(value)) => bounded_integer(
                args,
                position,
                value,
                (i64::from(i16::MIN), i64::from(i16::MAX)),
                "SMALLINT value",
            )?,
            (NodeType::IntConstant, NodeArg::Int(value)) => bounded_integer(
                args,
                position,
                value,
                (i64::from(i32::MIN), i64::from(i32::MAX)),
                "INTEGER value",
            )?,
            (NodeType::LongintConstant, NodeArg::Int(value)) => NumericValue::Integer(value),
            (NodeType::DecimalConstant, NodeArg::Text(text)) if !text.is_empty() => {
                NumericValue::Decimal(text)
            }
            (NodeType::DecimalConstant, NodeArg::Int(value)) => {
                NumericValue::Decimal(value.to_string())
            }
            (NodeType::DoubleConstant, NodeArg::Double(value)) => NumericValue::Double(value),
            (NodeType::DoubleConstant, arg) => {
                return Err(args.mismatch(position, "double", arg.shape()));
            }
            (NodeType::DecimalConstant, arg) => {
                return Err(args.mismatch(position, "decimal text", arg.shape()));
            }
            (
                NodeType::TinyintConstant
                | NodeType::SmallintConstant
                | NodeType::IntConstant
                | NodeType::LongintConstant,
                arg,
            ) => return Err(args.mismatch(position, "integer", arg.shape())),
            (other, _) => {
                return Err(SqlError::NotImplemented { tag: other.tag() });
            }
        };
        Ok(Self { value })
    }
}

impl DeepCopy for NumericConstantNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl Equivalence for NumericConstantNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (NumericValue::Integer(left), NumericValue::Integer(right)) => left == right,
            (NumericValue::Decimal(left), NumericValue::Decimal(right)) => left == right,
            (NumericValue::Double(left), NumericValue::Double(right)) => {
                left.to_bits() == right.to_bits()
            }
            _ => false,
        }
    }
}

impl AcceptChildren for NumericConstantNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for NumericConstantNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("value", &self.value)
    }
}

/// A character string literal.
#[derive(Debug)]
pub struct CharConstantNode {
    /// The unescaped string value.
    pub value: String,
}

impl NodeInit for CharConstantNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let value = args.text()?;
        config.check_string(&value)?;
        Ok(Self { value })
    }
}

impl DeepCopy for CharConstantNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self {
            value: self.value.clone(),
        }
    }
}

impl Equivalence for CharConstantNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl AcceptChildren for CharConstantNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for CharConstantNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("value", format_args!("'{}'", self.value.replace('\'', "''")))
    }
}

/// `TRUE` or `FALSE`.
#[derive(Debug)]
pub struct BooleanConstantNode {
    /// Truth value.
    pub value: bool,
}

impl NodeInit for BooleanConstantNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self { value: args.bool()? })
    }
}

impl DeepCopy for BooleanConstantNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self { value: self.value }
    }
}

impl Equivalence for BooleanConstantNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl AcceptChildren for BooleanConstantNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for BooleanConstantNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("value", self.value)
    }
}

/// The untyped `NULL` literal.
#[derive(Debug)]
pub struct NullConstantNode;

impl NodeInit for NullConstantNode {
    const ARITIES: &'static [usize] = &[0];

    fn init(_: NodeType, _: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self)
    }
}

impl DeepCopy for NullConstantNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self
    }
}

impl Equivalence for NullConstantNode {
    fn is_equivalent(&self, _: &Self) -> bool {
        true
    }
}

impl AcceptChildren for NullConstantNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for NullConstantNode {
    fn print_fields(&self, _: &mut TreePrinter<'_>) -> fmt::Result {
        Ok(())
    }
}

/// A `?` placeholder. Numbers are 0-based, in source order.
#[derive(Debug)]
pub struct ParameterNode {
    /// Position of the placeholder among the statement's parameters.
    pub number: u32,
}

impl NodeInit for ParameterNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let (position, arg) = args.next_arg();
        match arg {
            NodeArg::Int(value) => u32::try_from(value)
                .map(|number| Self { number })
                .map_err(|_| args.mismatch(position, "parameter number", "out-of-range integer")),
            arg => Err(args.mismatch(position, "parameter number", arg.shape())),
        }
    }
}

impl DeepCopy for ParameterNode {
    fn copy_from(&self, _: &mut NodeFactory) -> Self {
        Self {
            number: self.number,
        }
    }
}

impl Equivalence for ParameterNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.number == other.number
    }
}

impl AcceptChildren for ParameterNode {
    fn accept_children<V: Visitor + ?Sized>(self, _: &mut V) -> Result<Self> {
        Ok(self)
    }

    fn collect_children<'a>(&'a self, _: &mut Vec<&'a Node>) {}
}

impl TreeFields for ParameterNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("number", self.number)
    }
}

macro_rules! binary_operator_node {
    ($(#[$doc:meta])* $name:ident, $operator:ty) => {
        $(#[$doc])*
        #[derive(Debug)]
        pub struct $name {
            /// The operator, fixed by the node type.
            pub operator: $operator,
            /// Left operand.
            pub left: Box<Node>,
            /// Right operand.
            pub right: Box<Node>,
        }

        impl NodeInit for $name {
            const ARITIES: &'static [usize] = &[2];

            fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
                Ok(Self {
                    operator: from_tag(node_type, <$operator>::from_node_type)?,
                    left: Box::new(args.value()?),
                    right: Box::new(args.value()?),
                })
            }
        }

        impl DeepCopy for $name {
            fn copy_from(&self, factory: &mut NodeFactory) -> Self {
                Self {
                    operator: self.operator,
                    left: copy_boxed(&self.left, factory),
                    right: copy_boxed(&self.right, factory),
                }
            }
        }

        impl Equivalence for $name {
            fn is_equivalent(&self, other: &Self) -> bool {
                self.operator == other.operator
                    && self.left.is_equivalent(&other.left)
                    && self.right.is_equivalent(&other.right)
            }
        }

        impl AcceptChildren for $name {
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

        impl TreeFields for $name {
            fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
                printer.field("operator", self.operator)?;
                printer.child("leftOperand", &self.left)?;
                printer.child("rightOperand", &self.right)
            }
        }
    };
}

binary_operator_node! {
    /// `left <op> right` for the six comparison operators.
    BinaryComparisonNode, ComparisonOperator
}

binary_operator_node! {
    /// Arithmetic, concatenation and bit operators.
    BinaryArithmeticNode, ArithmeticOperator
}

binary_operator_node! {
    /// `AND` / `OR`.
    BinaryLogicalNode, LogicalOperator
}

/// A prefix operator applied to one operand.
#[derive(Debug)]
pub struct UnaryOperatorNode {
    /// The operator, fixed by the node type.
    pub operator: UnaryOperator,
    /// The operand.
    pub operand: Box<Node>,
}

impl NodeInit for UnaryOperatorNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            operator: from_tag(node_type, UnaryOperator::from_node_type)?,
            operand: Box::new(args.value()?),
        })
    }
}

impl DeepCopy for UnaryOperatorNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            operator: self.operator,
            operand: copy_boxed(&self.operand, factory),
        }
    }
}

impl Equivalence for UnaryOperatorNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.operator == other.operator && self.operand.is_equivalent(&other.operand)
    }
}

impl AcceptChildren for UnaryOperatorNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_boxed(self.operand, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.operand);
    }
}

impl TreeFields for UnaryOperatorNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("operator", self.operator)?;
        printer.child("operand", &self.operand)
    }
}

/// `operand IS [NOT] NULL`.
#[derive(Debug)]
pub struct IsNullNode {
    /// True for `IS NOT NULL`.
    pub negated: bool,
    /// The tested operand.
    pub operand: Box<Node>,
}

impl NodeInit for IsNullNode {
    const ARITIES: &'static [usize] = &[1];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            negated: node_type == NodeType::IsNotNull,
            operand: Box::new(args.value()?),
        })
    }
}

impl DeepCopy for IsNullNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            negated: self.negated,
            operand: copy_boxed(&self.operand, factory),
        }
    }
}

impl Equivalence for IsNullNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.negated == other.negated && self.operand.is_equivalent(&other.operand)
    }
}

impl AcceptChildren for IsNullNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_boxed(self.operand, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.operand);
    }
}

impl TreeFields for IsNullNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("negated", self.negated)?;
        printer.child("operand", &self.operand)
    }
}

/// `receiver [NOT] LIKE pattern [ESCAPE escape]`.
#[derive(Debug)]
pub struct LikeNode {
    /// True for `NOT LIKE`.
    pub negated: bool,
    /// The matched value.
    pub receiver: Box<Node>,
    /// The pattern.
    pub pattern: Box<Node>,
    /// Escape character expression.
    pub escape: Option<Box<Node>>,
}

impl NodeInit for LikeNode {
    const ARITIES: &'static [usize] = &[2, 3];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let receiver = Box::new(args.value()?);
        let pattern = Box::new(args.value()?);
        let escape = if args.arity() == 3 {
            args.opt_value()?.map(Box::new)
        } else {
            None
        };
        Ok(Self {
            negated: node_type == NodeType::NotLike,
            receiver,
            pattern,
            escape,
        })
    }
}

impl DeepCopy for LikeNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            negated: self.negated,
            receiver: copy_boxed(&self.receiver, factory),
            pattern: copy_boxed(&self.pattern, factory),
            escape: copy_opt(self.escape.as_deref(), factory),
        }
    }
}

impl Equivalence for LikeNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.negated == other.negated
            && self.receiver.is_equivalent(&other.receiver)
            && self.pattern.is_equivalent(&other.pattern)
            && equivalent_opt(self.escape.as_deref(), other.escape.as_deref())
    }
}

impl AcceptChildren for LikeNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.receiver = walk_boxed(self.receiver, visitor)?;
        self.pattern = walk_boxed(self.pattern, visitor)?;
        self.escape = walk_opt(self.escape, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.receiver);
        out.push(&self.pattern);
        out.extend(self.escape.as_deref());
    }
}

impl TreeFields for LikeNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("negated", self.negated)?;
        printer.child("receiver", &self.receiver)?;
        printer.child("pattern", &self.pattern)?;
        printer.opt_child("escape", self.escape.as_deref())
    }
}

/// `operand [NOT] BETWEEN low AND high`.
#[derive(Debug)]
pub struct BetweenNode {
    /// True for `NOT BETWEEN`.
    pub negated: bool,
    /// The tested value.
    pub operand: Box<Node>,
    /// Lower bound.
    pub low: Box<Node>,
    /// Upper bound.
    pub high: Box<Node>,
}

impl NodeInit for BetweenNode {
    const ARITIES: &'static [usize] = &[3];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            negated: node_type == NodeType::NotBetween,
            operand: Box::new(args.value()?),
            low: Box::new(args.value()?),
            high: Box::new(args.value()?),
        })
    }
}

impl DeepCopy for BetweenNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            negated: self.negated,
            operand: copy_boxed(&self.operand, factory),
            low: copy_boxed(&self.low, factory),
            high: copy_boxed(&self.high, factory),
        }
    }
}

impl Equivalence for BetweenNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.negated == other.negated
            && self.operand.is_equivalent(&other.operand)
            && self.low.is_equivalent(&other.low)
            && self.high.is_equivalent(&other.high)
    }
}

impl AcceptChildren for BetweenNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_boxed(self.operand, visitor)?;
        self.low = walk_boxed(self.low, visitor)?;
        self.high = walk_boxed(self.high, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.operand);
        out.push(&self.low);
        out.push(&self.high);
    }
}

impl TreeFields for BetweenNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("negated", self.negated)?;
        printer.child("operand", &self.operand)?;
        printer.child("low", &self.low)?;
        printer.child("high", &self.high)
    }
}

/// `operand [NOT] IN (v1, v2, ...)`.
#[derive(Debug)]
pub struct InListNode {
    /// True for `NOT IN`.
    pub negated: bool,
    /// The tested value.
    pub operand: Box<Node>,
    /// `ValueNodeList` of candidates.
    pub list: Box<Node>,
}

impl NodeInit for InListNode {
    const ARITIES: &'static [usize] = &[2];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            negated: node_type == NodeType::NotInList,
            operand: Box::new(args.value()?),
            list: Box::new(args.node_of(NodeType::ValueNodeList)?),
        })
    }
}

impl DeepCopy for InListNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            negated: self.negated,
            operand: copy_boxed(&self.operand, factory),
            list: copy_boxed(&self.list, factory),
        }
    }
}

impl Equivalence for InListNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.negated == other.negated
            && self.operand.is_equivalent(&other.operand)
            && self.list.is_equivalent(&other.list)
    }
}

impl AcceptChildren for InListNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_boxed(self.operand, visitor)?;
        self.list = walk_boxed(self.list, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.operand);
        out.push(&self.list);
    }
}

impl TreeFields for InListNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("negated", self.negated)?;
        printer.child("leftOperand", &self.operand)?;
        printer.child("rightOperandList", &self.list)
    }
}

/// A query used as an expression.
#[derive(Debug)]
pub struct SubqueryNode {
    /// How the enclosing expression uses the query.
    pub kind: SubqueryKind,
    /// Left-hand side of `IN` / `NOT IN`.
    pub left_operand: Option<Box<Node>>,
    /// The query.
    pub subquery: Box<Node>,
}

impl NodeInit for SubqueryNode {
    const ARITIES: &'static [usize] = &[1, 2];

    fn init(node_type: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let kind = from_tag(node_type, SubqueryKind::from_node_type)?;
        let takes_operand = matches!(kind, SubqueryKind::In | SubqueryKind::NotIn);
        let expected: &'static [usize] = if takes_operand { &[2] } else { &[1] };
        if expected[0] != args.arity() {
            return Err(SqlError::ArityMismatch {
                node_type,
                found: args.arity(),
                expected,
            });
        }
        let left_operand = if takes_operand {
            Some(Box::new(args.value()?))
        } else {
            None
        };
        Ok(Self {
            kind,
            left_operand,
            subquery: Box::new(args.result_set()?),
        })
    }
}

impl DeepCopy for SubqueryNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            kind: self.kind,
            left_operand: copy_opt(self.left_operand.as_deref(), factory),
            subquery: copy_boxed(&self.subquery, factory),
        }
    }
}

impl Equivalence for SubqueryNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.kind == other.kind
            && equivalent_opt(self.left_operand.as_deref(), other.left_operand.as_deref())
            && self.subquery.is_equivalent(&other.subquery)
    }
}

impl AcceptChildren for SubqueryNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.left_operand = walk_opt(self.left_operand, visitor)?;
        self.subquery = walk_boxed(self.subquery, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.left_operand.as_deref());
        out.push(&self.subquery);
    }
}

impl TreeFields for SubqueryNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("subqueryType", self.kind)?;
        printer.opt_child("leftOperand", self.left_operand.as_deref())?;
        printer.child("resultSet", &self.subquery)
    }
}

/// A scalar or aggregate function call.
#[derive(Debug)]
pub struct FunctionCallNode {
    /// Function name as written (after identifier casing).
    pub name: String,
    /// `ValueNodeList` of arguments.
    pub arguments: Box<Node>,
    /// `DISTINCT` inside the parentheses.
    pub distinct: bool,
    /// `COUNT(*)`-style star argument.
    pub star: bool,
    /// True for aggregate calls.
    pub aggregate: bool,
}

impl NodeInit for FunctionCallNode {
    const ARITIES: &'static [usize] = &[2, 3, 4];

    fn init(node_type: NodeType, args: &mut ArgReader, config: &ParserConfig) -> Result<Self> {
        let name = args.text()?;
        config.check_identifier(&name)?;
        let arguments = Box::new(args.node_of(NodeType::ValueNodeList)?);
        let distinct = if args.arity() >= 3 { args.bool()? } else { false };
        let star = if args.arity() == 4 { args.bool()? } else { false };
        Ok(Self {
            name,
            arguments,
            distinct,
            star,
            aggregate: node_type == NodeType::AggregateFunction,
        })
    }
}

impl DeepCopy for FunctionCallNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            name: self.name.clone(),
            arguments: copy_boxed(&self.arguments, factory),
            distinct: self.distinct,
            star: self.star,
            aggregate: self.aggregate,
        }
    }
}

impl Equivalence for FunctionCallNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
            && self.distinct == other.distinct
            && self.star == other.star
            && self.aggregate == other.aggregate
            && self.arguments.is_equivalent(&other.arguments)
    }
}

impl AcceptChildren for FunctionCallNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.arguments = walk_boxed(self.arguments, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.arguments);
    }
}

impl TreeFields for FunctionCallNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("name", &self.name)?;
        printer.field("distinct", self.distinct)?;
        if self.star {
            printer.field("star", true)?;
        }
        printer.child("arguments", &self.arguments)
    }
}

/// `CAST(operand AS type)`.
#[derive(Debug)]
pub struct CastNode {
    /// The converted value.
    pub operand: Box<Node>,
    /// Target type.
    pub target: SqlType,
}

impl NodeInit for CastNode {
    const ARITIES: &'static [usize] = &[2];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        Ok(Self {
            operand: Box::new(args.value()?),
            target: args.sql_type()?,
        })
    }
}

impl DeepCopy for CastNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            operand: copy_boxed(&self.operand, factory),
            target: self.target.clone(),
        }
    }
}

impl Equivalence for CastNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        self.target == other.target && self.operand.is_equivalent(&other.operand)
    }
}

impl AcceptChildren for CastNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_boxed(self.operand, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(&self.operand);
    }
}

impl TreeFields for CastNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.field("targetType", &self.target)?;
        printer.child("castOperand", &self.operand)
    }
}

/// `CASE [operand] WHEN ... THEN ... [ELSE ...] END`.
#[derive(Debug)]
pub struct CaseNode {
    /// Operand of a simple CASE.
    pub operand: Option<Box<Node>>,
    /// `ValueNodeList` of WHEN expressions.
    pub when_list: Box<Node>,
    /// `ValueNodeList` of THEN results, parallel to `when_list`.
    pub then_list: Box<Node>,
    /// ELSE result.
    pub else_result: Option<Box<Node>>,
}

fn list_len(node: &Node) -> usize {
    match node.kind() {
        NodeKind::NodeList(list) => list.len(),
        _ => 0,
    }
}

impl NodeInit for CaseNode {
    const ARITIES: &'static [usize] = &[3, 4];

    fn init(_: NodeType, args: &mut ArgReader, _: &ParserConfig) -> Result<Self> {
        let operand = if args.arity() == 4 {
            args.opt_value()?.map(Box::new)
        } else {
            None
        };
        let when_position = args.arity() - 3;
        let when_list = args.node_of(NodeType::ValueNodeList)?;
        let then_list = args.node_of(NodeType::ValueNodeList)?;
        if list_len(&when_list) == 0 {
            return Err(args.mismatch(when_position, "non-empty WHEN list", "empty list"));
        }
        if list_len(&when_list) != list_len(&then_list) {
            return Err(args.mismatch(
                when_position + 1,
                "THEN list as long as the WHEN list",
                "list of another length",
            ));
        }
        Ok(Self {
            operand,
            when_list: Box::new(when_list),
            then_list: Box::new(then_list),
            else_result: args.opt_value()?.map(Box::new),
        })
    }
}

impl DeepCopy for CaseNode {
    fn copy_from(&self, factory: &mut NodeFactory) -> Self {
        Self {
            operand: copy_opt(self.operand.as_deref(), factory),
            when_list: copy_boxed(&self.when_list, factory),
            then_list: copy_boxed(&self.then_list, factory),
            else_result: copy_opt(self.else_result.as_deref(), factory),
        }
    }
}

impl Equivalence for CaseNode {
    fn is_equivalent(&self, other: &Self) -> bool {
        equivalent_opt(self.operand.as_deref(), other.operand.as_deref())
            && self.when_list.is_equivalent(&other.when_list)
            && self.then_list.is_equivalent(&other.then_list)
            && equivalent_opt(self.else_result.as_deref(), other.else_result.as_deref())
    }
}

impl AcceptChildren for CaseNode {
    fn accept_children<V: Visitor + ?Sized>(mut self, visitor: &mut V) -> Result<Self> {
        self.operand = walk_opt(self.operand, visitor)?;
        self.when_list = walk_boxed(self.when_list, visitor)?;
        self.then_list = walk_boxed(self.then_list, visitor)?;
        self.else_result = walk_opt(self.else_result, visitor)?;
        Ok(self)
    }

    fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.extend(self.operand.as_deref());
        out.push(&self.when_list);
        out.push(&self.then_list);
        out.extend(self.else_result.as_deref());
    }
}

impl TreeFields for CaseNode {
    fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
        printer.opt_child("caseOperand", self.operand.as_deref())?;
        printer.child("whenList", &self.when_list)?;
        printer.child("thenList", &self.then_list)?;
        printer.opt_child("elseValue", self.else_result.as_deref())
    }
}
