//! The node handle and the closed set of node payloads.

use core::fmt;

use super::clause::{
    AllResultColumnNode, ColumnDefinitionNode, GroupByColumnNode, GroupingConstructNode, NodeList,
    OrderByColumnNode, ResultColumnNode, TableNameNode,
};
use super::contract::{AcceptChildren, DeepCopy, Equivalence, TreeFields};
use super::expression::{
    BetweenNode, BinaryArithmeticNode, BinaryComparisonNode, BinaryLogicalNode, BooleanConstantNode,
    CaseNode, CastNode, CharConstantNode, ColumnReferenceNode, FunctionCallNode, InListNode,
    IsNullNode, LikeNode, NullConstantNode, NumericConstantNode, ParameterNode, SubqueryNode,
    UnaryOperatorNode,
};
use super::print::TreePrinter;
use super::statement::{
    CallStatementNode, CreateTableNode, CursorNode, DeleteNode, DropTableNode, InsertNode,
    RowsResultSetNode, SelectNode, SetOperationNode, UpdateNode,
};
use super::table::{FromBaseTableNode, FromSubqueryNode, JoinNode};
use super::NodeType;
use crate::error::Result;
use crate::factory::NodeFactory;
use crate::lexer::Span;
use crate::visitor::Visitor;

/// Identity of a node, unique within the factory that made it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

macro_rules! node_kinds {
    ($($variant:ident($payload:ident)),+ $(,)?) => {
        /// The concrete payload shape behind one or more node types.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Variant {
            $(
                #[doc = concat!("Payload [`", stringify!($payload), "`].")]
                $variant,
            )+
        }

        impl Variant {
            /// Every variant, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+];

            /// Returns the variant name.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant),)+
                }
            }
        }

        /// Variant payload of a [`Node`].
        #[derive(Debug)]
        pub enum NodeKind {
            $(
                #[doc = concat!("See [`", stringify!($payload), "`].")]
                $variant($payload),
            )+
        }

        $(
            impl From<$payload> for NodeKind {
                fn from(payload: $payload) -> Self {
                    Self::$variant(payload)
                }
            }
        )+

        impl NodeKind {
            /// Returns the payload's variant.
            #[must_use]
            pub const fn variant(&self) -> Variant {
                match self {
                    $(Self::$variant(_) => Variant::$variant,)+
                }
            }

            pub(crate) fn copy_with(&self, factory: &mut NodeFactory) -> Self {
                match self {
                    $(Self::$variant(payload) => Self::$variant(payload.copy_from(factory)),)+
                }
            }

            fn equivalent_to(&self, other: &Self) -> bool {
                match (self, other) {
                    $((Self::$variant(left), Self::$variant(right)) => left.is_equivalent(right),)+
                    _ => false,
                }
            }

            fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> Result<Self> {
                match self {
                    $(Self::$variant(payload) => payload.accept_children(visitor).map(Self::$variant),)+
                }
            }

            fn collect_children<'a>(&'a self, out: &mut Vec<&'a Node>) {
                match self {
                    $(Self::$variant(payload) => payload.collect_children(out),)+
                }
            }

            pub(crate) fn print_fields(&self, printer: &mut TreePrinter<'_>) -> fmt::Result {
                match self {
                    $(Self::$variant(payload) => payload.print_fields(printer),)+
                }
            }
        }
    };
}

node_kinds! {
    Cursor(CursorNode),
    Select(SelectNode),
    SetOperation(SetOperationNode),
    RowsResultSet(RowsResultSetNode),
    Insert(InsertNode),
    Update(UpdateNode),
    Delete(DeleteNode),
    CallStatement(CallStatementNode),
    CreateTable(CreateTableNode),
    DropTable(DropTableNode),
    NodeList(NodeList),
    ResultColumn(ResultColumnNode),
    AllResultColumn(AllResultColumnNode),
    OrderByColumn(OrderByColumnNode),
    GroupByColumn(GroupByColumnNode),
    GroupingConstruct(GroupingConstructNode),
    ColumnDefinition(ColumnDefinitionNode),
    TableName(TableNameNode),
    FromBaseTable(FromBaseTableNode),
    FromSubquery(FromSubqueryNode),
    Join(JoinNode),
    ColumnReference(ColumnReferenceNode),
    NumericConstant(NumericConstantNode),
    CharConstant(CharConstantNode),
    BooleanConstant(BooleanConstantNode),
    NullConstant(NullConstantNode),
    Parameter(ParameterNode),
    BinaryComparison(BinaryComparisonNode),
    BinaryArithmetic(BinaryArithmeticNode),
    BinaryLogical(BinaryLogicalNode),
    UnaryOperator(UnaryOperatorNode),
    IsNull(IsNullNode),
    Like(LikeNode),
    Between(BetweenNode),
    InList(InListNode),
    Subquery(SubqueryNode),
    FunctionCall(FunctionCallNode),
    Cast(CastNode),
    Case(CaseNode),
}

impl NodeKind {
    const fn span(&self) -> Option<Span> {
        match self {
            Self::ColumnReference(column) => column.span,
            Self::TableName(table) => table.span,
            _ => None,
        }
    }
}

/// A syntax tree node.
///
/// A node owns its children outright; there are no parent links and no
/// sharing between trees. Nodes are built and copied only through a
/// [`NodeFactory`], which hands out the [`NodeId`]s.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    node_type: NodeType,
    kind: NodeKind,
}

impl Node {
    pub(crate) const fn new(id: NodeId, node_type: NodeType, kind: NodeKind) -> Self {
        Self {
            id,
            node_type,
            kind,
        }
    }

    /// Returns the node's identity.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the node type the node was created with.
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.node_type
    }

    /// Returns the payload variant.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.kind.variant()
    }

    /// Returns the source span, for the leaf variants that record one.
    #[must_use]
    pub const fn span(&self) -> Option<Span> {
        self.kind.span()
    }

    /// Returns the payload.
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns the payload for in-place edits.
    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Consumes the node and returns its payload.
    #[must_use]
    pub fn into_kind(self) -> NodeKind {
        self.kind
    }

    /// Returns the direct children, in traversal order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        let mut out = Vec::new();
        self.kind.collect_children(&mut out);
        out
    }

    /// Returns the number of nodes in the subtree rooted here.
    #[must_use]
    pub fn subtree_size(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Self::subtree_size)
            .sum::<usize>()
    }

    /// Returns true if `other` may be substituted for `self` by a rewrite.
    ///
    /// Nodes of different types are never equivalent; otherwise the payload
    /// decides. Ids and source positions never take part.
    #[must_use]
    pub fn is_equivalent(&self, other: &Self) -> bool {
        self.node_type == other.node_type && self.kind.equivalent_to(&other.kind)
    }

    /// Runs `visitor` over this subtree and returns the resulting subtree.
    ///
    /// In pre-order the visitor sees the node first; if it hands back the
    /// same node (same id) the traversal continues into its children, while a
    /// replacement is taken as is. In post-order the children are traversed
    /// first. Once [`Visitor::stop_traversal`] reports true, no further node
    /// is visited.
    pub fn accept<V: Visitor + ?Sized>(self, visitor: &mut V) -> Result<Self> {
        let children_first = visitor.visit_children_first(&self);
        let skip_children = visitor.skip_children(&self);

        if children_first {
            let node = if skip_children || visitor.stop_traversal() {
                self
            } else {
                self.accept_children(visitor)?
            };
            return if visitor.stop_traversal() {
                Ok(node)
            } else {
                visitor.visit(node)
            };
        }

        if visitor.stop_traversal() {
            return Ok(self);
        }
        let id = self.id;
        let node = visitor.visit(self)?;
        if skip_children || visitor.stop_traversal() || node.id != id {
            Ok(node)
        } else {
            node.accept_children(visitor)
        }
    }

    /// Runs `visitor` over the children only, replacing each child slot with
    /// what the traversal returns.
    pub fn accept_children<V: Visitor + ?Sized>(self, visitor: &mut V) -> Result<Self> {
        let Self {
            id,
            node_type,
            kind,
        } = self;
        Ok(Self {
            id,
            node_type,
            kind: kind.accept_children(visitor)?,
        })
    }
}
