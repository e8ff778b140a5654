//! The node type registry.
//!
//! Two static tables drive node construction: [`NodeType::variant`] maps
//! every tag onto the payload variant that implements it, and the binding
//! table maps every variant onto its declared arities and typed `init`.
//! Both are closed and checked at compile time, so there is no runtime
//! registration step.

use crate::ast::{
    AllResultColumnNode, ArgReader, BetweenNode, BinaryArithmeticNode, BinaryComparisonNode,
    BinaryLogicalNode, BooleanConstantNode, CallStatementNode, CaseNode, CastNode,
    CharConstantNode, ColumnDefinitionNode, ColumnReferenceNode, CreateTableNode, CursorNode,
    DeleteNode, DropTableNode, FromBaseTableNode, FromSubqueryNode, FunctionCallNode,
    GroupByColumnNode, GroupingConstructNode, InListNode, InsertNode, IsNullNode, JoinNode,
    LikeNode, NodeArgs, NodeInit, NodeKind, NodeList, NodeType, NullConstantNode,
    NumericConstantNode, OrderByColumnNode, ParameterNode, ResultColumnNode, RowsResultSetNode,
    SelectNode, SetOperationNode, SubqueryNode, TableNameNode, UnaryOperatorNode, UpdateNode,
    Variant,
};
use crate::config::ParserConfig;
use crate::error::Result;

impl NodeType {
    /// Returns the payload variant that implements this node type.
    #[must_use]
    pub const fn variant(self) -> Variant {
        match self {
            Self::Cursor => Variant::Cursor,
            Self::Select => Variant::Select,
            Self::Union | Self::Intersect | Self::Except => Variant::SetOperation,
            Self::RowsResultSet => Variant::RowsResultSet,
            Self::Insert => Variant::Insert,
            Self::Update => Variant::Update,
            Self::Delete => Variant::Delete,
            Self::CallStatement => Variant::CallStatement,
            Self::CreateTable => Variant::CreateTable,
            Self::DropTable => Variant::DropTable,
            Self::ResultColumnList
            | Self::FromList
            | Self::ValueNodeList
            | Self::OrderByList
            | Self::GroupByList
            | Self::TableElementList
            | Self::RowsList => Variant::NodeList,
            Self::ResultColumn => Variant::ResultColumn,
            Self::AllResultColumn => Variant::AllResultColumn,
            Self::OrderByColumn => Variant::OrderByColumn,
            Self::GroupByColumn => Variant::GroupByColumn,
            Self::GroupingSets | Self::Rollup | Self::Cube => Variant::GroupingConstruct,
            Self::ColumnDefinition => Variant::ColumnDefinition,
            Self::TableName => Variant::TableName,
            Self::FromBaseTable => Variant::FromBaseTable,
            Self::FromSubquery => Variant::FromSubquery,
            Self::InnerJoin
            | Self::LeftOuterJoin
            | Self::RightOuterJoin
            | Self::FullOuterJoin
            | Self::CrossJoin => Variant::Join,
            Self::ColumnReference => Variant::ColumnReference,
            Self::TinyintConstant
            | Self::SmallintConstant
            | Self::IntConstant
            | Self::LongintConstant
            | Self::DecimalConstant
            | Self::DoubleConstant => Variant::NumericConstant,
            Self::VarcharConstant => Variant::CharConstant,
            Self::BooleanConstant => Variant::BooleanConstant,
            Self::UntypedNullConstant => Variant::NullConstant,
            Self::Parameter => Variant::Parameter,
            Self::BinaryEquals
            | Self::BinaryNotEquals
            | Self::BinaryLessThan
            | Self::BinaryLessEquals
            | Self::BinaryGreaterThan
            | Self::BinaryGreaterEquals => Variant::BinaryComparison,
            Self::BinaryPlus
            | Self::BinaryMinus
            | Self::BinaryTimes
            | Self::BinaryDivide
            | Self::BinaryDiv
            | Self::Mod
            | Self::Concatenation
            | Self::BitAnd
            | Self::BitOr
            | Self::BitXor
            | Self::LeftShift
            | Self::RightShift => Variant::BinaryArithmetic,
            Self::And | Self::Or => Variant::BinaryLogical,
            Self::Not | Self::UnaryMinus | Self::UnaryPlus | Self::UnaryBitNot => {
                Variant::UnaryOperator
            }
            Self::IsNull | Self::IsNotNull => Variant::IsNull,
            Self::Like | Self::NotLike => Variant::Like,
            Self::Between | Self::NotBetween => Variant::Between,
            Self::InList | Self::NotInList => Variant::InList,
            Self::ExpressionSubquery
            | Self::ExistsSubquery
            | Self::InSubquery
            | Self::NotInSubquery => Variant::Subquery,
            Self::FunctionCall | Self::AggregateFunction => Variant::FunctionCall,
            Self::Cast => Variant::Cast,
            Self::Conditional => Variant::Case,
        }
    }
}

impl Variant {
    /// Returns true for variants usable wherever a value expression is
    /// expected.
    #[must_use]
    pub const fn is_value(self) -> bool {
        matches!(
            self,
            Self::ColumnReference
                | Self::NumericConstant
                | Self::CharConstant
                | Self::BooleanConstant
                | Self::NullConstant
                | Self::Parameter
                | Self::BinaryComparison
                | Self::BinaryArithmetic
                | Self::BinaryLogical
                | Self::UnaryOperator
                | Self::IsNull
                | Self::Like
                | Self::Between
                | Self::InList
                | Self::Subquery
                | Self::FunctionCall
                | Self::Cast
                | Self::Case
        )
    }

    /// Returns true for query expressions.
    #[must_use]
    pub const fn is_result_set(self) -> bool {
        matches!(self, Self::Select | Self::SetOperation | Self::RowsResultSet)
    }

    /// Returns true for FROM-list items.
    #[must_use]
    pub const fn is_from_item(self) -> bool {
        matches!(self, Self::FromBaseTable | Self::FromSubquery | Self::Join)
    }

    /// Returns the registry entry of the variant.
    #[must_use]
    pub fn binding(self) -> &'static VariantBinding {
        &BINDINGS[self as usize]
    }
}

type InitFn = fn(NodeType, NodeArgs, &ParserConfig) -> Result<NodeKind>;

/// Registry entry of one variant.
#[derive(Debug)]
pub struct VariantBinding {
    variant: Variant,
    arities: &'static [usize],
    init: InitFn,
}

impl VariantBinding {
    /// The variant this entry describes.
    #[must_use]
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// The variant name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.variant.name()
    }

    /// Argument counts accepted by the variant's `init` overloads.
    #[must_use]
    pub const fn arities(&self) -> &'static [usize] {
        self.arities
    }

    /// Returns true if some `init` overload takes `arity` arguments.
    #[must_use]
    pub fn accepts_arity(&self, arity: usize) -> bool {
        self.arities.contains(&arity)
    }

    pub(crate) fn init(
        &self,
        node_type: NodeType,
        args: NodeArgs,
        config: &ParserConfig,
    ) -> Result<NodeKind> {
        (self.init)(node_type, args, config)
    }
}

fn init_as<T: NodeInit + Into<NodeKind>>(
    node_type: NodeType,
    args: NodeArgs,
    config: &ParserConfig,
) -> Result<NodeKind> {
    let mut reader = ArgReader::new(node_type, args);
    T::init(node_type, &mut reader, config).map(Into::into)
}

macro_rules! bindings {
    ($($variant:ident => $payload:ty),+ $(,)?) => {
        static BINDINGS: &[VariantBinding] = &[
            $(
                VariantBinding {
                    variant: Variant::$variant,
                    arities: <$payload as NodeInit>::ARITIES,
                    init: init_as::<$payload>,
                },
            )+
        ];
    };
}

// Entries are in `Variant` declaration order; `Variant::binding` indexes
// by discriminant.
bindings! {
    Cursor => CursorNode,
    Select => SelectNode,
    SetOperation => SetOperationNode,
    RowsResultSet => RowsResultSetNode,
    Insert => InsertNode,
    Update => UpdateNode,
    Delete => DeleteNode,
    CallStatement => CallStatementNode,
    CreateTable => CreateTableNode,
    DropTable => DropTableNode,
    NodeList => NodeList,
    ResultColumn => ResultColumnNode,
    AllResultColumn => AllResultColumnNode,
    OrderByColumn => OrderByColumnNode,
    GroupByColumn => GroupByColumnNode,
    GroupingConstruct => GroupingConstructNode,
    ColumnDefinition => ColumnDefinitionNode,
    TableName => TableNameNode,
    FromBaseTable => FromBaseTableNode,
    FromSubquery => FromSubqueryNode,
    Join => JoinNode,
    ColumnReference => ColumnReferenceNode,
    NumericConstant => NumericConstantNode,
    CharConstant => CharConstantNode,
    BooleanConstant => BooleanConstantNode,
    NullConstant => NullConstantNode,
    Parameter => ParameterNode,
    BinaryComparison => BinaryComparisonNode,
    BinaryArithmetic => BinaryArithmeticNode,
    BinaryLogical => BinaryLogicalNode,
    UnaryOperator => UnaryOperatorNode,
    IsNull => IsNullNode,
    Like => LikeNode,
    Between => BetweenNode,
    InList => InListNode,
    Subquery => SubqueryNode,
    FunctionCall => FunctionCallNode,
    Cast => CastNode,
    Case => CaseNode,
}
