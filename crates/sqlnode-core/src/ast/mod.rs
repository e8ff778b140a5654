//! The syntax tree: node types, payloads and the node contract.

mod args;
mod clause;
mod contract;
mod expression;
mod node;
mod node_type;
mod print;
mod statement;
mod table;
mod value;

pub use args::{ArgReader, NodeArg, NodeArgs};
pub use clause::{
    exposed_name, AllResultColumnNode, ColumnDefinitionNode, GroupByColumnNode,
    GroupingConstructNode, NodeList, OrderByColumnNode, ResultColumnNode, TableNameNode,
};
pub use contract::{AcceptChildren, DeepCopy, Equivalence, NodeInit, TreeFields};
pub use expression::{
    BetweenNode, BinaryArithmeticNode, BinaryComparisonNode, BinaryLogicalNode, BooleanConstantNode,
    CaseNode, CastNode, CharConstantNode, ColumnReferenceNode, FunctionCallNode, InListNode,
    IsNullNode, LikeNode, NullConstantNode, NumericConstantNode, ParameterNode, SubqueryNode,
    UnaryOperatorNode,
};
pub use node::{Node, NodeId, NodeKind, Variant};
pub use node_type::NodeType;
pub use print::TreePrinter;
pub use statement::{
    CallStatementNode, CreateTableNode, CursorNode, DeleteNode, DropTableNode, InsertNode,
    RowsResultSetNode, SelectNode, SetOperationNode, UpdateNode,
};
pub use table::{FromBaseTableNode, FromSubqueryNode, JoinNode};
pub use value::{
    ArithmeticOperator, ComparisonOperator, DataType, GroupingKind, JoinType, LogicalOperator,
    NullOrdering, NumericValue, SetOperator, SqlType, SubqueryKind, UnaryOperator,
};
