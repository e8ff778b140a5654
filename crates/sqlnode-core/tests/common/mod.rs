#![allow(dead_code)]

use sqlnode_core::ast::{CursorNode, DataType, SelectNode, SqlType};
use sqlnode_core::{
    node_args, Node, NodeArg, NodeArgs, NodeKind, NodeType, ParserConfig, ParserContext,
    SqlError, SqlParser,
};

pub fn parse(sql: &str) -> Node {
    SqlParser::default()
        .parse_statement(sql)
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {e:?}"))
}

pub fn parse_with(config: ParserConfig, sql: &str) -> Result<Node, SqlError> {
    SqlParser::new(config)
        .unwrap_or_else(|e| panic!("Invalid config: {e:?}"))
        .parse_statement(sql)
}

pub fn parse_err(sql: &str) -> SqlError {
    SqlParser::default()
        .parse_statement(sql)
        .expect_err(&format!("Expected parse error for: {sql}"))
}

pub fn cursor(node: &Node) -> &CursorNode {
    match node.kind() {
        NodeKind::Cursor(cursor) => cursor,
        _ => panic!("Expected Cursor, got {}", node.node_type()),
    }
}

pub fn select(node: &Node) -> &SelectNode {
    let result_set = &cursor(node).result_set;
    match result_set.kind() {
        NodeKind::Select(select) => select,
        _ => panic!("Expected Select, got {}", result_set.node_type()),
    }
}

/// A query touching every nesting construct: a scalar subquery, a join tree
/// and a list of predicates.
pub const NESTED_QUERY: &str = "SELECT a, (SELECT MAX(b) FROM u WHERE u.c = t.c) AS m \
     FROM t JOIN v ON t.id = v.id LEFT JOIN w USING (id) \
     WHERE a > 1 AND b BETWEEN 2 AND 3 AND c IN (4, 5) AND d IS NOT NULL \
     ORDER BY a";

pub fn node(ctx: &mut ParserContext, node_type: NodeType, args: NodeArgs) -> Node {
    ctx.make_node(node_type, args)
        .unwrap_or_else(|e| panic!("Failed to make {node_type}: {e:?}"))
}

pub fn column(ctx: &mut ParserContext, name: &str) -> Node {
    node(ctx, NodeType::ColumnReference, node_args![name, NodeArg::Null])
}

pub fn int(ctx: &mut ParserContext, value: i64) -> Node {
    node(ctx, NodeType::IntConstant, node_args![value])
}

pub fn values(ctx: &mut ParserContext, items: Vec<Node>) -> Node {
    node(ctx, NodeType::ValueNodeList, node_args![items])
}

pub fn table_name(ctx: &mut ParserContext, name: &str) -> Node {
    node(ctx, NodeType::TableName, node_args![name])
}

pub fn base_table(ctx: &mut ParserContext, name: &str) -> Node {
    let table = table_name(ctx, name);
    node(ctx, NodeType::FromBaseTable, node_args![table])
}

/// `SELECT 1`
pub fn select_one(ctx: &mut ParserContext) -> Node {
    let one = int(ctx, 1);
    let column = node(ctx, NodeType::ResultColumn, node_args![NodeArg::Null, one]);
    let columns = node(ctx, NodeType::ResultColumnList, node_args![vec![column]]);
    let from = node(ctx, NodeType::FromList, node_args![Vec::<Node>::new()]);
    node(
        ctx,
        NodeType::Select,
        node_args![columns, from, NodeArg::Null, NodeArg::Null, NodeArg::Null, false],
    )
}

fn column_definition(ctx: &mut ParserContext) -> Node {
    node(
        ctx,
        NodeType::ColumnDefinition,
        node_args!["a", SqlType::new(DataType::Integer)],
    )
}

/// Returns a well-formed argument list for `node_type`.
pub fn valid_args(ctx: &mut ParserContext, node_type: NodeType) -> NodeArgs {
    match node_type {
        NodeType::Cursor => node_args![select_one(ctx)],
        NodeType::Select => {
            let one = int(ctx, 1);
            let column = node(ctx, NodeType::ResultColumn, node_args!["one", one]);
            let columns = node(ctx, NodeType::ResultColumnList, node_args![vec![column]]);
            let table = base_table(ctx, "t");
            let from = node(ctx, NodeType::FromList, node_args![vec![table]]);
            let predicate = column_eq_int(ctx, "a", 1);
            node_args![columns, from, predicate, NodeArg::Null, NodeArg::Null, true]
        }
        NodeType::Union | NodeType::Intersect | NodeType::Except => {
            let left = select_one(ctx);
            let right = select_one(ctx);
            node_args![left, right, false]
        }
        NodeType::RowsResultSet => {
            let one = int(ctx, 1);
            let row = values(ctx, vec![one]);
            let rows = node(ctx, NodeType::RowsList, node_args![vec![row]]);
            node_args![rows]
        }
        NodeType::Insert => {
            let target = table_name(ctx, "t");
            let a = column(ctx, "a");
            let columns = values(ctx, vec![a]);
            let source = select_one(ctx);
            node_args![target, columns, source]
        }
        NodeType::Update => {
            let target = base_table(ctx, "t");
            let one = int(ctx, 1);
            let assignment = node(ctx, NodeType::ResultColumn, node_args!["a", one]);
            let assignments = node(ctx, NodeType::ResultColumnList, node_args![vec![assignment]]);
            node_args![target, assignments]
        }
        NodeType::Delete => node_args![base_table(ctx, "t")],
        NodeType::CallStatement => {
            let arguments = values(ctx, Vec::new());
            let call = node(ctx, NodeType::FunctionCall, node_args!["refresh", arguments]);
            node_args![call]
        }
        NodeType::CreateTable => {
            let table = table_name(ctx, "t");
            let definition = column_definition(ctx);
            let elements = node(ctx, NodeType::TableElementList, node_args![vec![definition]]);
            node_args![table, elements]
        }
        NodeType::DropTable => node_args![table_name(ctx, "t")],
        NodeType::ResultColumnList => {
            let a = column(ctx, "a");
            let item = node(ctx, NodeType::ResultColumn, node_args!["a", a]);
            node_args![vec![item]]
        }
        NodeType::FromList => node_args![vec![base_table(ctx, "t")]],
        NodeType::ValueNodeList => node_args![vec![int(ctx, 1)]],
        NodeType::OrderByList => {
            let a = column(ctx, "a");
            let item = node(ctx, NodeType::OrderByColumn, node_args![a]);
            node_args![vec![item]]
        }
        NodeType::GroupByList => {
            let a = column(ctx, "a");
            let item = node(ctx, NodeType::GroupByColumn, node_args![a]);
            node_args![vec![item]]
        }
        NodeType::TableElementList => node_args![vec![column_definition(ctx)]],
        NodeType::RowsList => {
            let one = int(ctx, 1);
            node_args![vec![values(ctx, vec![one])]]
        }
        NodeType::ResultColumn => node_args!["x", int(ctx, 1)],
        NodeType::AllResultColumn => node_args![NodeArg::Null],
        NodeType::OrderByColumn => node_args![int(ctx, 1), false],
        NodeType::GroupByColumn => node_args![column(ctx, "a")],
        NodeType::GroupingSets | NodeType::Rollup | NodeType::Cube => {
            let a = column(ctx, "a");
            node_args![values(ctx, vec![a])]
        }
        NodeType::ColumnDefinition => node_args!["a", SqlType::new(DataType::Integer)],
        NodeType::TableName => node_args!["t"],
        NodeType::FromBaseTable => node_args![table_name(ctx, "t"), "x"],
        NodeType::FromSubquery => node_args![select_one(ctx), "sq"],
        NodeType::InnerJoin
        | NodeType::LeftOuterJoin
        | NodeType::RightOuterJoin
        | NodeType::FullOuterJoin => {
            let left = base_table(ctx, "a");
            let right = base_table(ctx, "b");
            let on = column_eq_int(ctx, "id", 1);
            node_args![left, right, on, NodeArg::Null]
        }
        NodeType::CrossJoin => {
            let left = base_table(ctx, "a");
            let right = base_table(ctx, "b");
            node_args![left, right]
        }
        NodeType::ColumnReference => node_args!["a", NodeArg::Null],
        NodeType::TinyintConstant
        | NodeType::SmallintConstant
        | NodeType::IntConstant
        | NodeType::LongintConstant => node_args![7_i64],
        NodeType::DecimalConstant => node_args!["1.50"],
        NodeType::DoubleConstant => node_args![2.5_f64],
        NodeType::VarcharConstant => node_args!["text"],
        NodeType::BooleanConstant => node_args![true],
        NodeType::UntypedNullConstant => node_args![],
        NodeType::Parameter => node_args![0_u32],
        NodeType::Not
        | NodeType::UnaryMinus
        | NodeType::UnaryPlus
        | NodeType::UnaryBitNot
        | NodeType::IsNull
        | NodeType::IsNotNull => node_args![column(ctx, "a")],
        NodeType::Like | NodeType::NotLike => {
            let a = column(ctx, "a");
            let pattern = node(ctx, NodeType::VarcharConstant, node_args!["a%"]);
            node_args![a, pattern]
        }
        NodeType::Between | NodeType::NotBetween => {
            let a = column(ctx, "a");
            let low = int(ctx, 1);
            let high = int(ctx, 2);
            node_args![a, low, high]
        }
        NodeType::InList | NodeType::NotInList => {
            let a = column(ctx, "a");
            let one = int(ctx, 1);
            let list = values(ctx, vec![one]);
            node_args![a, list]
        }
        NodeType::ExpressionSubquery | NodeType::ExistsSubquery => node_args![select_one(ctx)],
        NodeType::InSubquery | NodeType::NotInSubquery => {
            let a = column(ctx, "a");
            node_args![a, select_one(ctx)]
        }
        NodeType::FunctionCall | NodeType::AggregateFunction => {
            let a = column(ctx, "a");
            node_args!["f", values(ctx, vec![a])]
        }
        NodeType::Cast => node_args![column(ctx, "a"), SqlType::new(DataType::Bigint)],
        NodeType::Conditional => {
            let condition = column_eq_int(ctx, "a", 1);
            let result = node(ctx, NodeType::VarcharConstant, node_args!["one"]);
            let whens = values(ctx, vec![condition]);
            let thens = values(ctx, vec![result]);
            node_args![whens, thens, NodeArg::Null]
        }
        // Binary comparison, arithmetic and logical operators.
        _ => {
            let a = column(ctx, "a");
            node_args![a, int(ctx, 1)]
        }
    }
}

/// `<name> = <value>`
pub fn column_eq_int(ctx: &mut ParserContext, name: &str, value: i64) -> Node {
    let left = column(ctx, name);
    let right = int(ctx, value);
    node(ctx, NodeType::BinaryEquals, node_args![left, right])
}
