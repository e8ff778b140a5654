mod common;

use common::*;
use sqlnode_core::ast::{DataType, SqlType};
use sqlnode_core::{
    Features, IdentifierCase, MySqlDialect, NodeKind, NodeType, ParserConfig, SqlError, SqlParser,
};

fn with(features: Features) -> ParserConfig {
    ParserConfig::new().with_features(features)
}

fn where_type(tree: &sqlnode_core::Node) -> NodeType {
    select(tree)
        .where_clause
        .as_deref()
        .map(|w| w.node_type())
        .expect("where clause")
}

#[test]
fn modulo_needs_infix_mod() {
    let sql = "SELECT a FROM t WHERE a % 2 = 0";
    assert!(parse_with(ParserConfig::default(), sql).is_ok());
    let err = parse_with(with(Features::empty()), sql).unwrap_err();
    assert!(matches!(err, SqlError::Syntax { offset: 24, .. }), "{err:?}");
}

#[test]
fn div_needs_div_operator() {
    let sql = "SELECT a DIV 2 FROM t";
    let tree = parse_with(ParserConfig::default(), sql).unwrap();
    let column = select(&tree).result_columns.children()[0];
    assert_eq!(column.children()[0].node_type(), NodeType::BinaryDiv);

    // Without the operator, DIV reads as a column alias.
    let err = parse_with(with(Features::INFIX_MOD), sql).unwrap_err();
    assert!(matches!(err, SqlError::Syntax { .. }));
}

#[test]
fn bit_operators_need_infix_bit_operators() {
    for sql in [
        "SELECT a & b FROM t",
        "SELECT a | b FROM t",
        "SELECT a << 2 FROM t",
        "SELECT ~a FROM t",
    ] {
        assert!(parse_with(ParserConfig::default(), sql).is_err(), "{sql}");
        assert!(
            parse_with(with(Features::INFIX_BIT_OPERATORS), sql).is_ok(),
            "{sql}"
        );
    }
}

#[test]
fn bit_operators_bind_tighter_than_comparisons() {
    let tree = parse_with(
        with(Features::INFIX_BIT_OPERATORS),
        "SELECT a FROM t WHERE a & 4 = 4",
    )
    .unwrap();
    let where_clause = select(&tree).where_clause.as_deref().unwrap();
    assert_eq!(where_clause.node_type(), NodeType::BinaryEquals);
    assert_eq!(where_clause.children()[0].node_type(), NodeType::BitAnd);
}

#[test]
fn logical_symbols_need_infix_logical_operators() {
    let sql = "SELECT a FROM t WHERE a = 1 && b = 2";
    assert!(parse_with(ParserConfig::default(), sql).is_err());
    let tree = parse_with(with(Features::INFIX_LOGICAL_OPERATORS), sql).unwrap();
    assert_eq!(where_type(&tree), NodeType::And);

    let sql = "SELECT a FROM t WHERE a = 1 || b = 2";
    let tree = parse_with(with(Features::INFIX_LOGICAL_OPERATORS), sql).unwrap();
    assert_eq!(where_type(&tree), NodeType::Or);
}

#[test]
fn pipes_concatenate_by_default() {
    let tree = parse("SELECT a FROM t WHERE a || 'x' = 'yx'");
    let where_clause = select(&tree).where_clause.as_deref().unwrap();
    assert_eq!(where_clause.children()[0].node_type(), NodeType::Concatenation);
}

#[test]
fn grouping_constructs_need_grouping() {
    for (sql, node_type) in [
        ("SELECT a FROM t GROUP BY ROLLUP (a, b)", NodeType::Rollup),
        ("SELECT a FROM t GROUP BY CUBE (a)", NodeType::Cube),
        (
            "SELECT a FROM t GROUP BY GROUPING SETS ((a), (b))",
            NodeType::GroupingSets,
        ),
    ] {
        let err = parse_with(ParserConfig::default(), sql).unwrap_err();
        assert!(err.to_string().contains("not enabled"), "{err}");

        let tree = parse_with(with(Features::GROUPING), sql).unwrap();
        let group_by = select(&tree).group_by.as_deref().unwrap();
        let item = group_by.children()[0];
        assert_eq!(item.children()[0].node_type(), node_type, "{sql}");
    }
}

#[test]
fn plain_group_by_needs_nothing() {
    let tree = parse_with(with(Features::empty()), "SELECT a FROM t GROUP BY a").unwrap();
    assert!(select(&tree).group_by.is_some());
}

#[test]
fn unsigned_types_need_unsigned() {
    let sql = "SELECT CAST(a AS INTEGER UNSIGNED) FROM t";
    assert!(parse_with(ParserConfig::default(), sql).is_err());

    let tree = parse_with(with(Features::UNSIGNED), sql).unwrap();
    let column = select(&tree).result_columns.children()[0];
    let NodeKind::Cast(cast) = column.children()[0].kind() else {
        panic!("Expected cast");
    };
    assert_eq!(cast.target, SqlType::new(DataType::Integer).unsigned());
}

#[test]
fn double_quotes_are_identifiers_unless_enabled() {
    let sql = "SELECT \"Mixed\" FROM t";
    let tree = parse(sql);
    let column = select(&tree).result_columns.children()[0];
    assert_eq!(column.children()[0].node_type(), NodeType::ColumnReference);

    let tree = parse_with(with(Features::DOUBLE_QUOTED_STRING), sql).unwrap();
    let column = select(&tree).result_columns.children()[0];
    assert_eq!(column.children()[0].node_type(), NodeType::VarcharConstant);
}

#[test]
fn identifier_case_policy() {
    let sql = "SELECT Col FROM Tab";
    let name = |tree: &sqlnode_core::Node| {
        let column = select(tree).result_columns.children()[0];
        match column.children()[0].kind() {
            NodeKind::ColumnReference(column) => column.column_name.clone(),
            _ => panic!("Expected column"),
        }
    };
    assert_eq!(name(&parse(sql)), "col");

    let upper = ParserConfig::new().with_identifier_case(IdentifierCase::Upper);
    assert_eq!(name(&parse_with(upper, sql).unwrap()), "COL");

    let preserve = ParserConfig::new().with_identifier_case(IdentifierCase::Preserve);
    assert_eq!(name(&parse_with(preserve, sql).unwrap()), "Col");
}

#[test]
fn identifier_ceiling_applies_to_parsed_names() {
    let config = ParserConfig::new().with_max_identifier_length(5);
    let err = parse_with(config.clone(), "SELECT a FROM longname").unwrap_err();
    assert!(matches!(err, SqlError::IdentifierTooLong { max: 5, .. }));
    assert!(parse_with(config, "SELECT a FROM short").is_ok());
}

#[test]
fn string_ceiling_applies_to_literals() {
    let config = ParserConfig::new().with_max_string_length(3);
    let err = parse_with(config, "SELECT 'long' FROM t").unwrap_err();
    assert_eq!(err, SqlError::StringTooLong { length: 4, max: 3 });
}

#[test]
fn mysql_dialect_enables_its_extensions() {
    let mut parser = SqlParser::with_dialect(&MySqlDialect).unwrap();
    let tree = parser
        .parse_statement("SELECT a & b, a DIV 2, a % 2 FROM T WHERE x = 1 && y = 2")
        .unwrap();
    assert_eq!(where_type(&tree), NodeType::And);

    let NodeKind::FromBaseTable(base) = select(&tree).from_list.children()[0].kind() else {
        panic!("Expected base table");
    };
    assert_eq!(base.table_name().map(|t| t.table.as_str()), Some("T"));
}
