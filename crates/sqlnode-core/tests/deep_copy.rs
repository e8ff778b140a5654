mod common;

use std::collections::HashSet;

use common::*;
use sqlnode_core::ast::NumericValue;
use sqlnode_core::{CollectNodes, Node, NodeKind, NodeType, ParserContext, Rewriter, SqlParser};

fn ids(tree: Node) -> (Node, HashSet<u64>) {
    let mut all = CollectNodes::all();
    let tree = tree.accept(&mut all).unwrap();
    let ids = all.collected().iter().map(|(id, _)| id.get()).collect();
    (tree, ids)
}

fn column_names(tree: Node) -> (Node, Vec<String>) {
    let mut names = Vec::new();
    let mut collect = Rewriter::top_down(|node: Node| {
        if let NodeKind::ColumnReference(column) = node.kind() {
            names.push(column.column_name.clone());
        }
        Ok(node)
    });
    let tree = tree.accept(&mut collect).unwrap();
    (tree, names)
}

#[test]
fn copy_of_every_node_type_is_equivalent() {
    let mut ctx = ParserContext::default();
    for &node_type in NodeType::ALL {
        let args = valid_args(&mut ctx, node_type);
        let original = node(&mut ctx, node_type, args);
        let copy = ctx.copy_node(&original);
        assert_eq!(copy.node_type(), node_type);
        assert_ne!(copy.id(), original.id());
        assert_eq!(copy.subtree_size(), original.subtree_size());
        assert!(copy.is_equivalent(&original), "{node_type}");
        assert!(original.is_equivalent(&copy), "{node_type}");
    }
}

#[test]
fn copy_shares_no_node_with_the_original() {
    let mut parser = SqlParser::default();
    let original = parser.parse_statement(NESTED_QUERY).unwrap();
    let copy = parser.context_mut().copy_node(&original);

    let (_, original_ids) = ids(original);
    let (_, copy_ids) = ids(copy);
    assert_eq!(original_ids.len(), copy_ids.len());
    assert!(original_ids.is_disjoint(&copy_ids));
}

#[test]
fn editing_the_copy_leaves_the_original_alone() {
    let mut parser = SqlParser::default();
    let original = parser
        .parse_statement("SELECT a, b + 1 FROM t WHERE c = 2")
        .unwrap();
    let copy = parser.context_mut().copy_node(&original);

    let mut rename = Rewriter::new(|mut node: Node| {
        match node.kind_mut() {
            NodeKind::ColumnReference(column) => column.column_name = String::from("z"),
            NodeKind::NumericConstant(constant) => constant.value = NumericValue::Integer(99),
            _ => {}
        }
        Ok(node)
    });
    let copy = copy.accept(&mut rename).unwrap();

    let (original, original_names) = column_names(original);
    let (copy, copy_names) = column_names(copy);
    assert_eq!(original_names, vec!["a", "b", "c"]);
    assert_eq!(copy_names, vec!["z", "z", "z"]);
    assert!(!copy.is_equivalent(&original));

    let where_clause = select(&original).where_clause.as_deref().unwrap();
    let NodeKind::BinaryComparison(comparison) = where_clause.kind() else {
        panic!("Expected comparison");
    };
    assert!(matches!(
        comparison.right.kind(),
        NodeKind::NumericConstant(c) if c.value == NumericValue::Integer(2)
    ));
}

#[test]
fn copy_keeps_source_spans() {
    let mut parser = SqlParser::default();
    let original = parser.parse_statement("SELECT a FROM t").unwrap();
    let copy = parser.context_mut().copy_node(&original);

    let table = |tree: &Node| {
        let from = &select(tree).from_list;
        let NodeKind::FromBaseTable(base) = from.children()[0].kind() else {
            panic!("Expected base table");
        };
        base.table.span()
    };
    assert!(table(&original).is_some());
    assert_eq!(table(&original), table(&copy));
}

#[test]
fn copy_with_a_fresh_context_factory() {
    let original = parse("SELECT COUNT(*) FROM t GROUP BY a HAVING COUNT(*) > 1");
    let mut ctx = ParserContext::default();
    let copy = ctx.copy_node(&original);
    assert!(copy.is_equivalent(&original));
    let expected = u64::try_from(original.subtree_size()).unwrap();
    assert_eq!(ctx.factory().nodes_created(), expected);
}
