mod common;

use common::*;
use sqlnode_core::{node_args, NodeArg, NodeType, ParserContext};

#[test]
fn every_node_type_is_reflexive() {
    let mut ctx = ParserContext::default();
    for &node_type in NodeType::ALL {
        let args = valid_args(&mut ctx, node_type);
        let node = node(&mut ctx, node_type, args);
        assert!(node.is_equivalent(&node), "{node_type}");
    }
}

#[test]
fn nodes_of_different_types_are_never_equivalent() {
    let mut ctx = ParserContext::default();
    let nodes: Vec<_> = NodeType::ALL
        .iter()
        .map(|&node_type| {
            let args = valid_args(&mut ctx, node_type);
            node(&mut ctx, node_type, args)
        })
        .collect();
    for left in &nodes {
        for right in &nodes {
            if left.node_type() != right.node_type() {
                assert!(
                    !left.is_equivalent(right),
                    "{} vs {}",
                    left.node_type(),
                    right.node_type()
                );
            }
        }
    }
}

#[test]
fn operator_tag_decides_between_shared_variants() {
    let mut ctx = ParserContext::default();
    let a = column(&mut ctx, "a");
    let one = int(&mut ctx, 1);
    let equals = node(&mut ctx, NodeType::BinaryEquals, node_args![a, one]);
    let a = column(&mut ctx, "a");
    let one = int(&mut ctx, 1);
    let less = node(&mut ctx, NodeType::BinaryLessThan, node_args![a, one]);
    assert_eq!(equals.variant(), less.variant());
    assert!(!equals.is_equivalent(&less));
}

#[test]
fn constants_compare_by_tag_and_value() {
    let mut ctx = ParserContext::default();
    let int_one = int(&mut ctx, 1);
    let other_int_one = int(&mut ctx, 1);
    let int_two = int(&mut ctx, 2);
    let long_one = node(&mut ctx, NodeType::LongintConstant, node_args![1]);
    assert!(int_one.is_equivalent(&other_int_one));
    assert!(!int_one.is_equivalent(&int_two));
    assert!(!int_one.is_equivalent(&long_one));

    let null = node(&mut ctx, NodeType::UntypedNullConstant, node_args![]);
    let other_null = node(&mut ctx, NodeType::UntypedNullConstant, node_args![]);
    assert!(null.is_equivalent(&other_null));

    let nan = node(&mut ctx, NodeType::DoubleConstant, node_args![f64::NAN]);
    assert!(nan.is_equivalent(&nan));
}

#[test]
fn column_references_compare_qualifiers_when_unbound() {
    let mut ctx = ParserContext::default();
    let t = table_name(&mut ctx, "t");
    let qualified = node(&mut ctx, NodeType::ColumnReference, node_args!["a", t]);
    let t = table_name(&mut ctx, "t");
    let same = node(&mut ctx, NodeType::ColumnReference, node_args!["a", t]);
    let u = table_name(&mut ctx, "u");
    let other = node(&mut ctx, NodeType::ColumnReference, node_args!["a", u]);
    let bare = column(&mut ctx, "a");
    assert!(qualified.is_equivalent(&same));
    assert!(!qualified.is_equivalent(&other));
    assert!(!qualified.is_equivalent(&bare));
}

#[test]
fn source_positions_do_not_matter() {
    let mut ctx = ParserContext::default();
    let early = node(
        &mut ctx,
        NodeType::ColumnReference,
        node_args!["a", NodeArg::Null, 0, 1],
    );
    let late = node(
        &mut ctx,
        NodeType::ColumnReference,
        node_args!["a", NodeArg::Null, 40, 41],
    );
    assert!(early.is_equivalent(&late));
}

#[test]
fn function_names_are_case_insensitive() {
    let mut ctx = ParserContext::default();
    let x = column(&mut ctx, "x");
    let arguments = values(&mut ctx, vec![x]);
    let lower = node(&mut ctx, NodeType::FunctionCall, node_args!["lower", arguments]);
    let x = column(&mut ctx, "x");
    let arguments = values(&mut ctx, vec![x]);
    let upper = node(&mut ctx, NodeType::FunctionCall, node_args!["LOWER", arguments]);
    assert!(lower.is_equivalent(&upper));

    let x = column(&mut ctx, "x");
    let arguments = values(&mut ctx, vec![x]);
    let distinct = node(
        &mut ctx,
        NodeType::AggregateFunction,
        node_args!["count", arguments, true],
    );
    let x = column(&mut ctx, "x");
    let arguments = values(&mut ctx, vec![x]);
    let all = node(
        &mut ctx,
        NodeType::AggregateFunction,
        node_args!["count", arguments, false],
    );
    assert!(!distinct.is_equivalent(&all));
}

#[test]
fn parsed_statements_compare_structurally() {
    let first = parse("SELECT a + 1 FROM t WHERE b = ?");
    let second = parse("select  A+1\nfrom T where B = ?");
    let third = parse("SELECT a + 2 FROM t WHERE b = ?");
    assert!(first.is_equivalent(&second));
    assert!(!first.is_equivalent(&third));
}
