mod common;

use common::*;
use sqlnode_core::{
    node_args, CollectNodes, HasNodeVisitor, Node, NodeCounter, NodeKind, NodeType, Result,
    Rewriter, SqlError, SqlParser, Variant, Visitor,
};

#[test]
fn counter_sees_every_node_in_both_orders() {
    let tree = parse(NESTED_QUERY);
    let size = tree.subtree_size();

    let mut pre = NodeCounter::new();
    let tree = tree.accept(&mut pre).unwrap();
    assert_eq!(pre.visited(), size);

    let mut post = NodeCounter::post_order();
    let tree = tree.accept(&mut post).unwrap();
    assert_eq!(post.visited(), size);
    assert_eq!(tree.subtree_size(), size);
}

#[test]
fn orders_are_mirrored_at_the_root() {
    let tree = parse(NESTED_QUERY);
    let mut pre = CollectNodes::all();
    let tree = tree.accept(&mut pre).unwrap();
    let mut post = CollectNodes::all().children_first();
    let tree = tree.accept(&mut post).unwrap();

    assert_eq!(pre.collected().first(), Some(&(tree.id(), NodeType::Cursor)));
    assert_eq!(post.collected().last(), Some(&(tree.id(), NodeType::Cursor)));

    let mut pre_ids: Vec<_> = pre.collected().to_vec();
    let mut post_ids: Vec<_> = post.collected().to_vec();
    pre_ids.sort();
    post_ids.sort();
    assert_eq!(pre_ids, post_ids);
}

#[test]
fn search_stops_at_the_first_match() {
    let tree = parse(NESTED_QUERY);
    let mut all = CollectNodes::all();
    let mut tree = tree.accept(&mut all).unwrap();

    for target in [
        NodeType::ExpressionSubquery,
        NodeType::AggregateFunction,
        NodeType::LeftOuterJoin,
        NodeType::Between,
        NodeType::IsNotNull,
    ] {
        let first = all
            .node_types()
            .iter()
            .position(|&ty| ty == target)
            .unwrap_or_else(|| panic!("{target} not in tree"));

        let mut finder = HasNodeVisitor::of_type(target);
        tree = tree.accept(&mut finder).unwrap();
        assert!(finder.has_node());
        assert_eq!(finder.found(), Some((all.collected()[first].0, target)));
        assert_eq!(finder.visited(), first + 1, "{target}");

        // The tree comes back whole after an early exit.
        let mut counter = NodeCounter::new();
        tree = tree.accept(&mut counter).unwrap();
        assert_eq!(counter.visited(), all.collected().len());
    }
}

#[test]
fn skipped_subtrees_are_not_searched() {
    let tree = parse(NESTED_QUERY);

    let mut fenced = HasNodeVisitor::of_type(NodeType::AggregateFunction)
        .skipping(|node: &Node| node.node_type() == NodeType::ExpressionSubquery);
    let tree = tree.accept(&mut fenced).unwrap();
    assert!(!fenced.has_node());

    let mut open = HasNodeVisitor::of_type(NodeType::AggregateFunction);
    tree.accept(&mut open).unwrap();
    assert!(open.has_node());
}

#[test]
fn search_with_a_closure() {
    let tree = parse(NESTED_QUERY);
    let mut finder = HasNodeVisitor::new(|node: &Node| {
        matches!(node.kind(), NodeKind::ColumnReference(column) if column.column_name == "d")
    });
    tree.accept(&mut finder).unwrap();
    assert_eq!(finder.found().map(|(_, ty)| ty), Some(NodeType::ColumnReference));
}

/// Counts nodes, treating subqueries as opaque.
struct OuterBlock {
    seen: usize,
}

impl Visitor for OuterBlock {
    fn visit(&mut self, node: Node) -> Result<Node> {
        self.seen += 1;
        Ok(node)
    }

    fn skip_children(&self, node: &Node) -> bool {
        node.variant() == Variant::Subquery
    }
}

#[test]
fn skip_children_still_visits_the_fence() {
    let tree = parse("SELECT (SELECT b FROM u) FROM t");
    let subquery_size = {
        let select = select(&tree);
        let column = select.result_columns.children()[0];
        column.children()[0].subtree_size()
    };
    let total = tree.subtree_size();

    let mut visitor = OuterBlock { seen: 0 };
    tree.accept(&mut visitor).unwrap();
    assert_eq!(visitor.seen, total - subquery_size + 1);
}

#[test]
fn rewriter_replaces_nodes_in_place() {
    let mut parser = SqlParser::default();
    let tree = parser
        .parse_statement("SELECT a FROM t WHERE b = 1 AND b < 10")
        .unwrap();
    let context = parser.context_mut();

    let mut inline = Rewriter::new(|node: Node| match node.kind() {
        NodeKind::ColumnReference(column) if column.column_name == "b" => {
            context.make_node(NodeType::IntConstant, node_args![5])
        }
        _ => Ok(node),
    });
    let tree = tree.accept(&mut inline).unwrap();

    let mut finder = HasNodeVisitor::new(|node: &Node| {
        matches!(node.kind(), NodeKind::ColumnReference(column) if column.column_name == "b")
    });
    let tree = tree.accept(&mut finder).unwrap();
    assert!(!finder.has_node());

    let mut constants = CollectNodes::new(|node: &Node| node.node_type() == NodeType::IntConstant);
    tree.accept(&mut constants).unwrap();
    assert_eq!(constants.collected().len(), 4);
}

#[test]
fn top_down_replacement_is_not_descended_into() {
    let mut parser = SqlParser::default();
    let tree = parser
        .parse_statement("SELECT a FROM t WHERE (b + 1) * 2 > 0")
        .unwrap();
    let context = parser.context_mut();

    let mut visited_after = 0;
    let mut fold = Rewriter::top_down(|node: Node| {
        if node.node_type() == NodeType::BinaryPlus {
            return context.make_node(NodeType::IntConstant, node_args![3]);
        }
        if node.node_type() == NodeType::IntConstant {
            visited_after += 1;
        }
        Ok(node)
    });
    let tree = tree.accept(&mut fold).unwrap();
    // Only `2` and `0` are reached; the folded `3` and the removed `1` are not.
    assert_eq!(visited_after, 2);

    let mut plus = HasNodeVisitor::of_type(NodeType::BinaryPlus);
    tree.accept(&mut plus).unwrap();
    assert!(!plus.has_node());
}

/// Fails on the first parameter it meets.
struct RejectParameters;

impl Visitor for RejectParameters {
    fn visit(&mut self, node: Node) -> Result<Node> {
        if node.node_type() == NodeType::Parameter {
            return Err(SqlError::Config(String::from("parameters not allowed")));
        }
        Ok(node)
    }
}

#[test]
fn visitor_errors_abort_the_traversal() {
    let tree = parse("SELECT a FROM t WHERE a = ?");
    let result = tree.accept(&mut RejectParameters);
    assert!(result.is_err());

    let tree = parse("SELECT a FROM t WHERE a = 1");
    assert!(tree.accept(&mut RejectParameters).is_ok());
}
