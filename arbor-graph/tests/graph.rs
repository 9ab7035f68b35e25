use arbor_graph::{GraphError, NodeGraph, Value};

#[test]
fn add_appends_and_sets_parent() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(root, b).unwrap();

    assert_eq!(g.children(root), &[a, b]);
    assert_eq!(g.parent(a), Some(root));
    assert_eq!(g.parent(b), Some(root));
}

#[test]
fn add_moves_a_child_between_parents() {
    let mut g = NodeGraph::new();
    let first = g.node("first");
    let second = g.node("second");
    let child = g.node("child");
    g.add(first, child).unwrap();
    g.add(second, child).unwrap();

    assert!(g.children(first).is_empty());
    assert_eq!(g.children(second), &[child]);
    assert_eq!(g.parent(child), Some(second));
}

#[test]
fn a_child_appears_exactly_once_after_readding() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(root, b).unwrap();
    // Re-adding moves the node to the end instead of duplicating it.
    g.add(root, a).unwrap();

    assert_eq!(g.children(root), &[b, a]);
}

#[test]
fn attaching_under_a_descendant_is_a_cycle_error() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let child = g.node("child");
    g.add(root, child).unwrap();

    assert!(matches!(g.add(child, root), Err(GraphError::Cycle { .. })));
    assert!(matches!(g.add(root, root), Err(GraphError::Cycle { .. })));
}

#[test]
fn insert_places_at_position() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let c = g.node("c");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(root, c).unwrap();
    g.insert(root, 1, b).unwrap();

    assert_eq!(g.children(root), &[a, b, c]);
}

#[test]
fn insert_before_and_after_anchor_on_the_sibling() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let mid = g.node("mid");
    g.add(root, mid).unwrap();
    let before = g.node("before");
    let after = g.node("after");
    g.insert_before(mid, before).unwrap();
    g.insert_after(mid, after).unwrap();

    assert_eq!(g.children(root), &[before, mid, after]);
    assert_eq!(g.previous(mid), Some(before));
    assert_eq!(g.next(mid), Some(after));
}

#[test]
fn sibling_insertion_on_a_root_fails() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let other = g.node("other");

    assert!(matches!(
        g.insert_before(root, other),
        Err(GraphError::NoParent { .. })
    ));
    assert!(matches!(
        g.insert_after(root, other),
        Err(GraphError::NoParent { .. })
    ));
}

#[test]
fn insert_before_within_the_same_parent_accounts_for_the_move() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let b = g.node("b");
    let c = g.node("c");
    g.add(root, a).unwrap();
    g.add(root, b).unwrap();
    g.add(root, c).unwrap();
    // Move c in front of a.
    g.insert_before(a, c).unwrap();

    assert_eq!(g.children(root), &[c, a, b]);
}

#[test]
fn detach_clears_the_parent_link_and_tolerates_detached_nodes() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let child = g.node("child");
    g.add(root, child).unwrap();

    g.detach(child);
    assert!(g.children(root).is_empty());
    assert_eq!(g.parent(child), None);

    // Detaching again is a no-op.
    g.detach(child);
    assert_eq!(g.parent(child), None);
}

#[test]
fn clear_detaches_every_child() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(root, b).unwrap();

    g.clear(root);
    assert!(g.children(root).is_empty());
    assert_eq!(g.parent(a), None);
    assert_eq!(g.parent(b), None);
}

#[test]
fn siblings_navigate_in_both_directions() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(root, b).unwrap();

    assert_eq!(g.previous(a), None);
    assert_eq!(g.next(a), Some(b));
    assert_eq!(g.previous(b), Some(a));
    assert_eq!(g.next(b), None);
    assert_eq!(g.previous(root), None);
    assert_eq!(g.next(root), None);
}

#[test]
fn root_walks_to_the_topmost_ancestor() {
    let mut g = NodeGraph::new();
    let top = g.node("top");
    let mid = g.node("mid");
    let leaf = g.node("leaf");
    g.add(top, mid).unwrap();
    g.add(mid, leaf).unwrap();

    assert_eq!(g.root(leaf), top);
    assert_eq!(g.root(top), top);
}

#[test]
fn descendants_visit_pre_order_self_first() {
    let mut g = NodeGraph::new();
    let root = g.node("root");
    let a = g.node("a");
    let a1 = g.node("a1");
    let b = g.node("b");
    g.add(root, a).unwrap();
    g.add(a, a1).unwrap();
    g.add(root, b).unwrap();

    let order: Vec<_> = g.descendants(root).collect();
    assert_eq!(order, vec![root, a, a1, b]);
}

#[test]
fn clone_subtree_shares_no_identity_with_the_original() {
    let mut g = NodeGraph::new();
    let root = g.node_with("root", 1i64);
    let child = g.node_with("child", "payload");
    g.add(root, child).unwrap();

    let copy = g.clone_subtree(root);
    assert_ne!(copy, root);
    assert_eq!(g.name(copy), "root");
    assert_eq!(g.parent(copy), None);
    assert_eq!(g.children(copy).len(), 1);
    let copy_child = g.children(copy)[0];
    assert_ne!(copy_child, child);
    assert_eq!(g.value(copy_child), &Value::Str("payload".into()));

    // Mutating the copy leaves the original untouched.
    g.set_name(copy_child, "renamed");
    let extra = g.node("extra");
    g.add(copy, extra).unwrap();
    assert_eq!(g.name(child), "child");
    assert_eq!(g.children(root).len(), 1);
}

#[test]
fn clone_subtree_deep_copies_node_typed_values() {
    let mut g = NodeGraph::new();
    let inner = g.node_with("inner", 42i64);
    let holder = g.node_with("holder", Value::Node(inner));

    let copy = g.clone_subtree(holder);
    let copied_inner = match g.value(copy) {
        Value::Node(id) => *id,
        other => panic!("clone lost the node-typed value: {other:?}"),
    };
    assert_ne!(copied_inner, inner);
    assert_eq!(g.value(copied_inner), &Value::Int(42));

    g.set_value(copied_inner, 7i64);
    assert_eq!(g.value(inner), &Value::Int(42));
}
