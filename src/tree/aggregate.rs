use std::cmp::Ordering;

use super::arena::{DataTree, NodeId};

/// Compute aggregated values and heights for all category nodes (bottom-up).
/// After this, each category's `value` equals the sum of all descendant leaf values.
pub fn aggregate_values(tree: &mut DataTree) {
    // Children always have higher indices than their parents (pre-order insertion),
    // so walking the arena backwards visits every child before its parent.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        if tree.nodes[i].is_leaf {
            tree.nodes[i].height = 0;
            continue;
        }

        let mut total = 0.0;
        let mut height = 0u16;
        let mut has_children = false;
        let mut child = tree.nodes[i].first_child;
        while let Some(child_id) = child {
            let c = &tree.nodes[child_id.index()];
            total += c.value;
            height = height.max(c.height + 1);
            has_children = true;
            child = c.next_sibling;
        }
        tree.nodes[i].value = total;
        tree.nodes[i].height = if has_children { height } else { 0 };
    }
}

/// Packing order among siblings: taller subtrees first, then larger values.
/// Ties keep document order.
pub fn sibling_order(tree: &DataTree, a: NodeId, b: NodeId) -> Ordering {
    let (a, b) = (tree.get(a), tree.get(b));
    b.height
        .cmp(&a.height)
        .then_with(|| b.value.total_cmp(&a.value))
}

/// Sort children of each category node by [`sibling_order`].
/// This re-links the sibling list without moving nodes in the arena.
pub fn sort_children(tree: &mut DataTree) {
    let len = tree.nodes.len();
    for i in 0..len {
        if tree.nodes[i].first_child.is_none() {
            continue;
        }

        let mut children: Vec<NodeId> = tree.children(NodeId(i as u32)).collect();
        // Stable: equal keys stay in document order
        let view: &DataTree = tree;
        children.sort_by(|&a, &b| sibling_order(view, a, b));

        tree.nodes[i].first_child = children.first().copied();
        tree.nodes[i].last_child = children.last().copied();
        for w in children.windows(2) {
            tree.nodes[w[0].index()].next_sibling = Some(w[1]);
        }
        if let Some(&last) = children.last() {
            tree.nodes[last.index()].next_sibling = None;
        }
    }
}
