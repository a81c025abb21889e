//! Horizontal layout for a chart tree.
//!
//! The pass runs in two phases:
//! 1. [`compute_footprint`] — post-order: each node learns how wide its
//!    subtree is and spreads its children left-to-right, centered as a
//!    group on the node's own local origin.
//! 2. [`Tree::move_to`] on the root — top-down: the relative sibling
//!    offsets established in phase 1 are flattened into absolute
//!    coordinates by re-anchoring the root at 0.

use crate::tree::Tree;
use crate::types::{NodeId, ROOT};

/// Assigns a final horizontal position to every node in the tree.
pub fn layout(tree: &mut Tree) {
    compute_footprint(tree, ROOT);
    tree.move_to(ROOT, 0.0);
}

/// Computes the footprint of `id`'s subtree and positions its children.
///
/// For each child, in order, the child's own footprint `w` is computed
/// recursively. The child is then shifted by `(w - total) / 2 + used`,
/// where `total` is the sum of all sibling footprints and `used` the sum
/// of the footprints already placed: children end up contiguous, each
/// centered inside its allocated slot, with the whole row centered on 0
/// relative to the parent.
///
/// Returns `max(total, 1)` — a node always claims at least one layout
/// unit, so childless siblings never collide.
pub fn compute_footprint(tree: &mut Tree, id: NodeId) -> f32 {
    let count = tree.nodes[id].children.len();
    let mut widths = Vec::with_capacity(count);
    let mut total = 0.0;
    for i in 0..count {
        let child = tree.nodes[id].children[i];
        let w = compute_footprint(tree, child);
        widths.push(w);
        total += w;
    }

    let mut used = 0.0;
    for i in 0..count {
        let child = tree.nodes[id].children[i];
        tree.shift_by(child, (widths[i] - total) / 2.0 + used);
        used += widths[i];
    }

    total.max(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf_row(n: usize) -> Tree {
        let mut tree = Tree::new("root", "Root", "", None);
        for i in 0..n {
            let key = format!("c{i}");
            tree.add_child(ROOT, &key, &key, "", None);
        }
        tree
    }

    #[test]
    fn leaf_footprint_is_one() {
        let mut tree = Tree::new("root", "Root", "", None);
        assert_eq!(compute_footprint(&mut tree, ROOT), 1.0);
    }

    #[test]
    fn footprint_is_at_least_sum_of_children() {
        let mut tree = leaf_row(3);
        assert_eq!(compute_footprint(&mut tree, ROOT), 3.0);

        let mut single = leaf_row(1);
        // One child sums to 1, and the minimum also holds.
        assert_eq!(compute_footprint(&mut single, ROOT), 1.0);
    }

    #[test]
    fn sibling_leaves_are_centered_around_the_root() {
        let mut tree = leaf_row(3);
        layout(&mut tree);

        assert_eq!(tree.nodes[ROOT].pos, 0.0);
        assert_eq!(tree.nodes[1].pos, -1.0);
        assert_eq!(tree.nodes[2].pos, 0.0);
        assert_eq!(tree.nodes[3].pos, 1.0);
    }

    #[test]
    fn even_sibling_count_straddles_the_center() {
        let mut tree = leaf_row(4);
        layout(&mut tree);

        let got: Vec<f32> = (1..=4).map(|id| tree.nodes[id].pos).collect();
        assert_eq!(got, vec![-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn children_sit_in_contiguous_centered_slots() {
        // Root with two children: one wide (three leaves) and one leaf.
        let mut tree = Tree::new("root", "Root", "", None);
        let wide = tree.add_child(ROOT, "wide", "", "", None);
        let narrow = tree.add_child(ROOT, "narrow", "", "", None);
        for i in 0..3 {
            let key = format!("w{i}");
            tree.add_child(wide, &key, "", "", None);
        }
        layout(&mut tree);

        // Footprints: wide = 3, narrow = 1, total = 4.
        // Slot formula: pos = sum(widths before) + w/2 - total/2.
        assert_eq!(tree.nodes[wide].pos, 3.0 / 2.0 - 2.0);
        assert_eq!(tree.nodes[narrow].pos, 3.0 + 0.5 - 2.0);

        // The wide child's own leaves are centered under it.
        let leaves: Vec<f32> = tree.nodes[wide]
            .children
            .iter()
            .map(|&c| tree.nodes[c].pos - tree.nodes[wide].pos)
            .collect();
        assert_eq!(leaves, vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn sibling_subtrees_never_overlap() {
        // Three subtrees of different widths under the root.
        let mut tree = Tree::new("root", "Root", "", None);
        for (c, leaves) in [("a", 2), ("b", 1), ("c", 3)] {
            let child = tree.add_child(ROOT, c, "", "", None);
            for i in 0..leaves {
                let key = format!("{c}{i}");
                tree.add_child(child, &key, "", "", None);
            }
        }
        layout(&mut tree);

        // Collect each subtree's [min, max] leaf extent, padded by the
        // half-unit a leaf claims on each side.
        let mut extents = Vec::new();
        for &child in &tree.nodes[ROOT].children {
            let mut lo = tree.nodes[child].pos;
            let mut hi = tree.nodes[child].pos;
            for &leaf in &tree.nodes[child].children {
                lo = lo.min(tree.nodes[leaf].pos);
                hi = hi.max(tree.nodes[leaf].pos);
            }
            extents.push((lo - 0.5, hi + 0.5));
        }

        for pair in extents.windows(2) {
            assert!(
                pair[0].1 <= pair[1].0 + 1e-6,
                "subtrees overlap: {:?}",
                pair
            );
        }
    }

    #[test]
    fn layout_is_stable_when_run_twice() {
        let mut tree = Tree::new("root", "Root", "", None);
        let a = tree.add_child(ROOT, "a", "", "", None);
        tree.add_child(ROOT, "b", "", "", None);
        tree.add_child(a, "a0", "", "", None);
        tree.add_child(a, "a1", "", "", None);

        layout(&mut tree);
        let first: Vec<f32> = tree.nodes.iter().map(|n| n.pos).collect();
        layout(&mut tree);
        let second: Vec<f32> = tree.nodes.iter().map(|n| n.pos).collect();
        assert_eq!(first, second);
    }
}
