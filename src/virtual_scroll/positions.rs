//! Position calculator
//!
//! Walks the visible node forest depth-first, pre-order, assigning each node
//! its offset from the top of the virtual content and the pixel span of its
//! laid-out subtree. Stateless and idempotent for an unchanged tree.

use crate::model::{NodeId, Pixels, TreeState};
use tracing::debug;

/// Recompute `position` / `height` for every node reachable through
/// expanded branches of the visible roots, and set the virtual root's
/// height to the total.
///
/// Returns the total content height. With no virtual root the node offsets
/// are still assigned and the total is returned, but nothing stores it.
pub fn recalc_positions<T>(tree: &mut T) -> Pixels
where
    T: TreeState + ?Sized,
{
    let roots = tree.visible_roots();
    let total = position_after(tree, &roots, 0.0);

    if let Some(root) = tree.virtual_root_mut() {
        root.set_height(total);
    }

    debug!(roots = roots.len(), total_height = total, "recalculated positions");
    total
}

/// Lay out a sibling list starting at `start`; return the offset after the last sibling.
///
/// Ids that do not resolve to a node are skipped.
pub fn position_after<T>(tree: &mut T, nodes: &[NodeId], start: Pixels) -> Pixels
where
    T: TreeState + ?Sized,
{
    let mut position = start;
    for &id in nodes {
        if let Some(node) = tree.node_mut(id) {
            node.set_position(position);
        } else {
            continue;
        }
        position = position_after_node(tree, id, position);
    }
    position
}

fn position_after_node<T>(tree: &mut T, id: NodeId, start: Pixels) -> Pixels
where
    T: TreeState + ?Sized,
{
    let Some(node) = tree.node(id) else {
        return start;
    };
    let mut position = start + node.self_height();

    if node.lays_out_children() {
        let children = node.visible_children().to_vec();
        position = position_after(tree, &children, position);
    }

    if let Some(node) = tree.node_mut(id) {
        node.set_height(position - start);
    }
    position
}
