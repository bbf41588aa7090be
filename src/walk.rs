//! Upward and downward walks used by successor/predecessor navigation.
//!
//! All of these are loops rather than recursion: the tree is never rebalanced, so sorted
//! insertion degrades it to a list and its height to its size.

use crate::node::NodeId;
use crate::tree::Tree;

/// The closest ancestor of `id` that holds it in its left subtree, i.e. the first ancestor reached
/// by climbing out of a left-child position. `None` if `id` only ever climbs out of right-child
/// positions, which makes it the maximum of the tree.
pub(crate) fn right_ancestor<K>(tree: &Tree<K>, id: NodeId) -> Option<NodeId> {
    let mut current = id;
    loop {
        let parent = tree.node(current).parent?;
        if tree.node(parent).left == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
}

/// Mirror of [`right_ancestor`]: the first ancestor reached by climbing out of a right-child
/// position.
pub(crate) fn left_ancestor<K>(tree: &Tree<K>, id: NodeId) -> Option<NodeId> {
    let mut current = id;
    loop {
        let parent = tree.node(current).parent?;
        if tree.node(parent).right == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
}

/// The left-most node of the subtree rooted at `id`, i.e. its minimum.
pub(crate) fn left_descendant<K>(tree: &Tree<K>, id: NodeId) -> NodeId {
    let mut current = id;
    while let Some(left) = tree.node(current).left {
        current = left;
    }
    current
}

/// The right-most node of the subtree rooted at `id`, i.e. its maximum.
pub(crate) fn right_descendant<K>(tree: &Tree<K>, id: NodeId) -> NodeId {
    let mut current = id;
    while let Some(right) = tree.node(current).right {
        current = right;
    }
    current
}
