//! The cells a [`Tree`][crate::Tree] is built from.
//!
//! Nodes are owned by the tree's arena. Links between them are [`NodeId`]s: `left` and `right`
//! form the strict ownership hierarchy, `parent` is a back-reference used only to walk upwards.

use std::fmt;

/// A handle to a node of one particular [`Tree`][crate::Tree].
///
/// Handles are cheap to copy and stay valid for as long as the node they name is in the tree, no
/// matter what else is inserted or deleted. Once the node is deleted the handle is stale for good:
/// the tree never hands the same id out again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    pub(crate) tree: usize,
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl NodeId {
    /// The same slot, owned by the tree tagged `tree`.
    pub(crate) fn retag(self, tree: usize) -> Self {
        Self { tree, ..self }
    }
}

pub(crate) type Link = Option<NodeId>;

/// A single key of a [`Tree`][crate::Tree] together with its links.
pub struct Node<K> {
    pub(crate) id: NodeId,
    pub(crate) key: K,
    pub(crate) parent: Link,
    pub(crate) left: Link,
    pub(crate) right: Link,
}

impl<K: Clone> Clone for Node<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            key: self.key.clone(),
            parent: self.parent,
            left: self.left,
            right: self.right,
        }
    }
}

impl<K> fmt::Debug for Node<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("key", &self.key)
            .field("parent", &self.parent)
            .field("left", &self.left)
            .field("right", &self.right)
            .finish()
    }
}

impl<K> Node<K> {
    pub(crate) fn new_leaf(id: NodeId, key: K, parent: Link) -> Self {
        Self {
            id,
            key,
            parent,
            left: None,
            right: None,
        }
    }

    /// Moves every link of this node into the tree tagged `tree`.
    pub(crate) fn retag(&mut self, tree: usize) {
        self.id = self.id.retag(tree);
        self.parent = self.parent.map(|id| id.retag(tree));
        self.left = self.left.map(|id| id.retag(tree));
        self.right = self.right.map(|id| id.retag(tree));
    }

    /// The handle naming this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The key stored in this node.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The node this one hangs from, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// The root of the subtree holding every smaller key below this node.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// The root of the subtree holding every larger key below this node.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Whether this node has a left child.
    pub fn has_left_child(&self) -> bool {
        self.left.is_some()
    }

    /// Whether this node has a right child.
    pub fn has_right_child(&self) -> bool {
        self.right.is_some()
    }

    /// Whether this node has at least one child. Nodes without any are leaves.
    pub fn has_any_children(&self) -> bool {
        self.has_left_child() || self.has_right_child()
    }

    /// Whether this node has both children.
    pub fn has_both_children(&self) -> bool {
        self.has_left_child() && self.has_right_child()
    }

    /// Whether this node is the root of its tree. Only the root has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
