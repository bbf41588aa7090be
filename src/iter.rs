use std::collections::VecDeque;
use std::iter::FusedIterator;

use crate::node::{Node, NodeId};
use crate::tree::Tree;

/// Depth-first iterator over the nodes of a [`Tree`], created by [`Tree::dfs_iter`].
///
/// Yields the root first and explores left subtrees before right ones. Uses an explicit stack so
/// degenerate trees don't exhaust the call stack.
pub struct Dfs<'a, K> {
    tree: &'a Tree<K>,
    stack: Vec<NodeId>,
}

impl<'a, K> Dfs<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self {
            tree,
            stack: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Dfs<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.node(self.stack.pop()?);
        // Right goes on first so left comes off first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node)
    }
}

impl<K> FusedIterator for Dfs<'_, K> {}

/// Breadth-first iterator over the nodes of a [`Tree`], created by [`Tree::bfs_iter`].
///
/// Yields the nodes level by level from the root, left to right within each level.
pub struct Bfs<'a, K> {
    tree: &'a Tree<K>,
    queue: VecDeque<NodeId>,
}

impl<'a, K> Bfs<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self {
            tree,
            queue: tree.root().into_iter().collect(),
        }
    }
}

impl<'a, K> Iterator for Bfs<'a, K> {
    type Item = &'a Node<K>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        let node = tree.node(self.queue.pop_front()?);
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node)
    }
}

impl<K> FusedIterator for Bfs<'_, K> {}

/// Ascending iterator over the keys of a [`Tree`], created by [`Tree::iter`].
///
/// Steps between nodes with [`Tree::next`] and [`Tree::prev`], so no stack is kept.
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>) -> Self {
        Self {
            tree,
            front: tree.min(),
            back: tree.max(),
            remaining: tree.len(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.front?;
        self.front = tree.next(id);
        self.remaining -= 1;
        Some(tree.key(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let tree = self.tree;
        let id = self.back?;
        self.back = tree.prev(id);
        self.remaining -= 1;
        Some(tree.key(id))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}

impl<K> FusedIterator for Iter<'_, K> {}
