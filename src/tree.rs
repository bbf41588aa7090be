//! An unbalanced BST whose nodes know their parents. Parent links make in-order navigation
//! (successor, predecessor, ranges and nearest neighbours) possible from any node without a
//! stack, and node handles stay valid across unrelated insertions and deletions.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert_eq!(tree.find(&1), None);
//!
//! tree.insert_all(vec![20, 10, 30]);
//! let ten = tree.find(&10).unwrap();
//! assert_eq!(tree.key(ten), &10);
//!
//! // Walk to the neighbours of a node.
//! let twenty = tree.next(ten).unwrap();
//! assert_eq!(tree.key(twenty), &20);
//! assert_eq!(tree.prev(ten), None);
//!
//! // Deleting a node returns its key.
//! assert_eq!(tree.delete(twenty), 20);
//! assert_eq!(tree.keys(), vec![10, 30]);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::ops::Index;
use std::sync::atomic::{AtomicUsize, Ordering as AtomicOrdering};

use log::{debug, trace};

use crate::error::NodeError;
use crate::iter::{Bfs, Dfs, Iter};
use crate::node::{Link, Node, NodeId};
use crate::util::Side;
use crate::walk;

/// Source of the tags that tie a [`NodeId`] to the tree that issued it.
static NEXT_TAG: AtomicUsize = AtomicUsize::new(0);

fn fresh_tag() -> usize {
    NEXT_TAG.fetch_add(1, AtomicOrdering::Relaxed)
}

/// The outcome of a root-to-leaf descent looking for a key.
pub(crate) enum Search {
    /// The key is stored in this node.
    Found(NodeId),
    /// The key is absent. Holds the last node visited, which is where the key would be attached,
    /// or `None` if the tree is empty.
    NotFound(Link),
}

/// One arena cell. `generation` is bumped every time the cell is vacated so stale handles to it
/// can be told apart from the node living there now.
struct Slot<K> {
    generation: u32,
    node: Option<Node<K>>,
}

impl<K: Clone> Clone for Slot<K> {
    fn clone(&self) -> Self {
        Self {
            generation: self.generation,
            node: self.node.clone(),
        }
    }
}

/// An unbalanced Binary Search Tree of unique keys. Nodes carry a link to their parent so the
/// tree can be navigated in key order from any node.
///
/// Operations that locate a key take `O(height)`. Nothing rebalances the tree, so inserting keys
/// in sorted order yields a height equal to the number of keys.
pub struct Tree<K> {
    tag: usize,
    slots: Vec<Slot<K>>,
    vacant: Vec<usize>,
    root: Link,
    size: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Tree<K>
where
    K: Clone,
{
    /// Copies every node into a tree with its own tag. Handles into `self` are not valid for the
    /// copy.
    fn clone(&self) -> Self {
        let tag = fresh_tag();
        let slots = self
            .slots
            .iter()
            .map(|slot| {
                let mut slot = slot.clone();
                if let Some(node) = slot.node.as_mut() {
                    node.retag(tag);
                }
                slot
            })
            .collect();

        Self {
            tag,
            slots,
            vacant: self.vacant.clone(),
            root: self.root.map(|id| id.retag(tag)),
            size: self.size,
        }
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree")
            .field("root", &self.root.map(|id| self.key(id)))
            .field("size", &self.size)
            .finish()
    }
}

impl<K> Index<NodeId> for Tree<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        self.node(id)
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(keys: I) -> Self {
        let mut tree = Self::new();
        tree.insert_all(keys);
        tree
    }
}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, keys: I) {
        self.insert_all(keys);
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

impl<K> Tree<K> {
    /// Generate a new, empty `Tree`.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Generate a new, empty `Tree` with room for `capacity` nodes before reallocating.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tag: fresh_tag(),
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
            root: None,
            size: 0,
        }
    }

    /// Generate a `Tree` holding just `key` as its root.
    pub fn with_root(key: K) -> Self {
        let mut tree = Self::new();
        let root = tree.alloc(key, None);
        tree.root = Some(root);
        tree.size = 1;
        tree
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// The root node, if the tree isn't empty.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Checks that `id` names a node currently in this tree and returns it.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::{NodeError, Tree};
    ///
    /// let mut tree = Tree::with_root(1);
    /// let one = tree.root().unwrap();
    /// assert_eq!(tree.get(one).map(|n| *n.key()), Ok(1));
    ///
    /// tree.delete(one);
    /// assert_eq!(tree.get(one).map(|n| *n.key()), Err(NodeError::Deleted(one)));
    /// ```
    pub fn get(&self, id: NodeId) -> Result<&Node<K>, NodeError> {
        if id.tree != self.tag {
            return Err(NodeError::ForeignTree(id));
        }
        let slot = self.slots.get(id.index).ok_or(NodeError::OutOfBounds(id))?;
        match slot.node.as_ref() {
            Some(node) if slot.generation == id.generation => Ok(node),
            _ => Err(NodeError::Deleted(id)),
        }
    }

    /// The node named by `id`.
    ///
    /// ## Panics
    ///
    /// When `id` doesn't name a node of this tree; see [`NodeError`].
    pub fn node(&self, id: NodeId) -> &Node<K> {
        match self.get(id) {
            Ok(node) => node,
            Err(err) => panic!("{}", err),
        }
    }

    /// The key stored in the node named by `id`.
    ///
    /// ## Panics
    ///
    /// When `id` doesn't name a node of this tree; see [`NodeError`].
    pub fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    /// Whether the node named by `id` is its parent's left child.
    pub fn is_left_child(&self, id: NodeId) -> bool {
        matches!(self.side_of(id), Some((_, Side::Left)))
    }

    /// Whether the node named by `id` is its parent's right child.
    pub fn is_right_child(&self, id: NodeId) -> bool {
        matches!(self.side_of(id), Some((_, Side::Right)))
    }

    /// The node with the smallest key, found by descending left from the root.
    pub fn min(&self) -> Option<NodeId> {
        self.root.map(|root| walk::left_descendant(self, root))
    }

    /// The node with the largest key, found by descending right from the root.
    pub fn max(&self) -> Option<NodeId> {
        self.root.map(|root| walk::right_descendant(self, root))
    }

    /// The node holding the smallest key strictly greater than the key of `id`, or `None` if `id`
    /// holds the maximum.
    ///
    /// ## Panics
    ///
    /// When `id` doesn't name a node of this tree; see [`NodeError`].
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).right {
            Some(right) => Some(walk::left_descendant(self, right)),
            None => walk::right_ancestor(self, id),
        }
    }

    /// The node holding the largest key strictly less than the key of `id`, or `None` if `id`
    /// holds the minimum.
    ///
    /// ## Panics
    ///
    /// When `id` doesn't name a node of this tree; see [`NodeError`].
    pub fn prev(&self, id: NodeId) -> Option<NodeId> {
        match self.node(id).left {
            Some(left) => Some(walk::right_descendant(self, left)),
            None => walk::left_ancestor(self, id),
        }
    }

    /// Removes the node named by `id` and returns its key. Every other node keeps its handle.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// let one = tree.find(&1).unwrap();
    /// let two = tree.find(&2).unwrap();
    ///
    /// assert_eq!(tree.delete(two), 2);
    /// assert_eq!(tree.keys(), vec![1, 3]);
    /// assert_eq!(tree.find(&1), Some(one));
    /// ```
    ///
    /// ## Panics
    ///
    /// When `id` doesn't name a node of this tree; see [`NodeError`]. The tree is left untouched.
    pub fn delete(&mut self, id: NodeId) -> K {
        let node = self.node(id);
        match (node.left, node.right) {
            (None, None) => {
                trace!("deleting leaf {:?}", id);
                self.splice(id, None);
            }
            (Some(child), None) | (None, Some(child)) => {
                trace!("deleting {:?}, promoting its only child {:?}", id, child);
                self.splice(id, Some(child));
            }
            (Some(left), Some(right)) => {
                // The successor is the left-most node of the right subtree, so it has no left
                // child of its own.
                let successor = walk::left_descendant(self, right);
                trace!("deleting {:?}, promoting its successor {:?}", id, successor);

                if successor != right {
                    // Detach the successor, leaving its right subtree in its place, then let it
                    // adopt the whole right subtree of `id`.
                    let successor_right = self.node(successor).right;
                    self.splice(successor, successor_right);
                    self.node_mut(successor).right = Some(right);
                    self.node_mut(right).parent = Some(successor);
                }

                self.node_mut(successor).left = Some(left);
                self.node_mut(left).parent = Some(successor);
                self.splice(id, Some(successor));
            }
        }

        self.size -= 1;
        let removed = self.release(id);

        if cfg!(debug_assertions) {
            if let Some(root) = self.root {
                assert!(self.node(root).parent.is_none());
            }
            assert_eq!(self.root.is_none(), self.size == 0);
        }

        removed.key
    }

    /// Visits every node once, root first, exploring each left subtree before the right one. The
    /// order is not sorted.
    pub fn dfs<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<K>),
    {
        for node in self.dfs_iter() {
            visit(node);
        }
    }

    /// Visits every node once, level by level from the root, left to right within a level.
    pub fn bfs<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<K>),
    {
        for node in self.bfs_iter() {
            visit(node);
        }
    }

    /// A lazy version of [`Tree::dfs`].
    pub fn dfs_iter(&self) -> Dfs<'_, K> {
        Dfs::new(self)
    }

    /// A lazy version of [`Tree::bfs`].
    pub fn bfs_iter(&self) -> Bfs<'_, K> {
        Bfs::new(self)
    }

    /// Iterates over the keys in ascending order by following successor links.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self)
    }

    /// The keys of the tree in ascending order. They are gathered breadth first and then sorted.
    pub fn keys(&self) -> Vec<K>
    where
        K: Ord + Clone,
    {
        let mut keys = Vec::with_capacity(self.size);
        self.bfs(|node| keys.push(node.key.clone()));
        keys.sort();
        keys
    }

    /// Removes every node. Handles issued before are stale afterwards.
    pub fn clear(&mut self) {
        debug!("clearing {} nodes", self.size);
        for index in 0..self.slots.len() {
            if self.slots[index].node.take().is_some() {
                self.slots[index].generation = self.slots[index].generation.wrapping_add(1);
                self.vacant.push(index);
            }
        }
        self.root = None;
        self.size = 0;
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        if let Err(err) = self.get(id) {
            panic!("{}", err);
        }
        match self.slots[id.index].node.as_mut() {
            Some(node) => node,
            None => unreachable!("checked by `get`"),
        }
    }

    /// Stores a new leaf below `parent` (without linking `parent` to it) and returns its handle.
    fn alloc(&mut self, key: K, parent: Link) -> NodeId {
        let index = match self.vacant.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: None,
                });
                self.slots.len() - 1
            }
        };
        let id = NodeId {
            tree: self.tag,
            index,
            generation: self.slots[index].generation,
        };
        self.slots[index].node = Some(Node::new_leaf(id, key, parent));
        id
    }

    /// Takes the node out of its slot and retires the slot's generation so `id` stays stale.
    fn release(&mut self, id: NodeId) -> Node<K> {
        let slot = &mut self.slots[id.index];
        match slot.node.take() {
            Some(node) => {
                slot.generation = slot.generation.wrapping_add(1);
                self.vacant.push(id.index);
                node
            }
            None => unreachable!("released a vacant slot"),
        }
    }

    /// The parent of `id` and the link of the parent that holds `id`. `None` for the root.
    fn side_of(&self, id: NodeId) -> Option<(NodeId, Side)> {
        let parent = self.node(id).parent?;
        if self.node(parent).left == Some(id) {
            Some((parent, Side::Left))
        } else {
            Some((parent, Side::Right))
        }
    }

    fn set_child(&mut self, parent: NodeId, side: Side, child: Link) {
        let parent = self.node_mut(parent);
        match side {
            Side::Left => parent.left = child,
            Side::Right => parent.right = child,
        }
    }

    /// Puts `replacement` in the position `id` holds: the parent's link to `id` (or the root)
    /// becomes `replacement` and `replacement` takes `id`'s parent. `id`'s own links are left as
    /// they were.
    fn splice(&mut self, id: NodeId, replacement: Link) {
        let parent = self.side_of(id);
        if let Some(replacement) = replacement {
            self.node_mut(replacement).parent = parent.map(|(parent, _)| parent);
        }
        match parent {
            Some((parent, side)) => self.set_child(parent, side, replacement),
            None => self.root = replacement,
        }
    }
}

impl<K: Ord> Tree<K> {
    /// The node holding `key`, if there is one.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree = Tree::with_root(1);
    ///
    /// assert_eq!(tree.find(&1), tree.root());
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<NodeId> {
        match self.locate(key) {
            Search::Found(id) => Some(id),
            Search::NotFound(_) => None,
        }
    }

    /// Whether `key` is in the tree.
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Adds `key` as a new leaf. Returns `false`, leaving the tree as it was, if the key is already
    /// present.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let parent = match self.locate(&key) {
            Search::Found(id) => {
                trace!("key already present in {:?}", id);
                return false;
            }
            Search::NotFound(parent) => parent,
        };

        match parent {
            Some(parent) => {
                let side = if key < self.node(parent).key {
                    Side::Left
                } else {
                    Side::Right
                };
                let id = self.alloc(key, Some(parent));
                self.set_child(parent, side, Some(id));
                trace!("inserted {:?} as {:?} child of {:?}", id, side, parent);
            }
            None => {
                let id = self.alloc(key, None);
                self.root = Some(id);
                trace!("inserted {:?} as root", id);
            }
        }
        self.size += 1;

        true
    }

    /// Inserts each key in turn. Later duplicates are ignored.
    pub fn insert_all<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = K>,
    {
        for key in keys {
            self.insert(key);
        }
    }

    /// Deletes the node holding `key` and returns the key, or `None` if it isn't present.
    pub fn delete_by_key(&mut self, key: &K) -> Option<K> {
        self.find(key).map(|id| self.delete(id))
    }

    /// The nodes with keys in `low..=high`, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 1, 9, 3, 7].into_iter().collect();
    /// let keys: Vec<_> = tree.find_range(&2, &7).into_iter().map(|id| tree.key(id)).collect();
    ///
    /// assert_eq!(keys, vec![&3, &5, &7]);
    /// ```
    pub fn find_range(&self, low: &K, high: &K) -> Vec<NodeId> {
        let mut found = Vec::new();
        // On a miss this starts next to `low`, either just below or just above it.
        let mut current = match self.locate(low) {
            Search::Found(id) => Some(id),
            Search::NotFound(parent) => parent,
        };

        while let Some(id) = current {
            let key = &self.node(id).key;
            if key > high {
                break;
            }
            if key >= low {
                found.push(id);
            }
            current = self.next(id);
        }

        found
    }

    /// The nodes right below and right above `key`. If `key` is present these are its
    /// predecessor and successor, otherwise the two nodes `key` would be inserted between.
    ///
    /// # Examples
    ///
    /// ```
    /// use parent_bst::Tree;
    ///
    /// let tree: Tree<_> = vec![10, 20, 30].into_iter().collect();
    ///
    /// let (below, above) = tree.nearest_neighbour(&25);
    /// assert_eq!(below.map(|id| tree.key(id)), Some(&20));
    /// assert_eq!(above.map(|id| tree.key(id)), Some(&30));
    ///
    /// let (below, above) = tree.nearest_neighbour(&5);
    /// assert_eq!(below, None);
    /// assert_eq!(above.map(|id| tree.key(id)), Some(&10));
    /// ```
    pub fn nearest_neighbour(&self, key: &K) -> (Option<NodeId>, Option<NodeId>) {
        match self.locate(key) {
            Search::Found(id) => (self.prev(id), self.next(id)),
            Search::NotFound(None) => (None, None),
            Search::NotFound(Some(id)) => {
                if self.node(id).key < *key {
                    (Some(id), self.next(id))
                } else {
                    (self.prev(id), Some(id))
                }
            }
        }
    }

    /// Descends from the root towards `key`.
    pub(crate) fn locate(&self, key: &K) -> Search {
        let mut current = match self.root {
            Some(root) => root,
            None => return Search::NotFound(None),
        };

        loop {
            let node = self.node(current);
            let child = match key.cmp(&node.key) {
                Ordering::Less => node.left,
                Ordering::Equal => return Search::Found(current),
                Ordering::Greater => node.right,
            };
            match child {
                Some(child) => current = child,
                None => return Search::NotFound(Some(current)),
            }
        }
    }
}
