//! This crate exposes an in-memory ordered key index built on an unbalanced Binary Search Tree
//! whose nodes link back to their parents.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored records. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` will typically store
//! some sort of key and will sometimes have child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for keys in the tree takes `O(height)` (where `height` is defined as the longest
//! path from the root `Node` to a leaf `Node`). This tree never rebalances itself, so its height
//! depends entirely on insertion order: random order keeps it near `O(lg N)`, sorted order makes
//! it `N`.
//!
//! ## Parent links
//!
//! Every `Node` here also knows its parent. That makes it possible to step from any node to its
//! in-order successor or predecessor, which in turn gives range queries and nearest neighbour
//! lookups that start from a single descent. Nodes live in an arena owned by the [`Tree`] and are
//! named by [`NodeId`] handles, so parent links never form ownership cycles.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree: Tree<u32> = vec![50, 30, 70, 20, 40, 60, 80].into_iter().collect();
//!
//! let range: Vec<_> = tree.find_range(&35, &65).into_iter().map(|id| *tree.key(id)).collect();
//! assert_eq!(range, vec![40, 50, 60]);
//!
//! tree.delete_by_key(&50);
//! assert_eq!(tree.keys(), vec![20, 30, 40, 60, 70, 80]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod error;
mod iter;
mod node;
mod tree;
mod util;
mod walk;

pub use error::NodeError;
pub use iter::{Bfs, Dfs, Iter};
pub use node::{Node, NodeId};
pub use tree::Tree;
