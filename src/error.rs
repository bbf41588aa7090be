use thiserror::Error;

use crate::node::NodeId;

/// Why a [`NodeId`] was rejected by a [`Tree`][crate::Tree].
///
/// Handing a rejected id to an operation that requires a node is a programming error, so those
/// operations panic with this message. [`Tree::get`][crate::Tree::get] exposes the check without
/// panicking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NodeError {
    /// The id was issued by another tree.
    #[error("node {0:?} belongs to a different tree")]
    ForeignTree(NodeId),
    /// The id points past the end of this tree's storage.
    #[error("node {0:?} is out of bounds for this tree")]
    OutOfBounds(NodeId),
    /// The node was deleted from this tree.
    #[error("node {0:?} has been deleted from this tree")]
    Deleted(NodeId),
}
