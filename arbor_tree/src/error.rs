// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural precondition failures reported by the tree.

use kurbo::Rect;

use crate::NodeId;

/// Errors returned by fallible [`Tree`](crate::Tree) operations.
///
/// All of them are caller bugs detected at the offending call; nothing is retried and the tree
/// is left unchanged.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// The node already has a parent, or was passed as both children of one split.
    #[error("node {0:?} is already owned by a split")]
    Ownership(NodeId),
    /// A split without an axis was asked to take part in a partition.
    #[error("split node {0:?} has no axis and cannot partition a region")]
    Configuration(NodeId),
    /// The region has a non-finite coordinate or an inverted extent.
    #[error("invalid region {0:?}")]
    InvalidRegion(Rect),
    /// The handle was issued before the last reset or is out of range.
    #[error("stale node id {0:?}")]
    StaleNode(NodeId),
}
