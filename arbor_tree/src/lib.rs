// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Tree: a Kurbo-native binary split tree for drawing decision trees.
//!
//! A split tree is built bottom-up from two kinds of nodes:
//!
//! - empty placeholders, which end a branch, and
//! - splits, which carry a [`SplitRule`] (threshold and [`Axis`]) and own exactly two children.
//!
//! The tree serves two drawing tasks:
//!
//! - **Layout.** Every node gets a display position derived from its depth and ancestry.
//!   Children sit one row (`0.5`) below their parent and are spread horizontally by
//!   `xy_ratio / (1 + depth)`, so the tree narrows as it deepens. The [`Layout`] scale is applied
//!   on read, which lets a caller rescale a built tree without rebuilding it.
//! - **Partition.** [`Tree::compute_lines`] cuts a rectangular region recursively by the split
//!   rules and returns one segment per split, the picture of how the decision tree divides the
//!   plane.
//!
//! ## Not a renderer
//!
//! This crate only produces numbers: positions, edges, segments, and a drawing order.
//! Shapes, text, colors, and animation belong to whatever draws them.
//!
//! ## API overview
//!
//! - [`Tree`]: arena owning nodes, the id counter, and the current root marker.
//! - [`NodeId`]: handle of a node; its [`index`](NodeId::index) is the creation order.
//! - [`SplitRule`], [`Axis`]: the rule carried by a split.
//! - [`Layout`]: scale and sibling spread, propagated from the root.
//! - [`NodeFilter`]: which node kinds [`Tree::render_order`] yields.
//! - [`Error`]: ownership, configuration, region, and stale-handle failures.
//!
//! Key operations:
//! - [`Tree::insert_empty`] and [`Tree::insert_split`] → [`NodeId`]
//! - [`Tree::position`], [`Tree::depth`], [`Tree::label`], [`Tree::render_order`], [`Tree::edges`]
//! - [`Tree::compute_lines`] / [`Tree::partition`] and [`Tree::line`], [`Tree::segments`]
//! - [`Tree::locate`] to follow the rules down to the cell holding a point.
//! - [`Tree::reset`] to start over with fresh numbering.
//!
//! # Example
//!
//! ```rust
//! use arbor_tree::{Axis, Layout, SplitRule, Tree};
//! use kurbo::{Line, Point, Rect};
//!
//! let mut tree = Tree::new();
//!
//! // y<0.25 under the left branch of y<0.75.
//! let l = tree.insert_empty();
//! let r = tree.insert_empty();
//! let inner = tree.insert_split(l, r, SplitRule::new(0.25, Axis::Y), Layout::default())?;
//! let e = tree.insert_empty();
//! let root = tree.insert_split(inner, e, SplitRule::new(0.75, Axis::Y), Layout::default())?;
//!
//! assert_eq!(tree.depth(inner), Some(1));
//! assert_eq!(tree.position(inner), Some(Point::new(-1.0, -0.5)));
//! assert_eq!(tree.label(root).as_deref(), Some("y<0.75"));
//!
//! let lines = tree.compute_lines(root, Rect::new(0.0, 0.0, 1.0, 1.0))?;
//! assert_eq!(lines.len(), 2);
//! assert_eq!(tree.line(inner), Some(Line::new((0.0, 0.25), (1.0, 0.25))));
//! # Ok::<(), arbor_tree::Error>(())
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod partition;
mod tree;
mod types;

pub use error::Error;
pub use partition::{Hit, cut_line, region_from_corners};
pub use tree::{Edge, Tree};
pub use types::{Axis, Layout, NodeFilter, NodeId, SplitRule};
