// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the split tree: node identifiers, split rules, layout parameters, and filters.

use alloc::string::String;
use core::fmt::Write as _;
use kurbo::{Point, Rect, Vec2};

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle made of a creation index and the epoch of the
/// [`Tree`](crate::Tree) that issued it.
///
/// ## Semantics
///
/// - Indices are handed out in creation order, starting at `0`, for both empty and split nodes.
/// - Indices are never reused while the tree lives; nodes are never removed individually.
/// - [`Tree::reset`](crate::Tree::reset) drops every node and bumps the epoch, so every handle
///   issued before the reset becomes stale and index numbering starts again at `0`.
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a handle still refers to a node.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, epoch: u32) -> Self {
        Self(idx, epoch)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// Creation index of the node, unique within one epoch of its tree.
    pub const fn index(self) -> u32 {
        self.0
    }
}

/// One of the two planar axes a split can cut along.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Vertical cut at `x = threshold`; left keeps `x < threshold`.
    X,
    /// Horizontal cut at `y = threshold`; left (bottom) keeps `y < threshold`.
    Y,
}

impl Axis {
    /// Short name used in node labels.
    pub const fn name(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
        }
    }

    /// Coordinate of `pt` along this axis.
    pub const fn coord(self, pt: Point) -> f64 {
        match self {
            Self::X => pt.x,
            Self::Y => pt.y,
        }
    }

    /// Split `region` at `threshold`, returning the (left/bottom, right/top) halves.
    ///
    /// The threshold is not clamped; one outside the region yields an inverted half.
    pub fn split_region(self, region: Rect, threshold: f64) -> (Rect, Rect) {
        match self {
            Self::X => (
                Rect::new(region.x0, region.y0, threshold, region.y1),
                Rect::new(threshold, region.y0, region.x1, region.y1),
            ),
            Self::Y => (
                Rect::new(region.x0, region.y0, region.x1, threshold),
                Rect::new(region.x0, threshold, region.x1, region.y1),
            ),
        }
    }
}

/// Decision rule carried by a split node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SplitRule {
    /// Position of the cut along [`axis`](Self::axis).
    pub threshold: f64,
    /// Axis of the cut.
    ///
    /// Display-only trees may leave this unset; such a node cannot take part in a partition
    /// and reports [`Error::Configuration`](crate::Error::Configuration) when visited.
    pub axis: Option<Axis>,
}

impl SplitRule {
    /// A rule cutting along `axis` at `threshold`.
    pub const fn new(threshold: f64, axis: Axis) -> Self {
        Self {
            threshold,
            axis: Some(axis),
        }
    }

    /// A display-only rule with no axis.
    pub const fn display_only(threshold: f64) -> Self {
        Self {
            threshold,
            axis: None,
        }
    }

    /// Display label of the rule: axis name, `<`, then the threshold (`"x<0.5"`).
    pub fn label(&self) -> String {
        let mut out = String::new();
        if let Some(axis) = self.axis {
            out.push_str(axis.name());
        }
        let _ = write!(out, "<{}", self.threshold);
        out
    }
}

/// Display parameters shared by every node of a tree.
///
/// Set on the split that becomes the root and propagated unchanged to all descendants.
///
/// Both scale components and `xy_ratio` must be finite and positive. A negative spread would
/// draw left children right of their siblings and break the left-to-right drawing order.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Layout {
    /// Element-wise multiplier applied to raw positions.
    pub scale: Vec2,
    /// Horizontal spread of siblings; the offset at depth `d` is `xy_ratio / (1 + d)`.
    pub xy_ratio: f64,
}

impl Layout {
    /// Vertical drop between a parent and its children, before scaling.
    pub const ROW_HEIGHT: f64 = 0.5;

    /// Layout with the given scale and spread.
    pub const fn new(scale: Vec2, xy_ratio: f64) -> Self {
        Self { scale, xy_ratio }
    }

    /// Returns true if every parameter is finite and positive.
    pub fn is_valid(&self) -> bool {
        [self.scale.x, self.scale.y, self.xy_ratio]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    /// Apply the scale to a raw position.
    pub fn apply(&self, raw: Point) -> Point {
        Point::new(raw.x * self.scale.x, raw.y * self.scale.y)
    }

    /// Raw offset from a parent at `parent_depth` to its left child (negate `x` for the right one).
    pub fn child_offset(&self, parent_depth: u32) -> Vec2 {
        Vec2::new(
            -self.xy_ratio / (1.0 + f64::from(parent_depth)),
            -Self::ROW_HEIGHT,
        )
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            scale: Vec2::new(1.0, 1.0),
            xy_ratio: 1.0,
        }
    }
}

bitflags::bitflags! {
    /// Node variants yielded by traversals such as [`Tree::render_order`](crate::Tree::render_order).
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFilter: u8 {
        /// Split nodes (rule carriers).
        const SPLIT = 0b0000_0001;
        /// Empty placeholders terminating a branch.
        const EMPTY = 0b0000_0010;
    }
}

impl Default for NodeFilter {
    fn default() -> Self {
        Self::SPLIT | Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_axis_and_threshold() {
        assert_eq!(SplitRule::new(0.5, Axis::X).label(), "x<0.5");
        assert_eq!(SplitRule::new(16.5, Axis::Y).label(), "y<16.5");
        assert_eq!(SplitRule::new(0.0, Axis::Y).label(), "y<0");
        assert_eq!(SplitRule::display_only(2.0).label(), "<2");
    }

    #[test]
    fn split_region_halves() {
        let r = Rect::new(0.0, 0.0, 2.0, 1.0);
        let (l, h) = Axis::X.split_region(r, 0.5);
        assert_eq!(l, Rect::new(0.0, 0.0, 0.5, 1.0));
        assert_eq!(h, Rect::new(0.5, 0.0, 2.0, 1.0));
        let (b, t) = Axis::Y.split_region(r, 0.25);
        assert_eq!(b, Rect::new(0.0, 0.0, 2.0, 0.25));
        assert_eq!(t, Rect::new(0.0, 0.25, 2.0, 1.0));
    }

    #[test]
    fn child_offset_shrinks_with_depth() {
        let layout = Layout::new(Vec2::new(2.0, 3.0), 2.0);
        assert_eq!(layout.child_offset(0), Vec2::new(-2.0, -0.5));
        assert_eq!(layout.child_offset(3), Vec2::new(-0.5, -0.5));
        assert_eq!(layout.apply(Point::new(1.0, -0.5)), Point::new(2.0, -1.5));
    }

    #[test]
    fn layout_validity() {
        assert!(Layout::default().is_valid());
        assert!(!Layout::new(Vec2::new(1.0, 1.0), -1.0).is_valid());
        assert!(!Layout::new(Vec2::new(0.0, 1.0), 1.0).is_valid());
        assert!(!Layout::new(Vec2::new(1.0, f64::NAN), 1.0).is_valid());
    }
}
