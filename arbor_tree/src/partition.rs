// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recursive partition of a rectangular region by the tree's split rules.

use alloc::vec::Vec;
use kurbo::{Line, Point, Rect};
use tracing::{debug, trace};

use crate::error::Error;
use crate::tree::{NodeKind, Tree};
use crate::types::{Axis, NodeId};

/// Result of [`Tree::locate`].
#[derive(Clone, Debug)]
pub struct Hit {
    /// The empty placeholder whose cell contains the point.
    pub node: NodeId,
    /// Path from root to node (inclusive).
    pub path: Vec<NodeId>,
    /// Cell of the partition owned by `node`.
    pub region: Rect,
}

/// Build a region from two opposite corners given in any order.
pub fn region_from_corners(a: impl Into<Point>, b: impl Into<Point>) -> Rect {
    Rect::from_points(a, b)
}

/// Segment cutting `region` at `threshold` along `axis`, spanning the other axis' extent.
pub fn cut_line(axis: Axis, threshold: f64, region: Rect) -> Line {
    match axis {
        Axis::X => Line::new((threshold, region.y0), (threshold, region.y1)),
        Axis::Y => Line::new((region.x0, threshold), (region.x1, threshold)),
    }
}

fn validate_region(region: Rect) -> Result<(), Error> {
    let finite = [region.x0, region.y0, region.x1, region.y1]
        .iter()
        .all(|v| v.is_finite());
    if !finite || region.x1 < region.x0 || region.y1 < region.y0 {
        return Err(Error::InvalidRegion(region));
    }
    Ok(())
}

impl Tree {
    /// Segments partitioning `region` under `root`, in pre-order, without storing them.
    ///
    /// Each split contributes the cut of the region it receives, then hands the lower
    /// (left/bottom) half to its left child and the upper (right/top) half to its right child.
    /// Empty nodes contribute nothing.
    pub fn partition(&self, root: NodeId, region: Rect) -> Result<Vec<(NodeId, Line)>, Error> {
        self.check_alive(root)?;
        validate_region(region)?;
        let mut out = Vec::new();
        self.partition_recursive(root, region, &mut out)?;
        Ok(out)
    }

    /// Partition `region` under `root` and store each split's segment on it.
    ///
    /// Returns the segments in pre-order. On error nothing is stored, so [`line`](Self::line)
    /// never exposes a partially computed partition.
    pub fn compute_lines(&mut self, root: NodeId, region: Rect) -> Result<Vec<Line>, Error> {
        let cuts = self.partition(root, region)?;
        let mut lines = Vec::with_capacity(cuts.len());
        for (id, line) in cuts {
            if let Some(split) = self.split_mut(id) {
                split.line = Some(line);
            }
            lines.push(line);
        }
        debug!(root = root.index(), segments = lines.len(), "computed partition");
        Ok(lines)
    }

    /// Segments stored under `root` by the last [`compute_lines`](Self::compute_lines), in pre-order.
    pub fn segments(&self, root: NodeId) -> Vec<Line> {
        self.subtree(root)
            .into_iter()
            .filter_map(|id| self.line(id))
            .collect()
    }

    /// Follow the split rules from `root` to the empty placeholder whose cell holds `pt`.
    ///
    /// A point goes left when its coordinate on the split axis is below the threshold and
    /// right otherwise. Returns `None` if `pt` is outside `region` (edges included).
    pub fn locate(&self, root: NodeId, region: Rect, pt: Point) -> Result<Option<Hit>, Error> {
        self.check_alive(root)?;
        validate_region(region)?;
        if pt.x < region.x0 || pt.x > region.x1 || pt.y < region.y0 || pt.y > region.y1 {
            return Ok(None);
        }

        let mut id = root;
        let mut region = region;
        let mut path = Vec::new();
        loop {
            path.push(id);
            let NodeKind::Split(split) = &self.node(id).kind else {
                return Ok(Some(Hit {
                    node: id,
                    path,
                    region,
                }));
            };
            let axis = split.rule.axis.ok_or(Error::Configuration(id))?;
            let (low, high) = axis.split_region(region, split.rule.threshold);
            if axis.coord(pt) < split.rule.threshold {
                id = split.left;
                region = low;
            } else {
                id = split.right;
                region = high;
            }
        }
    }

    fn partition_recursive(
        &self,
        id: NodeId,
        region: Rect,
        out: &mut Vec<(NodeId, Line)>,
    ) -> Result<(), Error> {
        let NodeKind::Split(split) = &self.node(id).kind else {
            return Ok(());
        };
        let axis = split.rule.axis.ok_or(Error::Configuration(id))?;
        let line = cut_line(axis, split.rule.threshold, region);
        trace!(node = id.index(), ?line, "cut");
        out.push((id, line));

        // A leaf's children are both empty, so the recursion below ends right away.
        let (low, high) = axis.split_region(region, split.rule.threshold);
        self.partition_recursive(split.left, low, out)?;
        self.partition_recursive(split.right, high, out)
    }
}
