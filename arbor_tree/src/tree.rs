// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: node arena, construction, layout propagation, and queries.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Line, Point, Rect};
use tracing::debug;

use crate::error::Error;
use crate::types::{Layout, NodeFilter, NodeId, SplitRule};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena owning every node of one or more split trees.
///
/// Nodes are created bottom-up: children first, then the split that owns them.
/// The tree also remembers the most recently inserted split as its [root](Self::root).
pub struct Tree {
    nodes: Vec<Node>, // indexed by creation order
    epoch: u32,
    root: Option<NodeId>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let splits = self
            .nodes
            .iter()
            .filter(|n| matches!(n.kind, NodeKind::Split(_)))
            .count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("splits", &splits)
            .field("epoch", &self.epoch)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// A parent-child link with both scaled endpoints, for drawing tree edges.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    /// The owning split.
    pub parent: NodeId,
    /// The child node.
    pub child: NodeId,
    /// Scaled position of the parent.
    pub from: Point,
    /// Scaled position of the child.
    pub to: Point,
}

#[derive(Clone, Debug)]
pub(crate) struct Split {
    pub(crate) left: NodeId,
    pub(crate) right: NodeId,
    pub(crate) rule: SplitRule,
    pub(crate) line: Option<Line>,
}

#[derive(Clone, Debug)]
pub(crate) enum NodeKind {
    Empty,
    Split(Split),
}

#[derive(Clone, Debug)]
pub(crate) struct Node {
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
    raw: Point,
    layout: Layout,
    pub(crate) kind: NodeKind,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            parent: None,
            depth: 0,
            raw: Point::ORIGIN,
            layout: Layout::default(),
            kind,
        }
    }

    pub(crate) fn split(&self) -> Option<&Split> {
        match &self.kind {
            NodeKind::Split(split) => Some(split),
            NodeKind::Empty => None,
        }
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            epoch: 1,
            root: None,
        }
    }

    /// Drop every node and restart numbering at `0`.
    ///
    /// Handles issued before the reset become stale.
    pub fn reset(&mut self) {
        debug!(epoch = self.epoch, nodes = self.nodes.len(), "resetting tree");
        self.nodes.clear();
        self.epoch = self.epoch.wrapping_add(1);
        self.root = None;
    }

    /// Number of nodes created since the last reset.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every live node, in creation order.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        let epoch = self.epoch;
        (0..self.nodes.len()).map(move |i| NodeId::new(i as u32, epoch))
    }

    /// The most recently inserted split, if any.
    ///
    /// Callers building several trees in one arena should keep their own root handles instead.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Insert an empty placeholder terminating a branch.
    pub fn insert_empty(&mut self) -> NodeId {
        self.alloc(NodeKind::Empty)
    }

    /// Insert a split owning `left` (also bottom) and `right` (also top).
    ///
    /// Both children must be live and parentless, and `layout` must be [valid](Layout::is_valid)
    /// (checked in debug builds). The new split becomes a root at depth `0`;
    /// depth, `layout`, and positions are then propagated through both subtrees, replacing
    /// whatever they held as roots of their own.
    pub fn insert_split(
        &mut self,
        left: NodeId,
        right: NodeId,
        rule: SplitRule,
        layout: Layout,
    ) -> Result<NodeId, Error> {
        debug_assert!(layout.is_valid(), "layout scale and xy_ratio must be positive");
        self.check_alive(left)?;
        self.check_alive(right)?;
        if left == right {
            return Err(Error::Ownership(right));
        }
        for child in [left, right] {
            if self.node(child).parent.is_some() {
                return Err(Error::Ownership(child));
            }
        }

        let id = self.link_split(left, right, rule);
        self.propagate(id, 0, Point::ORIGIN, layout);
        self.root = Some(id);
        debug!(
            node = id.index(),
            left = left.index(),
            right = right.index(),
            label = %rule.label(),
            "inserted split"
        );
        Ok(id)
    }

    /// Copy the subtree at `root` into fresh nodes of this tree.
    ///
    /// Rules and the root's layout are kept; stored lines are not. The copy becomes the
    /// current [root](Self::root).
    pub fn deep_copy(&mut self, root: NodeId) -> Result<NodeId, Error> {
        self.check_alive(root)?;
        let layout = self.node(root).layout;
        let copy = self.copy_recursive(root);
        self.propagate(copy, 0, Point::ORIGIN, layout);
        if matches!(self.node(copy).kind, NodeKind::Split(_)) {
            self.root = Some(copy);
        }
        debug!(source = root.index(), copy = copy.index(), "copied subtree");
        Ok(copy)
    }

    /// Returns true if `id` refers to a node of the current epoch.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.1 == self.epoch && id.idx() < self.nodes.len()
    }

    /// Depth below the root the node was last attached under.
    pub fn depth(&self, id: NodeId) -> Option<u32> {
        self.node_opt(id).map(|n| n.depth)
    }

    /// The owning split, or `None` for a root or a stale id.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// `(left, right)` children of a split.
    pub fn children(&self, id: NodeId) -> Option<(NodeId, NodeId)> {
        self.node_opt(id)
            .and_then(Node::split)
            .map(|s| (s.left, s.right))
    }

    /// Display position with the tree's scale applied.
    pub fn position(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id).map(|n| n.layout.apply(n.raw))
    }

    /// Display position before scaling.
    pub fn raw_position(&self, id: NodeId) -> Option<Point> {
        self.node_opt(id).map(|n| n.raw)
    }

    /// Layout parameters propagated from the node's root.
    pub fn layout(&self, id: NodeId) -> Option<Layout> {
        self.node_opt(id).map(|n| n.layout)
    }

    /// Rule of a split node.
    pub fn rule(&self, id: NodeId) -> Option<SplitRule> {
        self.node_opt(id).and_then(Node::split).map(|s| s.rule)
    }

    /// Display label: `"x<0.5"` for a split, empty for a placeholder.
    pub fn label(&self, id: NodeId) -> Option<String> {
        let node = self.node_opt(id)?;
        Some(node.split().map(|s| s.rule.label()).unwrap_or_default())
    }

    /// Returns true for a live empty placeholder.
    pub fn is_empty(&self, id: NodeId) -> bool {
        matches!(self.node_opt(id), Some(Node { kind: NodeKind::Empty, .. }))
    }

    /// Returns true for a split whose children are both empty.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.children(id)
            .is_some_and(|(l, r)| self.is_empty(l) && self.is_empty(r))
    }

    /// Segment stored on a split by the last [`compute_lines`](Self::compute_lines) that visited it.
    pub fn line(&self, id: NodeId) -> Option<Line> {
        self.node_opt(id).and_then(Node::split).and_then(|s| s.line)
    }

    /// Rules of every split under `root`, left subtree first, then the node, then the right subtree.
    pub fn in_order(&self, root: NodeId) -> Vec<SplitRule> {
        let mut out = Vec::new();
        if self.is_alive(root) {
            self.in_order_recursive(root, &mut out);
        }
        out
    }

    /// Nodes under `root` (inclusive) in drawing order: by depth, then left to right.
    pub fn render_order(&self, root: NodeId, filter: NodeFilter) -> Vec<NodeId> {
        let mut ids: Vec<(NodeId, u32, f64)> = self
            .subtree(root)
            .into_iter()
            .filter(|id| {
                let wanted = if self.is_empty(*id) {
                    NodeFilter::EMPTY
                } else {
                    NodeFilter::SPLIT
                };
                filter.contains(wanted)
            })
            .map(|id| {
                let node = self.node(id);
                (id, node.depth, node.layout.apply(node.raw).x)
            })
            .collect();
        ids.sort_by(|a, b| a.1.cmp(&b.1).then(a.2.total_cmp(&b.2)));
        ids.into_iter().map(|(id, _, _)| id).collect()
    }

    /// Parent-child links under `root`, ordered like the children in [`render_order`](Self::render_order).
    pub fn edges(&self, root: NodeId) -> Vec<Edge> {
        self.render_order(root, NodeFilter::default())
            .into_iter()
            .filter(|id| *id != root)
            .filter_map(|child| {
                let parent = self.parent(child)?;
                Some(Edge {
                    parent,
                    child,
                    from: self.position(parent)?,
                    to: self.position(child)?,
                })
            })
            .collect()
    }

    /// Box around the scaled position of every node under `root`.
    pub fn bounds(&self, root: NodeId) -> Option<Rect> {
        self.subtree(root)
            .into_iter()
            .filter_map(|id| self.position(id))
            .fold(None, |acc: Option<Rect>, pt| {
                Some(match acc {
                    Some(r) => r.union_pt(pt),
                    None => Rect::from_points(pt, pt),
                })
            })
    }

    // --- internals ---

    pub(crate) fn check_alive(&self, id: NodeId) -> Result<(), Error> {
        if self.is_alive(id) {
            Ok(())
        } else {
            Err(Error::StaleNode(id))
        }
    }

    /// Access a node; panics if `id` is stale.
    pub(crate) fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        assert!(self.is_alive(id), "dangling NodeId");
        &mut self.nodes[id.idx()]
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        if id.1 != self.epoch {
            return None;
        }
        self.nodes.get(id.idx())
    }

    pub(crate) fn split_mut(&mut self, id: NodeId) -> Option<&mut Split> {
        match &mut self.node_mut(id).kind {
            NodeKind::Split(split) => Some(split),
            NodeKind::Empty => None,
        }
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    fn alloc(&mut self, kind: NodeKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId::new((self.nodes.len() - 1) as u32, self.epoch)
    }

    fn link_split(&mut self, left: NodeId, right: NodeId, rule: SplitRule) -> NodeId {
        let id = self.alloc(NodeKind::Split(Split {
            left,
            right,
            rule,
            line: None,
        }));
        self.node_mut(left).parent = Some(id);
        self.node_mut(right).parent = Some(id);
        id
    }

    /// Pre-order: fix this node, then place each child one row down and spread by depth.
    ///
    /// Stored lines are dropped; a re-rooted split no longer knows which region it gets.
    fn propagate(&mut self, id: NodeId, depth: u32, raw: Point, layout: Layout) {
        let children = {
            let node = self.node_mut(id);
            node.depth = depth;
            node.raw = raw;
            node.layout = layout;
            match &mut node.kind {
                NodeKind::Split(split) => {
                    split.line = None;
                    Some((split.left, split.right))
                }
                NodeKind::Empty => None,
            }
        };
        if let Some((left, right)) = children {
            let offset = layout.child_offset(depth);
            self.propagate(left, depth + 1, raw + offset, layout);
            self.propagate(
                right,
                depth + 1,
                Point::new(raw.x - offset.x, raw.y + offset.y),
                layout,
            );
        }
    }

    fn copy_recursive(&mut self, id: NodeId) -> NodeId {
        let Some((left, right, rule)) = self.node(id).split().map(|s| (s.left, s.right, s.rule))
        else {
            return self.insert_empty();
        };
        let left = self.copy_recursive(left);
        let right = self.copy_recursive(right);
        self.link_split(left, right, rule)
    }

    fn in_order_recursive(&self, id: NodeId, out: &mut Vec<SplitRule>) {
        if let Some(split) = self.node(id).split() {
            self.in_order_recursive(split.left, out);
            out.push(split.rule);
            self.in_order_recursive(split.right, out);
        }
    }

    /// Pre-order listing of `root` and its descendants; empty for a stale id.
    pub(crate) fn subtree(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.is_alive(root) {
            return out;
        }
        let mut stack = alloc::vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(split) = self.node(id).split() {
                stack.push(split.right);
                stack.push(split.left);
            }
        }
        out
    }
}
