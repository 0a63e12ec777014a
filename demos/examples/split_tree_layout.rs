// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Split tree layout.
//!
//! Build a small decision tree, then list its nodes and edges in drawing order.
//!
//! Run:
//! - `cargo run -p arbor_demos --example split_tree_layout`

use arbor_tree::{Axis, Layout, NodeFilter, SplitRule, Tree};
use kurbo::Vec2;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut tree = Tree::new();

    // Two leaves under a split, plus a single leaf on the right.
    let (a, b) = (tree.insert_empty(), tree.insert_empty());
    let t1 = tree.insert_split(a, b, SplitRule::new(16.5, Axis::X), Layout::default())?;
    let (a, b) = (tree.insert_empty(), tree.insert_empty());
    let t2 = tree.insert_split(a, b, SplitRule::new(0.0, Axis::X), Layout::default())?;
    let t3 = tree.insert_split(t1, t2, SplitRule::new(0.0, Axis::Y), Layout::default())?;
    let (a, b) = (tree.insert_empty(), tree.insert_empty());
    let t4 = tree.insert_split(a, b, SplitRule::new(2.5, Axis::Y), Layout::default())?;
    let root = tree.insert_split(
        t3,
        t4,
        SplitRule::new(0.0, Axis::Y),
        Layout::new(Vec2::new(2.5, 2.5), 1.0),
    )?;
    tracing::info!("built {:?}", tree);

    for id in tree.render_order(root, NodeFilter::default()) {
        let pos = tree.position(id).unwrap_or_default();
        let label = tree.label(id).unwrap_or_default();
        let kind = if tree.is_empty(id) { "leaf" } else { "node" };
        println!(
            "#{:<2} depth {} {kind} {:>8} at ({:6.3}, {:6.3})",
            id.index(),
            tree.depth(id).unwrap_or_default(),
            label,
            pos.x,
            pos.y,
        );
    }

    for edge in tree.edges(root) {
        println!(
            "edge #{} -> #{}: ({:.3}, {:.3}) -> ({:.3}, {:.3})",
            edge.parent.index(),
            edge.child.index(),
            edge.from.x,
            edge.from.y,
            edge.to.x,
            edge.to.y,
        );
    }

    if let Some(bounds) = tree.bounds(root) {
        println!("bounds: {bounds:?}");
    }
    Ok(())
}
