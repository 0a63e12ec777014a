// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Plane partition.
//!
//! Cut the unit square with a six-split tree, print the segments, and classify a few points.
//!
//! Run:
//! - `cargo run -p arbor_demos --example plane_partition`

use arbor_tree::{Axis, Layout, NodeId, SplitRule, Tree, region_from_corners};
use kurbo::Point;

fn split(
    tree: &mut Tree,
    left: NodeId,
    right: NodeId,
    threshold: f64,
    axis: Axis,
) -> anyhow::Result<NodeId> {
    let rule = SplitRule::new(threshold, axis);
    Ok(tree.insert_split(left, right, rule, Layout::default())?)
}

fn leaf(tree: &mut Tree, threshold: f64, axis: Axis) -> anyhow::Result<NodeId> {
    let (l, r) = (tree.insert_empty(), tree.insert_empty());
    split(tree, l, r, threshold, axis)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut tree = Tree::new();
    let t1 = leaf(&mut tree, 0.75, Axis::X)?;
    let t2 = leaf(&mut tree, 0.25, Axis::Y)?;
    let e = tree.insert_empty();
    let t3 = split(&mut tree, e, t1, 0.75, Axis::Y)?;
    let e = tree.insert_empty();
    let t4 = split(&mut tree, e, t2, 0.5, Axis::X)?;
    let e = tree.insert_empty();
    let t5 = split(&mut tree, e, t3, 0.25, Axis::X)?;
    let root = split(&mut tree, t4, t5, 0.5, Axis::Y)?;

    let region = region_from_corners((0.0, 0.0), (1.0, 1.0));
    let lines = tree.compute_lines(root, region)?;
    println!("{} segments:", lines.len());
    for line in &lines {
        println!(
            "  ({:.2}, {:.2}) -> ({:.2}, {:.2})",
            line.p0.x, line.p0.y, line.p1.x, line.p1.y
        );
    }

    println!("rules in order: {:?}", tree.in_order(root));

    for pt in [Point::new(0.1, 0.1), Point::new(0.9, 0.9), Point::new(0.6, 0.3)] {
        match tree.locate(root, region, pt)? {
            Some(hit) => {
                let path: Vec<String> = hit
                    .path
                    .iter()
                    .filter_map(|id| tree.label(*id))
                    .filter(|l| !l.is_empty())
                    .collect();
                println!("{pt:?} -> cell {:?} via {}", hit.region, path.join(" / "));
            }
            None => println!("{pt:?} is outside {region:?}"),
        }
    }
    Ok(())
}
