// Copyright 2025 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_tree::{Axis, Layout, NodeFilter, NodeId, SplitRule, Tree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

/// Balanced tree whose thresholds bisect the cell each split receives, like a k-d tree.
fn build_balanced(tree: &mut Tree, height: u32, region: Rect) -> NodeId {
    if height == 0 {
        return tree.insert_empty();
    }
    let axis = if height % 2 == 0 { Axis::X } else { Axis::Y };
    let threshold = match axis {
        Axis::X => (region.x0 + region.x1) * 0.5,
        Axis::Y => (region.y0 + region.y1) * 0.5,
    };
    let (low, high) = axis.split_region(region, threshold);
    let left = build_balanced(tree, height - 1, low);
    let right = build_balanced(tree, height - 1, high);
    tree.insert_split(
        left,
        right,
        SplitRule::new(threshold, axis),
        Layout::default(),
    )
    .unwrap()
}

fn unit() -> Rect {
    Rect::new(0.0, 0.0, 1.0, 1.0)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &height in &[6u32, 8, 10] {
        group.throughput(Throughput::Elements((1u64 << (height + 1)) - 1));
        group.bench_function(format!("balanced_h{}", height), |b| {
            b.iter_batched(
                Tree::new,
                |mut tree| {
                    let root = build_balanced(&mut tree, height, unit());
                    black_box(root);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");
    for &height in &[6u32, 8, 10] {
        let mut tree = Tree::new();
        let root = build_balanced(&mut tree, height, unit());
        group.throughput(Throughput::Elements((1u64 << height) - 1));
        group.bench_function(format!("compute_lines_h{}", height), |b| {
            b.iter(|| {
                let lines = tree.compute_lines(root, unit()).unwrap();
                black_box(lines.len());
            })
        });
        group.bench_function(format!("partition_h{}", height), |b| {
            b.iter(|| {
                let cuts = tree.partition(root, unit()).unwrap();
                black_box(cuts.len());
            })
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let mut tree = Tree::new();
    let root = build_balanced(&mut tree, 10, unit());

    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    let points: Vec<Point> = (0..1024)
        .map(|_| Point::new(rng.next_f64(), rng.next_f64()))
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));
    group.bench_function("locate_random_h10", |b| {
        b.iter(|| {
            let mut depth = 0;
            for pt in &points {
                let hit = tree.locate(root, unit(), *pt).unwrap();
                depth += hit.map(|h| h.path.len()).unwrap_or(0);
            }
            black_box(depth);
        })
    });

    group.bench_function("render_order_h10", |b| {
        b.iter(|| {
            let order = tree.render_order(root, NodeFilter::default());
            black_box(order.len());
        })
    });
    group.bench_function("edges_h10", |b| {
        b.iter(|| {
            let edges = tree.edges(root);
            black_box(edges.len());
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_partition, bench_queries);
criterion_main!(benches);
