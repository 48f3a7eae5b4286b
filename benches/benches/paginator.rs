// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use kurbo::{Point, Vec2};
use understory_paginator::{
    OffsetTarget, PagedSurface, Paginator, PaginatorConfig, Transition, compute_stage,
};

/// Pages 400px apart; transitions complete instantly.
struct Strip {
    pages: usize,
    scroll: Point,
}

impl PagedSurface for Strip {
    type Node = usize;

    fn page_nodes(&self, _selector: Option<&str>) -> Vec<usize> {
        (0..self.pages).collect()
    }

    fn scroll_position(&self) -> Point {
        self.scroll
    }

    fn node_position(&self, node: &usize) -> Point {
        Point::new(*node as f64 * 400.0, 0.0)
    }

    fn set_translation(&mut self, target: &OffsetTarget<usize>, translation: Vec2) {
        if let OffsetTarget::Content = target {
            self.scroll = Point::new(-translation.x, -translation.y);
        }
    }

    fn start_transition(&mut self, target: &OffsetTarget<usize>, transition: &Transition) {
        self.set_translation(target, transition.translation());
    }

    fn set_node_hidden(&mut self, node: &usize, hidden: bool) {
        black_box((node, hidden));
    }
}

fn rendered(pages: usize, config: PaginatorConfig) -> (Paginator<usize>, Strip) {
    let mut strip = Strip {
        pages,
        scroll: Point::ZERO,
    };
    let mut paginator = Paginator::new(config);
    paginator.on_render(&mut strip);
    (paginator, strip)
}

fn bench_compute_stage(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginator/compute_stage");

    for total in [16usize, 1_024, 65_536] {
        group.throughput(Throughput::Elements(total as u64));
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter(|| {
                for index in 0..total {
                    black_box(compute_stage(black_box(index), total, 1));
                }
            });
        });
    }

    group.finish();
}

fn bench_horizontal_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginator/on_move");

    // One gesture of 256 samples: the per-frame cost while the content follows the pointer.
    let samples: Vec<Point> = (0..256).map(|i| Point::new(400.0 - i as f64, 200.0)).collect();
    group.throughput(Throughput::Elements(samples.len() as u64));
    group.bench_function("horizontal", |b| {
        b.iter_batched(
            || rendered(8, PaginatorConfig::default()),
            |(mut paginator, mut strip)| {
                let _ = paginator.on_move_start(&mut strip, Point::new(400.0, 200.0));
                for &pointer in &samples {
                    black_box(paginator.on_move(&mut strip, pointer));
                }
                black_box(paginator);
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

fn bench_optimized_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("paginator/optimized_sweep");

    // Walk the whole page set with memory optimization on; each step re-stages.
    for total in [64usize, 1_024] {
        group.throughput(Throughput::Elements(total as u64));
        group.bench_with_input(BenchmarkId::from_parameter(total), &total, |b, &total| {
            b.iter_batched(
                || {
                    let config = PaginatorConfig::default()
                        .with_optimize_memory(true)
                        .with_gate_navigation(false);
                    rendered(total, config)
                },
                |(mut paginator, mut strip)| {
                    for _ in 0..total {
                        black_box(paginator.next(&mut strip));
                    }
                    black_box(paginator);
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_stage,
    bench_horizontal_drag,
    bench_optimized_sweep
);
criterion_main!(benches);
