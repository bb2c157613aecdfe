//! Windowing benchmarks over large flat and nested trees.
//!
//! Window resolution should stay logarithmic in the sibling count; position
//! recalculation is linear in the number of laid-out nodes.
//!
//! Run with: cargo bench --bench window_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use treescroll::model::{TreeModel, TreeState};
use treescroll::virtual_scroll::positions::recalc_positions;
use treescroll::virtual_scroll::window::{resolve_window, WindowParams};
use treescroll::virtual_scroll::{MemorySurface, ScrollTuning, VirtualScroll};

const SIZES: [usize; 3] = [1_000, 100_000, 1_000_000];

fn flat_tree(count: usize) -> TreeModel {
    let mut tree = TreeModel::default();
    for i in 0..count {
        tree.add_root(&format!("row{i}"), 22.0 + (i % 3) as f64);
    }
    recalc_positions(&mut tree);
    tree
}

/// `folders` expanded roots with `per_folder` children each.
fn nested_tree(folders: usize, per_folder: usize) -> TreeModel {
    let mut tree = TreeModel::default();
    for f in 0..folders {
        let folder = tree.add_root(&format!("dir{f}"), 22.0);
        let names: Vec<String> = (0..per_folder).map(|c| format!("file{f}_{c}")).collect();
        let rows: Vec<(&str, f64)> = names.iter().map(|n| (n.as_str(), 22.0)).collect();
        tree.load_children(folder, &rows);
        tree.set_expanded(folder, true);
    }
    tree
}

fn bench_resolve_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_window");

    for size in SIZES {
        let tree = flat_tree(size);
        let total = tree.virtual_root().map(|r| r.height()).unwrap_or(0.0);
        let params = WindowParams {
            enabled: true,
            scroll_offset: total / 2.0,
            viewport_height: Some(800.0),
            buffer: 300.0,
        };

        group.bench_with_input(BenchmarkId::new("middle", size), &size, |b, _| {
            b.iter(|| black_box(resolve_window(&tree, tree.roots(), black_box(&params))))
        });
    }

    group.finish();
}

fn bench_recalc_positions(c: &mut Criterion) {
    let mut group = c.benchmark_group("recalc_positions");
    group.sample_size(20);

    for (folders, per_folder) in [(100, 100), (1_000, 100)] {
        let mut tree = nested_tree(folders, per_folder);
        let id = format!("{folders}x{per_folder}");

        group.bench_function(BenchmarkId::new("nested", id), |b| {
            b.iter(|| black_box(recalc_positions(&mut tree)))
        });
    }

    group.finish();
}

fn bench_scroll_sweep(c: &mut Criterion) {
    let mut tree = flat_tree(100_000);
    let mut scroll: VirtualScroll<MemorySurface> = VirtualScroll::new(ScrollTuning::default());
    scroll.init(&mut tree);
    let total = scroll.total_height(&tree);

    c.bench_function("scroll_sweep_100k", |b| {
        b.iter(|| {
            let mut top = 0.0;
            while top < total {
                scroll.set_scroll(&tree, MemorySurface::new(800.0, total).with_scroll(top, 0.0));
                black_box(scroll.viewport_nodes().len());
                top += total / 64.0;
            }
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_window,
    bench_recalc_positions,
    bench_scroll_sweep
);
criterion_main!(benches);
