// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_tree_select::{SelectorConfig, TreeItem, TreeSelector};

/// A complete tree with `fanout` children per parent and `depth` levels below the root.
fn gen_nested(fanout: usize, depth: usize) -> (Vec<TreeItem>, usize) {
    fn build(prefix: &str, fanout: usize, depth: usize, count: &mut usize) -> TreeItem {
        *count += 1;
        let mut item = TreeItem::new(prefix, format!("node {prefix}"));
        if depth > 0 {
            item = item.with_children(
                (0..fanout)
                    .map(|i| build(&format!("{prefix}.{i}"), fanout, depth - 1, count))
                    .collect(),
            );
        }
        item
    }
    let mut count = 0;
    let root = build("0", fanout, depth, &mut count);
    (vec![root], count)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &(fanout, depth) in &[(4usize, 5usize), (8, 4), (32, 2)] {
        let (items, count) = gen_nested(fanout, depth);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_function(format!("set_items_f{fanout}_d{depth}"), |b| {
            b.iter_batched(
                || items.clone(),
                |items| {
                    let mut s = TreeSelector::new(SelectorConfig::default());
                    s.set_items(1, items);
                    black_box(s.index().len());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_toggle(c: &mut Criterion) {
    let mut group = c.benchmark_group("toggle");
    let (items, _) = gen_nested(8, 4);
    let mut leaves_mode = TreeSelector::new(SelectorConfig::default().with_multi_select(true));
    leaves_mode.set_items(1, items.clone());
    group.bench_function("root_select_leaves_f8_d4", |b| {
        b.iter(|| {
            // Select every leaf, then deselect them all again.
            let on = leaves_mode.toggle("0").map(|c| c.selected.len());
            let off = leaves_mode.toggle("0").map(|c| c.selected.len());
            black_box((on, off));
        })
    });

    let mut single = TreeSelector::new(SelectorConfig::default());
    single.set_items(1, items);
    let deep_leaves = ["0.1.2.3.4", "0.7.6.5.4", "0.3.3.3.3"];
    group.bench_function("single_select_deep_leaf_f8_d4", |b| {
        let mut i = 0;
        b.iter(|| {
            i = (i + 1) % deep_leaves.len();
            black_box(single.toggle(deep_leaves[i]).is_some());
        })
    });
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let (items, count) = gen_nested(8, 4);
    let mut s = TreeSelector::new(SelectorConfig::default());
    s.set_items(1, items);
    group.throughput(Throughput::Elements(count as u64));
    for query in ["0.4.4", "NODE 0.1", "missing"] {
        group.bench_function(format!("query_{}", query.replace(' ', "_")), |b| {
            b.iter(|| {
                s.set_search_query(Some(query));
                let n = s.filtered_items().count();
                s.set_search_query(None);
                black_box(n);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_toggle, bench_search);
criterion_main!(benches);
