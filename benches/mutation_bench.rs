use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use serde_json::json;

use dihypergraph::prelude::*;

/// Chain of `n` hyperedges: edge `i` relates `{i, i+1} -> {i+2}`.
fn chain(n: u64) -> DiHypergraph {
    let mut h = DiHypergraph::new();
    for i in 0..n {
        h.add_edge([i, i + 1], [i + 2]).unwrap();
    }
    h
}

/// Star of `n` hyperedges all leaving node 0, so removing the center
/// cascades through every one of them.
fn star(n: u64) -> DiHypergraph {
    let mut h = DiHypergraph::new();
    for i in 1..=n {
        h.add_edge([0u64], [i]).unwrap();
    }
    h
}

fn loose_items(n: u64) -> serde_json::Value {
    let items: Vec<_> = (0..n)
        .map(|i| json!([[i, i + 1], [i + 2]]))
        .collect();
    json!(items)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for &n in &[100u64, 1_000, 10_000] {
        group.bench_with_input(BenchmarkId::new("typed_chain", n), &n, |b, &n| {
            b.iter(|| chain(n));
        });

        let data = loose_items(n);
        group.bench_with_input(BenchmarkId::new("loose_chain", n), &data, |b, data| {
            b.iter(|| {
                let _ = DiHypergraph::from_value(data).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_removal(c: &mut Criterion) {
    let mut group = c.benchmark_group("removal");

    for &n in &[100u64, 1_000, 10_000] {
        let base = chain(n);

        group.bench_with_input(BenchmarkId::new("weak_every_third_node", n), &base, |b, base| {
            b.iter_batched(
                || base.clone(),
                |mut h| {
                    for i in (0..n).step_by(3) {
                        let _ = h.remove_node(i, RemovalMode::Weak);
                    }
                    h
                },
                BatchSize::SmallInput,
            );
        });

        let hub = star(n);
        group.bench_with_input(BenchmarkId::new("strong_star_center", n), &hub, |b, hub| {
            b.iter_batched(
                || hub.clone(),
                |mut h| {
                    let _ = h.remove_node(0u64, RemovalMode::Strong);
                    h
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_copy_and_serde(c: &mut Criterion) {
    let mut group = c.benchmark_group("copy_and_serde");

    for &n in &[1_000u64, 10_000] {
        let base = chain(n);

        group.bench_with_input(BenchmarkId::new("copy", n), &base, |b, base| {
            b.iter(|| base.copy());
        });

        group.bench_with_input(BenchmarkId::new("json_roundtrip", n), &base, |b, base| {
            b.iter(|| {
                let bytes = serde_json::to_vec(base).unwrap();
                let back: DiHypergraph = serde_json::from_slice(&bytes).unwrap();
                back
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_removal, bench_copy_and_serde);
criterion_main!(benches);
