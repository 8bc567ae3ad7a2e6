//! Benchmarks for trace generation
//!
//! Measures the cost of recording full snapshots for each algorithm at the
//! array sizes the visualizer allows (5..=100).

use algoviz_trace::{generate_array, sorted_copy, AlgorithmKind};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Benchmark sort trace generation on random input
fn bench_sort_traces(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_trace");

    for &size in &[5usize, 30, 100] {
        let input = generate_array(&mut StdRng::seed_from_u64(size as u64), size, 5, 100);
        group.throughput(Throughput::Elements(size as u64));

        for kind in AlgorithmKind::SORTING {
            group.bench_with_input(BenchmarkId::new(kind.id(), size), &input, |b, input| {
                b.iter(|| kind.generate(black_box(input), None))
            });
        }
    }
    group.finish();
}

/// Benchmark search trace generation, target at the far end
fn bench_search_traces(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_trace");

    for &size in &[5usize, 30, 100] {
        let input = sorted_copy(&generate_array(&mut StdRng::seed_from_u64(size as u64), size, 5, 100));
        let target = input.last().copied();

        for kind in AlgorithmKind::SEARCHING {
            group.bench_with_input(BenchmarkId::new(kind.id(), size), &input, |b, input| {
                b.iter(|| kind.generate(black_box(input), target))
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_sort_traces, bench_search_traces);
criterion_main!(benches);
