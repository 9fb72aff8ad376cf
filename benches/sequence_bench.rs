// Benchmarks for the hot pull paths: operator chains, deduplication, and
// the external merge sort.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seq_engine::{source, ExternalSort};

fn bench_operator_chain(c: &mut Criterion) {
    c.bench_function("map_filter_fold_100k", |b| {
        b.iter(|| {
            let sum = source::range(0, 100_000)
                .unwrap()
                .map(|x| x * 3)
                .unwrap()
                .filter(|x| x % 7 != 0)
                .unwrap()
                .fold(0i64, |acc, x| acc + x)
                .unwrap();
            black_box(sum)
        })
    });
}

fn bench_distinct(c: &mut Criterion) {
    c.bench_function("distinct_100k_mod_1k", |b| {
        b.iter(|| {
            let unique = source::range(0, 100_000)
                .unwrap()
                .map(|x| x % 1_000)
                .unwrap()
                .distinct()
                .unwrap()
                .count()
                .unwrap();
            black_box(unique)
        })
    });
}

fn bench_sliding(c: &mut Criterion) {
    c.bench_function("sliding_10k_w64_s16", |b| {
        b.iter(|| {
            let windows = source::range(0, 10_000)
                .unwrap()
                .sliding(64, 16)
                .unwrap()
                .count()
                .unwrap();
            black_box(windows)
        })
    });
}

fn bench_external_sort(c: &mut Criterion) {
    c.bench_function("external_sort_10k_cap_512", |b| {
        b.iter(|| {
            let input: Vec<i64> = (0..10_000).map(|x| (x * 7919) % 10_000).collect();
            let sorter = ExternalSort::new(512).unwrap();
            let count = sorter
                .sort(source::from_vec(input))
                .unwrap()
                .count()
                .unwrap();
            black_box(count)
        })
    });
}

criterion_group!(
    benches,
    bench_operator_chain,
    bench_distinct,
    bench_sliding,
    bench_external_sort
);
criterion_main!(benches);
