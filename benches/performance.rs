use criterion::{black_box, criterion_group, criterion_main, Criterion};
use seqflow::prelude::*;

const ROWS: i64 = 10_000;

fn bench_pipeline(c: &mut Criterion) {
    let base = xrange(1, ROWS, 1).expect("valid range");
    c.bench_function("map_filter_take", |b| {
        b.iter(|| {
            let out = base
                .map(|x| x * 3)
                .filter(|x| x % 2 == 0)
                .take(1_000)
                .expect("non-negative count");
            black_box(out.count())
        })
    });
}

fn bench_memoized_source(c: &mut Criterion) {
    c.bench_function("memoized_source_two_passes", |b| {
        b.iter(|| {
            let seq = sequence(source((0..ROWS).map(|x| x ^ 0x5a)));
            let first = seq.fold(0_i64, |a, x| a.wrapping_add(x));
            let second = seq.fold(0_i64, |a, x| a.wrapping_add(x));
            black_box((first, second))
        })
    });
}

fn bench_group_by(c: &mut Criterion) {
    let base = xrange(1, ROWS, 1).expect("valid range");
    c.bench_function("group_by_mod_64", |b| {
        b.iter(|| black_box(base.group_by(|x| x % 64).len()))
    });
}

fn bench_set_build(c: &mut Criterion) {
    let items: Vec<i64> = (0..ROWS).map(|x| x % 2_500).collect();
    c.bench_function("set_from_duplicates", |b| {
        b.iter(|| black_box(set(items.clone()).len()))
    });
}

fn bench_join(c: &mut Criterion) {
    let left = xrange(1, 2_000, 1).expect("valid range");
    let right = xrange(1, 2_000, 1)
        .expect("valid range")
        .map(|x| (x % 500, x));
    c.bench_function("hash_join", |b| {
        b.iter(|| {
            let joined = left.join(&right, |l| l % 500, |r: &(i64, i64)| r.0, |l, r| {
                l + r.1
            });
            black_box(joined.count())
        })
    });
}

criterion_group!(
    pipelines,
    bench_pipeline,
    bench_memoized_source,
    bench_group_by,
    bench_set_build,
    bench_join
);
criterion_main!(pipelines);
