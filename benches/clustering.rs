use cleave::{Agglomerative, Kmeans, RandomIndices};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::prelude::*;

fn synthetic(n: usize, d: usize) -> Vec<Vec<f64>> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..n)
        .map(|_| (0..d).map(|_| rng.random::<f64>()).collect())
        .collect()
}

fn bench_kmeans(c: &mut Criterion) {
    let mut group = c.benchmark_group("kmeans");
    let data = synthetic(1000, 16);

    group.bench_function("fit_n1000_d16_k10", |b| {
        b.iter(|| {
            let model = Kmeans::new(10);
            model
                .fit(black_box(&data), RandomIndices::seeded(42))
                .unwrap();
        })
    });

    group.finish();
}

fn bench_agglomerative(c: &mut Criterion) {
    let mut group = c.benchmark_group("agglomerative");
    group.sample_size(10);
    let data = synthetic(60, 4);

    group.bench_function("complete_link_n60_d4", |b| {
        b.iter(|| Agglomerative::new().fit(black_box(&data)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_kmeans, bench_agglomerative);
criterion_main!(benches);
