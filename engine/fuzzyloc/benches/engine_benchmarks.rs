//! Inference and evaluation performance benchmarks.
//!
//! Run with: `cargo bench --bench engine_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fuzzyloc::{
    default_membership_settings, default_rules, evaluate, generate_dataset, infer, InputVector,
};

fn bench_infer(c: &mut Criterion) {
    let mut group = c.benchmark_group("infer");

    for set_count in [3, 5, 7] {
        let settings = default_membership_settings(set_count).unwrap();
        let rules = default_rules(set_count).unwrap();
        let inputs = InputVector {
            anchor_ratio: 22.0,
            trans_range: 55.0,
            node_density: 18.0,
            iterations: 40.0,
        };

        group.bench_with_input(
            BenchmarkId::new("sets", set_count),
            &(settings, rules),
            |b, (settings, rules)| {
                b.iter(|| infer(black_box(&inputs), rules, settings));
            },
        );
    }

    group.finish();
}

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    let settings = default_membership_settings(5).unwrap();
    let rules = default_rules(5).unwrap();

    for size in [50, 200, 1000] {
        let mut rng = fastrand::Rng::with_seed(99);
        let dataset = generate_dataset(size, &mut rng);

        group.bench_with_input(BenchmarkId::new("samples", size), &dataset, |b, dataset| {
            b.iter(|| evaluate(black_box(dataset), &rules, &settings).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_infer, bench_evaluate);
criterion_main!(benches);
