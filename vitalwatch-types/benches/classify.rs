use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vitalwatch_types::{classify, evaluate, evaluate_with, AgeBandKind, Tolerance};

/// Benchmark classification across every band
fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");

    for age in [0.5f64, 4.0, 8.0, 18.0, 36.0].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(age), age, |b, &age| {
            b.iter(|| classify(black_box(age)));
        });
    }
    group.finish();
}

/// Benchmark status evaluation (hot path for the dashboard)
fn bench_evaluate(c: &mut Criterion) {
    let band = AgeBandKind::Infant.band();

    c.bench_function("evaluate", |b| {
        b.iter(|| evaluate(black_box(125.0), black_box(&band)));
    });
}

/// Benchmark evaluation with a custom tolerance
fn bench_evaluate_with(c: &mut Criterion) {
    let band = AgeBandKind::Toddler.band();
    let tolerance = Tolerance::new(5.0).unwrap();

    c.bench_function("evaluate_with", |b| {
        b.iter(|| evaluate_with(black_box(115.0), black_box(&band), black_box(tolerance)));
    });
}

/// Benchmark classify followed by evaluate, as done per child per snapshot
fn bench_classify_and_evaluate(c: &mut Criterion) {
    c.bench_function("classify_and_evaluate", |b| {
        b.iter(|| {
            let band = classify(black_box(12.0)).unwrap();
            evaluate(black_box(115.0), &band)
        });
    });
}

criterion_group!(
    benches,
    bench_classify,
    bench_evaluate,
    bench_evaluate_with,
    bench_classify_and_evaluate,
);
criterion_main!(benches);
