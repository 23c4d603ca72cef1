use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hitmiss::{rejection_integration, RejectionConfig, RejectionIntegrator};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn exp_square(x: f64) -> f64 {
    (x * x).exp()
}

fn rejection_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("Rejection exp(x^2) on [0, 2]");
    let samples = 1_000_000;
    let envelope = 4.0_f64.exp();

    group.bench_function("Sequential", |b| {
        b.iter(|| {
            let mut rng = ChaCha8Rng::seed_from_u64(1234);
            rejection_integration(exp_square, 0.0, 2.0, envelope, samples, &mut rng).unwrap()
        })
    });

    group.bench_function("Parallel (Rayon)", |b| {
        let config = RejectionConfig::default()
            .with_samples(samples)
            .with_seed(1234);
        let integrator = RejectionIntegrator::new(0.0, 2.0, envelope, config).unwrap();
        b.iter(|| integrator.integrate(black_box(&exp_square)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, rejection_benchmark);
criterion_main!(benches);
