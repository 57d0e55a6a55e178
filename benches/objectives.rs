use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::Rng;
use w2vgrad::data::ToyDataset;
use w2vgrad::math::{normalize_rows, Matrix};
use w2vgrad::objective::{NegativeSampling, Objective, Softmax};
use w2vgrad::rng::rng_from_seed;

fn bench_objectives(c: &mut Criterion) {
    // A realistic vocabulary so the dense softmax cost shows up.
    let vocab_size = 10_000;
    let dim = 100;
    let mut rng = rng_from_seed(0);
    let output = normalize_rows(&Matrix::randn(vocab_size, dim, &mut rng));
    let predicted: Vec<f64> = (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect();
    let tokens: Vec<String> = (0..vocab_size).map(|i| format!("w{i}")).collect();
    let mut dataset = ToyDataset::with_tokens(tokens, 1);

    c.bench_function("softmax_objective", |b| {
        b.iter(|| {
            let g = Softmax.cost_and_gradient(
                black_box(&predicted),
                black_box(42),
                black_box(&output),
                &mut dataset,
            );
            black_box(g);
        });
    });

    let ns = NegativeSampling::default();
    c.bench_function("negative_sampling_objective", |b| {
        b.iter(|| {
            let g = ns.cost_and_gradient(
                black_box(&predicted),
                black_box(42),
                black_box(&output),
                &mut dataset,
            );
            black_box(g);
        });
    });
}

criterion_group!(benches, bench_objectives);
criterion_main!(benches);
