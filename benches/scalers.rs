//! Benchmarks for the scalers and masked reductions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ndarray::Array3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use temporal_norm::utils::masked_median;
use temporal_norm::{ScalerType, TemporalNorm};

const WINDOW: usize = 96;
const CHANNELS: usize = 4;

fn generate_batch(batch: usize, seed: u64) -> (Array3<f64>, Array3<bool>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let x = Array3::from_shape_fn((batch, WINDOW, CHANNELS), |(_, t, c)| {
        100.0 * c as f64 + t as f64 + rng.gen_range(-5.0..5.0)
    });
    // Mask roughly a tenth of the entries plus the last quarter of the window.
    let mask = Array3::from_shape_fn((batch, WINDOW, CHANNELS), |(_, t, _)| {
        t < WINDOW * 3 / 4 && rng.gen_bool(0.9)
    });
    (x, mask)
}

fn bench_forward(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaler_forward");

    for batch in [1, 32, 256].iter() {
        let (x, mask) = generate_batch(*batch, 42);
        for scaler in ScalerType::ALL {
            group.bench_with_input(BenchmarkId::new(scaler.name(), batch), batch, |b, _| {
                b.iter(|| scaler.forward(black_box(&x), black_box(&mask), 1, 1e-6))
            });
        }
    }

    group.finish();
}

fn bench_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("temporal_norm_round_trip");

    for batch in [32, 256].iter() {
        let (x, mask) = generate_batch(*batch, 7);
        for scaler in [ScalerType::Standard, ScalerType::Robust] {
            group.bench_with_input(BenchmarkId::new(scaler.name(), batch), batch, |b, _| {
                let mut norm = TemporalNorm::with_scaler(scaler).with_dim(1);
                b.iter(|| {
                    let z = norm.transform(black_box(&x), black_box(&mask)).unwrap();
                    norm.inverse_transform(&z, None, None).unwrap()
                })
            });
        }
    }

    group.finish();
}

fn bench_masked_median(c: &mut Criterion) {
    let mut group = c.benchmark_group("masked_median");

    for batch in [32, 256, 1024].iter() {
        let (x, mask) = generate_batch(*batch, 3);
        group.bench_with_input(BenchmarkId::from_parameter(batch), batch, |b, _| {
            b.iter(|| masked_median(black_box(&x), black_box(&mask), 1, true))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_forward, bench_round_trip, bench_masked_median);
criterion_main!(benches);
