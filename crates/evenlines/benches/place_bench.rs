//! Criterion benchmarks for a full placement run on an analytic field.
//! Focus: d_sep in {0.08, 0.04, 0.02} on the unit square.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use evenlines::field::VectorField;
use evenlines::place::{evenly_spaced_streamlines, PlacementCfg};
use nalgebra::Vector2;
use rand::{rngs::StdRng, SeedableRng};

fn saddle_field() -> VectorField {
    let axis: Vec<f64> = (0..41).map(|k| -1.0 + 2.0 * k as f64 / 40.0).collect();
    VectorField::from_fn(axis.clone(), axis, |p| Vector2::new(p.x, -p.y + 0.3 * p.x))
        .expect("saddle field")
}

fn bench_place(c: &mut Criterion) {
    let field = saddle_field();
    let mut group = c.benchmark_group("place");
    group.sample_size(10);
    for &d_sep in &[0.08f64, 0.04, 0.02] {
        let cfg = PlacementCfg {
            d_sep,
            d_test: 0.5 * d_sep,
            step: 0.2,
            max_steps: 4000,
        };
        group.bench_with_input(BenchmarkId::new("saddle", d_sep), &cfg, |b, cfg| {
            b.iter(|| {
                let mut rng = StdRng::seed_from_u64(17);
                evenly_spaced_streamlines(&field, *cfg, &mut rng).unwrap()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_place);
criterion_main!(benches);
