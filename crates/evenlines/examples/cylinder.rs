//! Evenly-spaced streamlines for potential flow past a cylinder.
//!
//! Purpose
//! - Show a complete run: build a field (NaN inside the cylinder, where the
//!   flow is undefined), place streamlines, and recompute distances from the
//!   flat output as a cross-check.
//!
//! Usage
//!   cargo run -p evenlines --example cylinder

use std::time::Instant;

use evenlines::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use tracing_subscriber::fmt::SubscriberBuilder;

fn main() {
    SubscriberBuilder::default().with_target(false).init();

    let axis: Vec<f64> = (0..61).map(|k| -1.5 + 3.0 * k as f64 / 60.0).collect();
    let radius2: f64 = 0.4 * 0.4;
    let field = VectorField::from_fn(axis.clone(), axis, |p| {
        let r2 = p.norm_squared();
        if r2 < radius2 {
            return Vec2::new(f64::NAN, f64::NAN);
        }
        let r4 = r2 * r2;
        Vec2::new(
            1.0 - radius2 * (p.x * p.x - p.y * p.y) / r4,
            -2.0 * radius2 * p.x * p.y / r4,
        )
    })
    .expect("cylinder field");

    let cfg = PlacementCfg {
        d_sep: 0.08,
        d_test: 0.04,
        step: 0.2,
        max_steps: 3000,
    };
    let mut rng = StdRng::seed_from_u64(2024);

    let start = Instant::now();
    let placement = place(&field, cfg, &mut rng).expect("placement");
    let stats = placement.stats;
    let set = placement.into_streamline_set();
    let elapsed = start.elapsed().as_secs_f64() * 1e3;

    let check = nearest_other_distances(&set.xy_matrix(), false).expect("layout");
    let max_dev = check
        .iter()
        .zip(&set.distance)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max);
    let min_dist = set
        .distance
        .iter()
        .copied()
        .filter(|d| !d.is_nan())
        .fold(f64::INFINITY, f64::min);

    println!(
        "lines={} rows={} candidates={} rejected_sep={} rejected_short={}",
        set.line_count(),
        set.len(),
        stats.candidates,
        stats.rejected_separation,
        stats.rejected_short
    );
    println!("min_distance={min_dist:.6} d_test={:.6}", cfg.d_test);
    println!("recompute_max_deviation={max_dev:.3e}");
    println!("place_time_ms={elapsed:.3}");
}
