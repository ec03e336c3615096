//! Growing a line from a seed in both directions, and trimming it against
//! committed lines.
//!
//! Both steps are pure functions over [`SeededLine`]; the seed index is what
//! lets trimming walk outward from the seed instead of inward from the ends.

use nalgebra::Vector2;

use super::types::SeededLine;
use crate::field::{integrate, VectorField};
use crate::index::NearestIndex;

/// Prefix of `points` before the first non-finite entry.
pub fn truncate_at_nan(mut points: Vec<Vector2<f64>>) -> Vec<Vector2<f64>> {
    if let Some(k) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
        points.truncate(k);
    }
    points
}

/// Join a forward and a backward branch that both start at the seed.
///
/// A branch with fewer than 2 points does not count. With both valid, the
/// backward branch is reversed, its copy of the seed dropped, and the forward
/// branch appended; the seed index is the reversed segment's length. A lone
/// valid branch is used as traced, seed first.
pub fn splice(forward: Vec<Vector2<f64>>, backward: Vec<Vector2<f64>>) -> SeededLine {
    let fwd_ok = forward.len() >= 2;
    let bwd_ok = backward.len() >= 2;
    match (fwd_ok, bwd_ok) {
        (true, true) => {
            let mut points: Vec<_> = backward[1..].iter().rev().copied().collect();
            let seed = points.len();
            points.extend(forward);
            SeededLine { points, seed }
        }
        (true, false) => SeededLine {
            points: forward,
            seed: 0,
        },
        (false, true) => SeededLine {
            points: backward,
            seed: 0,
        },
        (false, false) => SeededLine::empty(),
    }
}

/// Trace from `seed` on `field` (forward) and on `reversed` (its negation).
pub fn grow(
    field: &VectorField,
    reversed: &VectorField,
    seed: Vector2<f64>,
    step: f64,
    max_steps: usize,
) -> SeededLine {
    let forward = truncate_at_nan(integrate(field, seed, step, max_steps).points);
    let backward = truncate_at_nan(integrate(reversed, seed, step, max_steps).points);
    splice(forward, backward)
}

/// Cut `line` to the stretch around its seed whose inner points stay at
/// least `d_test` away from everything in `index`.
///
/// Walks from the seed toward each end up to the first point that comes
/// closer than `d_test`; that point is the boundary and is kept. Returns an
/// empty line when the seed itself is too close.
pub fn trim<I: NearestIndex + ?Sized>(line: &SeededLine, d_test: f64, index: &I) -> SeededLine {
    let Some(seed_point) = line.seed_point() else {
        return SeededLine::empty();
    };
    let admissible = |p: Vector2<f64>| index.nearest_distance(p) >= d_test;
    if !admissible(seed_point) {
        return SeededLine::empty();
    }
    let pts = &line.points;
    let mut hi = line.seed;
    while hi + 1 < pts.len() {
        hi += 1;
        if !admissible(pts[hi]) {
            break;
        }
    }
    let mut lo = line.seed;
    while lo > 0 {
        lo -= 1;
        if !admissible(pts[lo]) {
            break;
        }
    }
    SeededLine {
        points: pts[lo..=hi].to_vec(),
        seed: line.seed - lo,
    }
}
