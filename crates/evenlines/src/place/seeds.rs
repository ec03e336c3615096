//! Seed candidates offset perpendicular to a streamline.

use nalgebra::Vector2;

/// Points at distance `buffer` on both sides of every segment midpoint.
///
/// For segment `a → b` with unit normal `n` (tangent rotated by +90°) this
/// emits `mid + buffer·n` then `mid − buffer·n`. Zero-length and non-finite
/// segments are skipped, so a clean line of `N` points yields `2(N−1)`
/// candidates. No separation filtering happens here.
pub fn offset_candidates(line: &[Vector2<f64>], buffer: f64) -> Vec<Vector2<f64>> {
    let mut out = Vec::with_capacity(2 * line.len().saturating_sub(1));
    for w in line.windows(2) {
        let (a, b) = (w[0], w[1]);
        let seg = b - a;
        let len = seg.norm();
        if !(len.is_finite()) || len <= 0.0 {
            continue;
        }
        let t = seg / len;
        let n = Vector2::new(-t.y, t.x);
        let mid = (a + b) * 0.5;
        out.push(mid + n * buffer);
        out.push(mid - n * buffer);
    }
    out
}
