//! Dynamic nearest-neighbor indices over committed streamline points.
//!
//! Purpose
//! - Answer "distance from `q` to the closest indexed point" while whole
//!   streamlines are inserted and removed as batches.
//! - Keep the placement loop independent of the backing structure: it only
//!   talks to [`NearestIndex`].
//!
//! Implementations
//! - [`GridIndex`]: uniform bucket grid with ring search. Default.
//! - [`BruteIndex`]: linear scan; reference for tests and tiny inputs.
//!
//! Both tolerate duplicate and collinear points.

mod brute;
mod grid;

pub use brute::BruteIndex;
pub use grid::GridIndex;

use nalgebra::Vector2;

/// Identifier of one committed streamline (its position in commit order).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LineId(pub usize);

/// Insert / remove point batches and query nearest distances.
pub trait NearestIndex {
    /// Add all `points` of line `id`.
    fn insert(&mut self, id: LineId, points: &[Vector2<f64>]);

    /// Drop every entry of line `id`. `points` must be the slice passed to `insert`.
    fn remove(&mut self, id: LineId, points: &[Vector2<f64>]);

    /// Euclidean distance from `query` to the closest indexed point;
    /// `f64::INFINITY` when the index is empty.
    fn nearest_distance(&self, query: Vector2<f64>) -> f64;

    /// Number of indexed points.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run `f` with line `id` temporarily removed, then put it back.
///
/// The index leaves this call in the state it entered with.
pub fn excluding<I, T, F>(index: &mut I, id: LineId, points: &[Vector2<f64>], f: F) -> T
where
    I: NearestIndex + ?Sized,
    F: FnOnce(&I) -> T,
{
    index.remove(id, points);
    let out = f(&*index);
    index.insert(id, points);
    out
}

#[cfg(test)]
mod tests;
