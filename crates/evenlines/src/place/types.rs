//! Configuration and value types for the placement loop.

use nalgebra::Vector2;

use crate::error::StreamError;
use crate::index::NearestIndex;
use crate::post::{serialize, StreamlineSet};

/// Placement parameters.
///
/// `d_sep` gates where new lines may start; `d_test` gates how close a growing
/// line may come to committed ones. The two are independent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlacementCfg {
    /// Minimum distance from a seed candidate to any committed point.
    pub d_sep: f64,
    /// Minimum distance kept by a trimmed line to committed points.
    pub d_test: f64,
    /// Integration step as a fraction of the local grid cell.
    pub step: f64,
    /// Step limit per tracing direction.
    pub max_steps: usize,
}

impl Default for PlacementCfg {
    fn default() -> Self {
        Self {
            d_sep: 0.05,
            d_test: 0.025,
            step: 0.2,
            max_steps: 4000,
        }
    }
}

impl PlacementCfg {
    pub fn validate(&self) -> Result<(), StreamError> {
        for (name, value) in [("d_sep", self.d_sep), ("d_test", self.d_test), ("step", self.step)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(StreamError::params(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if self.max_steps == 0 {
            return Err(StreamError::params("max_steps must be >= 1"));
        }
        Ok(())
    }
}

/// A polyline together with the position of the point it was grown from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeededLine {
    pub points: Vec<Vector2<f64>>,
    /// Index of the seed in `points`; meaningless when `points` is empty.
    pub seed: usize,
}

impl SeededLine {
    pub fn empty() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn seed_point(&self) -> Option<Vector2<f64>> {
        self.points.get(self.seed).copied()
    }
}

/// Seed of a committed line and its distance to earlier lines when tested.
///
/// The first line is committed untested and records `f64::INFINITY`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptedSeed {
    pub point: Vector2<f64>,
    pub distance: f64,
}

/// Counters collected while the loop runs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlacementStats {
    pub batches: usize,
    pub candidates: usize,
    pub rejected_separation: usize,
    pub rejected_short: usize,
    pub committed: usize,
    /// Random draws needed to find the first seed.
    pub seed_draws: usize,
}

/// Result of a placement run.
///
/// `index` holds exactly the points of `lines`, line `k` under `LineId(k)`.
#[derive(Clone, Debug)]
pub struct Placement<I> {
    pub lines: Vec<Vec<Vector2<f64>>>,
    pub seeds: Vec<AcceptedSeed>,
    pub stats: PlacementStats,
    pub index: I,
}

impl<I: NearestIndex> Placement<I> {
    /// Run the post-processor over the committed lines.
    pub fn into_streamline_set(mut self) -> StreamlineSet {
        serialize(&self.lines, &mut self.index)
    }
}
