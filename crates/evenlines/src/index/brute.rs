use nalgebra::Vector2;

use super::{LineId, NearestIndex};

/// Flat list of `(line, point)` entries scanned on every query.
#[derive(Clone, Debug, Default)]
pub struct BruteIndex {
    entries: Vec<(LineId, Vector2<f64>)>,
}

impl BruteIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NearestIndex for BruteIndex {
    fn insert(&mut self, id: LineId, points: &[Vector2<f64>]) {
        self.entries.extend(points.iter().map(|&p| (id, p)));
    }

    fn remove(&mut self, id: LineId, _points: &[Vector2<f64>]) {
        self.entries.retain(|(k, _)| *k != id);
    }

    fn nearest_distance(&self, query: Vector2<f64>) -> f64 {
        self.entries
            .iter()
            .map(|(_, p)| (p - query).norm_squared())
            .fold(f64::INFINITY, f64::min)
            .sqrt()
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
