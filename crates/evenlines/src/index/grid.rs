//! Uniform bucket grid with ring search.
//!
//! Points are bucketed by cell over a fixed rectangle (plus a one-cell margin).
//! Points outside that rectangle go to a spill list that every query scans,
//! so correctness never depends on the rectangle being tight.

use nalgebra::Vector2;

use super::{LineId, NearestIndex};
use crate::field::Bounds2;

/// Upper bound on the number of buckets; coarser cells are used beyond it.
const MAX_CELLS: usize = 1 << 22;

/// Bucket grid keyed by [`LineId`].
#[derive(Clone, Debug)]
pub struct GridIndex {
    cell_size: f64,
    inv_cell_size: f64,
    origin: Vector2<f64>,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<(LineId, Vector2<f64>)>>,
    spill: Vec<(LineId, Vector2<f64>)>,
    count: usize,
}

impl GridIndex {
    /// Grid over `bounds` with the requested cell edge.
    ///
    /// A non-positive or non-finite `cell_size` falls back to the larger side
    /// of `bounds` (or 1.0 for a degenerate rectangle).
    pub fn with_cell_size(bounds: Bounds2, cell_size: f64) -> Self {
        let ext = bounds.extent();
        let span = ext.x.max(ext.y);
        let fallback = if span.is_finite() && span > 0.0 { span } else { 1.0 };
        let mut cs = if cell_size.is_finite() && cell_size > 0.0 {
            cell_size
        } else {
            fallback
        };
        let dims = |cs: f64| {
            let cols = (ext.x.max(0.0) / cs).ceil() as usize + 3;
            let rows = (ext.y.max(0.0) / cs).ceil() as usize + 3;
            (cols, rows)
        };
        let (mut cols, mut rows) = dims(cs);
        while cols.saturating_mul(rows) > MAX_CELLS {
            cs *= 2.0;
            (cols, rows) = dims(cs);
        }
        Self {
            cell_size: cs,
            inv_cell_size: cs.recip(),
            origin: bounds.min - Vector2::repeat(cs),
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
            spill: Vec::new(),
            count: 0,
        }
    }

    /// Grid sized for `points`: about one point per cell on average.
    pub fn fitted(points: &[Vector2<f64>]) -> Self {
        let Some(bounds) = Bounds2::of_points(points) else {
            return Self::with_cell_size(Bounds2::new(Vector2::zeros(), Vector2::zeros()), 1.0);
        };
        let ext = bounds.extent();
        let n = points.len().max(1) as f64;
        let area = ext.x * ext.y;
        let cell = if area > 0.0 {
            (area / n).sqrt()
        } else {
            // Collinear or coincident input.
            ext.x.max(ext.y) / n
        };
        Self::with_cell_size(bounds, cell)
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Bucket holding `p`, or `None` when `p` lies outside the grid.
    fn bucket_of(&self, p: Vector2<f64>) -> Option<usize> {
        let (col, row) = self.cell_coords(p);
        if col < 0.0 || row < 0.0 || col >= self.cols as f64 || row >= self.rows as f64 {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Cell `(col, row)` for `p`, clamped into the grid.
    fn clamped_cell(&self, p: Vector2<f64>) -> (usize, usize) {
        let (col, row) = self.cell_coords(p);
        let col = (col.max(0.0) as usize).min(self.cols - 1);
        let row = (row.max(0.0) as usize).min(self.rows - 1);
        (col, row)
    }

    #[inline]
    fn cell_coords(&self, p: Vector2<f64>) -> (f64, f64) {
        let local = (p - self.origin) * self.inv_cell_size;
        (local.x.floor(), local.y.floor())
    }
}

impl NearestIndex for GridIndex {
    fn insert(&mut self, id: LineId, points: &[Vector2<f64>]) {
        for &p in points {
            debug_assert!(p.x.is_finite() && p.y.is_finite(), "non-finite point {p:?}");
            match self.bucket_of(p) {
                Some(b) => self.cells[b].push((id, p)),
                None => self.spill.push((id, p)),
            }
            self.count += 1;
        }
    }

    fn remove(&mut self, id: LineId, points: &[Vector2<f64>]) {
        let mut removed = 0;
        let mut spilled = false;
        for &p in points {
            match self.bucket_of(p) {
                Some(b) => {
                    let cell = &mut self.cells[b];
                    let before = cell.len();
                    cell.retain(|(k, _)| *k != id);
                    removed += before - cell.len();
                }
                None => spilled = true,
            }
        }
        if spilled {
            let before = self.spill.len();
            self.spill.retain(|(k, _)| *k != id);
            removed += before - self.spill.len();
        }
        self.count -= removed;
    }

    fn nearest_distance(&self, query: Vector2<f64>) -> f64 {
        if self.count == 0 {
            return f64::INFINITY;
        }
        let mut best = self
            .spill
            .iter()
            .map(|(_, p)| (p - query).norm_squared())
            .fold(f64::INFINITY, f64::min);

        let (qcol, qrow) = self.clamped_cell(query);
        let max_ring = (self.cols - 1).max(self.rows - 1);
        for ring in 0..=max_ring {
            // The query may sit anywhere in its cell, so only rings ≥ 2 have a
            // useful lower bound of (ring - 1) cells.
            if ring >= 2 {
                let min_ring = (ring - 1) as f64 * self.cell_size;
                if min_ring * min_ring > best {
                    break;
                }
            }
            let col_lo = qcol.saturating_sub(ring);
            let col_hi = (qcol + ring).min(self.cols - 1);
            let row_lo = qrow.saturating_sub(ring);
            let row_hi = (qrow + ring).min(self.rows - 1);
            for row in row_lo..=row_hi {
                for col in col_lo..=col_hi {
                    let on_border = row == qrow.wrapping_sub(ring)
                        || row == qrow + ring
                        || col == qcol.wrapping_sub(ring)
                        || col == qcol + ring;
                    if ring > 0 && !on_border {
                        continue;
                    }
                    for (_, p) in &self.cells[row * self.cols + col] {
                        let d = (p - query).norm_squared();
                        if d < best {
                            best = d;
                        }
                    }
                }
            }
        }
        best.sqrt()
    }

    fn len(&self) -> usize {
        self.count
    }
}
