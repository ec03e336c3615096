//! Post-processing of placed streamlines and standalone distance recomputation.
//!
//! Both entry points measure, for every point, the distance to the closest
//! point on any *other* line: the line's own points are taken out of the
//! index around its queries and put back afterwards.
//!
//! Flat layout: lines are concatenated row by row with one NaN row after each
//! line. `StreamlineSet` always ends with a separator; standalone input must
//! not start or end with one.

use std::ops::Range;

use nalgebra::{DMatrix, Vector2};
use tracing::info;

use crate::error::StreamError;
use crate::index::{excluding, GridIndex, LineId, NearestIndex};

/// Four equally long columns sharing the same NaN separator rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StreamlineSet {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Distance to the nearest point of another line.
    pub distance: Vec<f64>,
    /// Cumulative arc length, 0 at each line's first point.
    pub arc_length: Vec<f64>,
}

impl StreamlineSet {
    /// Number of rows, separators included.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.x.iter().filter(|t| t.is_nan()).count()
    }

    /// Row ranges of the individual lines (separators excluded).
    pub fn line_ranges(&self) -> Vec<Range<usize>> {
        let mut out = Vec::new();
        let mut start = 0;
        for (k, t) in self.x.iter().enumerate() {
            if t.is_nan() {
                out.push(start..k);
                start = k + 1;
            }
        }
        out
    }

    /// Points of every line, in commit order.
    pub fn lines(&self) -> Vec<Vec<Vector2<f64>>> {
        self.line_ranges()
            .into_iter()
            .map(|r| r.map(|k| Vector2::new(self.x[k], self.y[k])).collect())
            .collect()
    }

    /// `(x, y)` as an n×2 matrix without the trailing separator, i.e. the
    /// layout accepted by [`nearest_other_distances`].
    pub fn xy_matrix(&self) -> DMatrix<f64> {
        let n = self.len().saturating_sub(1);
        DMatrix::from_fn(n, 2, |r, c| if c == 0 { self.x[r] } else { self.y[r] })
    }
}

/// Flatten committed lines and attach per-point distances and arc lengths.
///
/// `index` must hold line `k` under `LineId(k)`; it is returned unchanged.
pub fn serialize<I>(lines: &[Vec<Vector2<f64>>], index: &mut I) -> StreamlineSet
where
    I: NearestIndex + ?Sized,
{
    let rows: usize = lines.iter().map(|l| l.len() + 1).sum();
    let mut out = StreamlineSet {
        x: Vec::with_capacity(rows),
        y: Vec::with_capacity(rows),
        distance: Vec::with_capacity(rows),
        arc_length: Vec::with_capacity(rows),
    };
    for (k, line) in lines.iter().enumerate() {
        let dist = distances_to_others(index, LineId(k), line);
        out.x.extend(line.iter().map(|p| p.x));
        out.y.extend(line.iter().map(|p| p.y));
        out.distance.extend(dist);
        out.arc_length.extend(arc_lengths(line));
        out.x.push(f64::NAN);
        out.y.push(f64::NAN);
        out.distance.push(f64::NAN);
        out.arc_length.push(f64::NAN);
    }
    out
}

/// Distance from every row of `xy` to the nearest point on another line.
///
/// `xy` is n×2 with single all-NaN rows between lines; every other row must
/// be finite. The result is
/// row-aligned with `xy`; separator rows stay NaN. Points of a line with no
/// other line to compare against get `f64::INFINITY`.
pub fn nearest_other_distances(xy: &DMatrix<f64>, verbose: bool) -> Result<Vec<f64>, StreamError> {
    let ranges = line_ranges(xy)?;
    let lines: Vec<Vec<Vector2<f64>>> = ranges
        .iter()
        .map(|r| r.clone().map(|k| Vector2::new(xy[(k, 0)], xy[(k, 1)])).collect())
        .collect();
    let all: Vec<Vector2<f64>> = lines.iter().flatten().copied().collect();
    let mut index = GridIndex::fitted(&all);
    for (k, line) in lines.iter().enumerate() {
        index.insert(LineId(k), line);
    }
    if verbose {
        info!(lines = lines.len(), points = all.len(), "distance_index_built");
    }

    let mut out = vec![f64::NAN; xy.nrows()];
    for (k, (range, line)) in ranges.iter().zip(&lines).enumerate() {
        let dist = distances_to_others(&mut index, LineId(k), line);
        out[range.clone()].copy_from_slice(&dist);
        if verbose {
            info!(line = k + 1, of = lines.len(), points = line.len(), "distance_line_done");
        }
    }
    Ok(out)
}

fn distances_to_others<I>(index: &mut I, id: LineId, line: &[Vector2<f64>]) -> Vec<f64>
where
    I: NearestIndex + ?Sized,
{
    excluding(index, id, line, |idx| {
        line.iter().map(|&p| idx.nearest_distance(p)).collect()
    })
}

/// Cumulative Euclidean length along `line`, starting at 0.
pub fn arc_lengths(line: &[Vector2<f64>]) -> Vec<f64> {
    let mut acc = 0.0;
    let mut out = Vec::with_capacity(line.len());
    for (k, p) in line.iter().enumerate() {
        if k > 0 {
            acc += (p - line[k - 1]).norm();
        }
        out.push(acc);
    }
    out
}

/// Validate the NaN-separated layout of `xy` and return the line row ranges.
fn line_ranges(xy: &DMatrix<f64>) -> Result<Vec<Range<usize>>, StreamError> {
    if xy.ncols() != 2 {
        return Err(StreamError::layout(format!(
            "expected 2 columns (x, y), got {}",
            xy.ncols()
        )));
    }
    let n = xy.nrows();
    if n == 0 {
        return Err(StreamError::layout("no rows"));
    }
    let mut ranges = Vec::new();
    let mut start = 0;
    for r in 0..n {
        let (xn, yn) = (xy[(r, 0)].is_nan(), xy[(r, 1)].is_nan());
        if xn != yn {
            return Err(StreamError::layout(format!(
                "row {r} is NaN in one column only"
            )));
        }
        if !xn {
            if !(xy[(r, 0)].is_finite() && xy[(r, 1)].is_finite()) {
                return Err(StreamError::layout(format!(
                    "row {r} has an infinite coordinate"
                )));
            }
            continue;
        }
        if r == 0 || r == n - 1 {
            return Err(StreamError::layout(format!(
                "row {r} is a separator; first and last rows must be points"
            )));
        }
        if start == r {
            return Err(StreamError::layout(format!(
                "consecutive separators at row {r}"
            )));
        }
        ranges.push(start..r);
        start = r + 1;
    }
    ranges.push(start..n);
    Ok(ranges)
}
