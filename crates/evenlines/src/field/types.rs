//! `VectorField` storage, validation, and bilinear queries.

use nalgebra::{DMatrix, Vector2};

use crate::error::StreamError;

/// Axis-aligned rectangle `[min.x, max.x] × [min.y, max.y]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds2 {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Bounds2 {
    #[inline]
    pub fn new(min: Vector2<f64>, max: Vector2<f64>) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle containing every finite point; `None` if there is none.
    pub fn of_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vector2<f64>>,
    {
        let mut it = points.into_iter().filter(|p| p.x.is_finite() && p.y.is_finite());
        let first = *it.next()?;
        Some(it.fold(Self::new(first, first), |b, p| Self {
            min: b.min.inf(p),
            max: b.max.sup(p),
        }))
    }

    #[inline]
    pub fn contains(&self, p: Vector2<f64>) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    #[inline]
    pub fn extent(&self) -> Vector2<f64> {
        self.max - self.min
    }
}

/// Velocity field on a rectilinear grid.
///
/// `u` and `v` have shape `(ys.len(), xs.len())`; both axes strictly increase.
#[derive(Clone, Debug)]
pub struct VectorField {
    xs: Vec<f64>,
    ys: Vec<f64>,
    u: DMatrix<f64>,
    v: DMatrix<f64>,
}

impl VectorField {
    /// Build from four equally shaped grids: sample coordinates `x`, `y` and
    /// components `u`, `v`.
    ///
    /// The x axis is read from the first row of `x`, the y axis from the first
    /// column of `y`; every other entry must agree with them (rectilinear grid).
    pub fn from_grids(
        x: &DMatrix<f64>,
        y: &DMatrix<f64>,
        u: DMatrix<f64>,
        v: DMatrix<f64>,
    ) -> Result<Self, StreamError> {
        let shape = x.shape();
        if y.shape() != shape || u.shape() != shape || v.shape() != shape {
            return Err(StreamError::field(format!(
                "grid shapes differ: x {:?}, y {:?}, u {:?}, v {:?}",
                shape,
                y.shape(),
                u.shape(),
                v.shape()
            )));
        }
        if shape.0 == 0 || shape.1 == 0 {
            return Err(StreamError::field("empty grid"));
        }
        let xs: Vec<f64> = x.row(0).iter().copied().collect();
        let ys: Vec<f64> = y.column(0).iter().copied().collect();
        for r in 0..shape.0 {
            for c in 0..shape.1 {
                if !close(x[(r, c)], xs[c]) || !close(y[(r, c)], ys[r]) {
                    return Err(StreamError::field(format!(
                        "coordinate grids are not rectilinear at row {r}, col {c}"
                    )));
                }
            }
        }
        Self::from_axes(xs, ys, u, v)
    }

    /// Build from explicit axes; `u`/`v` are `(ys.len(), xs.len())`.
    pub fn from_axes(
        xs: Vec<f64>,
        ys: Vec<f64>,
        u: DMatrix<f64>,
        v: DMatrix<f64>,
    ) -> Result<Self, StreamError> {
        if xs.len() < 2 || ys.len() < 2 {
            return Err(StreamError::field(format!(
                "need at least 2x2 samples, got {}x{}",
                ys.len(),
                xs.len()
            )));
        }
        let shape = (ys.len(), xs.len());
        if u.shape() != shape || v.shape() != shape {
            return Err(StreamError::field(format!(
                "component shapes {:?}/{:?} do not match axes {:?}",
                u.shape(),
                v.shape(),
                shape
            )));
        }
        check_axis("x", &xs)?;
        check_axis("y", &ys)?;
        let field = Self { xs, ys, u, v };
        if !field.has_defined_cell() {
            return Err(StreamError::field("no grid cell has four defined corners"));
        }
        Ok(field)
    }

    /// Sample an analytic field `f(p)` on the given axes.
    pub fn from_fn<F>(xs: Vec<f64>, ys: Vec<f64>, f: F) -> Result<Self, StreamError>
    where
        F: Fn(Vector2<f64>) -> Vector2<f64>,
    {
        let (ny, nx) = (ys.len(), xs.len());
        let u = DMatrix::from_fn(ny, nx, |r, c| f(Vector2::new(xs[c], ys[r])).x);
        let v = DMatrix::from_fn(ny, nx, |r, c| f(Vector2::new(xs[c], ys[r])).y);
        Self::from_axes(xs, ys, u, v)
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    pub fn bounds(&self) -> Bounds2 {
        Bounds2::new(
            Vector2::new(self.xs[0], self.ys[0]),
            Vector2::new(self.xs[self.xs.len() - 1], self.ys[self.ys.len() - 1]),
        )
    }

    /// Copy with both components negated (used for backward tracing).
    pub fn negated(&self) -> Self {
        Self {
            xs: self.xs.clone(),
            ys: self.ys.clone(),
            u: self.u.map(|t| -t),
            v: self.v.map(|t| -t),
        }
    }

    /// Bilinear interpolation of `(u, v)` at `p`.
    ///
    /// `None` outside the domain or when the result is not finite.
    pub fn sample(&self, p: Vector2<f64>) -> Option<Vector2<f64>> {
        let (i, j, tx, ty) = self.locate(p)?;
        let w = [
            (1.0 - tx) * (1.0 - ty),
            tx * (1.0 - ty),
            (1.0 - tx) * ty,
            tx * ty,
        ];
        let corners = [(j, i), (j, i + 1), (j + 1, i), (j + 1, i + 1)];
        let mut out: Vector2<f64> = Vector2::zeros();
        for (wk, rc) in w.iter().zip(corners) {
            out.x += wk * self.u[rc];
            out.y += wk * self.v[rc];
        }
        if out.x.is_finite() && out.y.is_finite() {
            Some(out)
        } else {
            None
        }
    }

    /// Width and height of the grid cell containing `p`.
    pub fn cell_size_at(&self, p: Vector2<f64>) -> Option<Vector2<f64>> {
        let (i, j, _, _) = self.locate(p)?;
        Some(Vector2::new(
            self.xs[i + 1] - self.xs[i],
            self.ys[j + 1] - self.ys[j],
        ))
    }

    /// Cell indices `(i, j)` and local coordinates `(tx, ty) ∈ [0,1]²`.
    fn locate(&self, p: Vector2<f64>) -> Option<(usize, usize, f64, f64)> {
        if !self.bounds().contains(p) {
            return None;
        }
        let i = cell_index(&self.xs, p.x);
        let j = cell_index(&self.ys, p.y);
        let tx = (p.x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        let ty = (p.y - self.ys[j]) / (self.ys[j + 1] - self.ys[j]);
        Some((i, j, tx, ty))
    }

    fn has_defined_cell(&self) -> bool {
        let defined = |r: usize, c: usize| self.u[(r, c)].is_finite() && self.v[(r, c)].is_finite();
        (0..self.ys.len() - 1).any(|j| {
            (0..self.xs.len() - 1).any(|i| {
                defined(j, i) && defined(j, i + 1) && defined(j + 1, i) && defined(j + 1, i + 1)
            })
        })
    }
}

/// Left cell index for `t` on a strictly increasing axis, clamped to the last cell.
#[inline]
fn cell_index(axis: &[f64], t: f64) -> usize {
    axis.partition_point(|&a| a <= t)
        .saturating_sub(1)
        .min(axis.len() - 2)
}

#[inline]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * (1.0 + b.abs())
}

fn check_axis(name: &str, axis: &[f64]) -> Result<(), StreamError> {
    if axis.iter().any(|t| !t.is_finite()) {
        return Err(StreamError::field(format!("{name} axis has non-finite entries")));
    }
    if let Some(k) = axis.windows(2).position(|w| w[1] <= w[0]) {
        return Err(StreamError::field(format!(
            "{name} axis must strictly increase (index {k})"
        )));
    }
    Ok(())
}
