//! Gridded 2D vector fields: bilinear sampling and fixed-step tracing.
//!
//! Purpose
//! - Hold a velocity field `(u, v)` sampled on a rectilinear grid and answer
//!   point queries by bilinear interpolation.
//! - Trace a polyline along the flow from a seed with a step length expressed
//!   as a fraction of the local grid cell.
//!
//! Conventions
//! - Matrices are indexed `(row, col)` with rows along `y` and columns along `x`.
//! - Undefined samples are NaN. A query touching a NaN corner is undefined.
//! - A trace that leaves the domain or stalls ends with a single NaN point,
//!   so callers can truncate at the first non-finite position.
//!
//! Code cross-refs: `place::grow`, `VectorField::negated`

mod integrate;
mod types;

pub use integrate::{integrate, StopReason, Trace};
pub use types::{Bounds2, VectorField};

#[cfg(test)]
mod tests;
