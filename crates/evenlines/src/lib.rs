//! Evenly-spaced streamlines for gridded 2D vector fields.
//!
//! Seeds, grows, and trims streamlines the Jobard & Lefer way: new lines may
//! only start `d_sep` away from committed ones and are cut back where they
//! come closer than `d_test`. The output carries, per point, the distance to
//! the nearest other line (for tapered rendering) and the arc length.
//!
//! Modules
//! - `field`: bilinear sampling and RK4 tracing on a rectilinear grid.
//! - `index`: dynamic nearest-neighbor indices keyed by line.
//! - `place`: seed candidates, grow/trim, and the candidate-queue loop.
//! - `post`: flat NaN-separated output and standalone distance recomputation.

pub mod api;
pub mod error;
pub mod field;
pub mod index;
pub mod place;
pub mod post;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::StreamError;
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::StreamError;
    pub use crate::field::{Bounds2, VectorField};
    pub use crate::index::{BruteIndex, GridIndex, LineId, NearestIndex};
    pub use crate::place::{evenly_spaced_streamlines, place, Placement, PlacementCfg};
    pub use crate::post::{nearest_other_distances, StreamlineSet};
    pub use nalgebra::{DMatrix, Vector2 as Vec2};
}
