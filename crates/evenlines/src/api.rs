//! Curated surface for callers that want one import path.
//!
//! Mirrors the module layout: fields, indices, placement, post-processing.

// Errors
pub use crate::error::StreamError;
// Fields and tracing
pub use crate::field::{integrate, Bounds2, StopReason, Trace, VectorField};
// Nearest-neighbor indices
pub use crate::index::{excluding, BruteIndex, GridIndex, LineId, NearestIndex};
// Placement
pub use crate::place::{
    evenly_spaced_streamlines, grow, offset_candidates, place, place_with_index, splice, trim,
    truncate_at_nan, AcceptedSeed, Placement, PlacementCfg, PlacementStats, SeededLine,
};
// Output
pub use crate::post::{arc_lengths, nearest_other_distances, serialize, StreamlineSet};
