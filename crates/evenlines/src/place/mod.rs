//! Evenly-spaced streamline placement (Jobard & Lefer).
//!
//! Purpose
//! - Seed, grow, trim, and commit streamlines until no seed candidate is left,
//!   keeping seeds `d_sep` apart from committed lines and lines `d_test` apart
//!   from each other.
//!
//! Layout
//! - `types.rs`: `PlacementCfg`, `SeededLine`, `Placement` and counters.
//! - `seeds.rs`: perpendicular seed candidates.
//! - `grow.rs`: two-sided growth and outward trimming.
//! - `engine.rs`: the candidate-queue loop.
//!
//! Code cross-refs: `index::NearestIndex`, `post::serialize`, `field::integrate`

mod engine;
mod grow;
mod seeds;
mod types;

pub use engine::{evenly_spaced_streamlines, place, place_with_index};
pub use grow::{grow, splice, trim, truncate_at_nan};
pub use seeds::offset_candidates;
pub use types::{AcceptedSeed, Placement, PlacementCfg, PlacementStats, SeededLine};
