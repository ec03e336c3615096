//! The seeding / growth / trimming loop.
//!
//! States: Idle → PopCandidateBatch → TestCandidate → GrowCandidate →
//! TrimNewLine → CommitLine → (back to TestCandidate or PopCandidateBatch) →
//! Done once the candidate queue is empty.
//!
//! Invariants
//! - Batches are popped strictly FIFO; each batch is shuffled once.
//! - The index holds exactly the committed lines whenever it is queried; a
//!   candidate's own line is never inserted before its trim decision.
//! - Rejecting a candidate leaves its siblings untouched.
//!
//! There is no step or time cap on the loop itself: a field that is undefined
//! almost everywhere, or a tiny `d_sep`, may keep it busy for a long time. A
//! first line shorter than 2 points (zero velocity at the first defined seed)
//! ends the run with no lines.

use std::collections::VecDeque;

use nalgebra::Vector2;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info, warn};

use super::grow::{grow, trim};
use super::seeds::offset_candidates;
use super::types::{AcceptedSeed, Placement, PlacementCfg, PlacementStats, SeededLine};
use crate::error::StreamError;
use crate::field::VectorField;
use crate::index::{GridIndex, LineId, NearestIndex};
use crate::post::StreamlineSet;

/// Seed-search draws after which a slow start is reported once.
const SLOW_SEED_DRAWS: usize = 10_000;

/// Place streamlines with a [`GridIndex`] whose cells are `d_sep` wide.
pub fn place<R: Rng + ?Sized>(
    field: &VectorField,
    cfg: PlacementCfg,
    rng: &mut R,
) -> Result<Placement<GridIndex>, StreamError> {
    cfg.validate()?;
    let index = GridIndex::with_cell_size(field.bounds(), cfg.d_sep);
    place_with_index(field, cfg, index, rng)
}

/// Place streamlines using a caller-provided, empty index.
pub fn place_with_index<I, R>(
    field: &VectorField,
    cfg: PlacementCfg,
    index: I,
    rng: &mut R,
) -> Result<Placement<I>, StreamError>
where
    I: NearestIndex,
    R: Rng + ?Sized,
{
    cfg.validate()?;
    if !index.is_empty() {
        return Err(StreamError::params("placement index must start empty"));
    }
    Ok(PlacementRunner::new(field, cfg, index, rng).run())
}

/// Place streamlines and post-process them into flat NaN-separated columns.
pub fn evenly_spaced_streamlines<R: Rng + ?Sized>(
    field: &VectorField,
    cfg: PlacementCfg,
    rng: &mut R,
) -> Result<StreamlineSet, StreamError> {
    Ok(place(field, cfg, rng)?.into_streamline_set())
}

/// Loop state: the index, the candidate queue, and the committed lines.
struct PlacementRunner<'a, I, R: ?Sized> {
    field: &'a VectorField,
    reversed: VectorField,
    cfg: PlacementCfg,
    index: I,
    rng: &'a mut R,
    queue: VecDeque<Vec<Vector2<f64>>>,
    lines: Vec<Vec<Vector2<f64>>>,
    seeds: Vec<AcceptedSeed>,
    stats: PlacementStats,
}

impl<'a, I, R> PlacementRunner<'a, I, R>
where
    I: NearestIndex,
    R: Rng + ?Sized,
{
    fn new(field: &'a VectorField, cfg: PlacementCfg, index: I, rng: &'a mut R) -> Self {
        Self {
            field,
            reversed: field.negated(),
            cfg,
            index,
            rng,
            queue: VecDeque::new(),
            lines: Vec::new(),
            seeds: Vec::new(),
            stats: PlacementStats::default(),
        }
    }

    fn run(mut self) -> Placement<I> {
        let first = self.first_line();
        if first.len() < 2 {
            warn!(
                draws = self.stats.seed_draws,
                points = first.len(),
                "first streamline too short; nothing placed"
            );
            self.stats.rejected_short += 1;
            return self.finish();
        }
        self.commit(first, f64::INFINITY);

        while let Some(mut batch) = self.queue.pop_front() {
            self.stats.batches += 1;
            batch.shuffle(&mut *self.rng);
            debug!(
                batch = self.stats.batches,
                size = batch.len(),
                queued = self.queue.len(),
                "pop_batch"
            );
            for candidate in batch {
                self.test_candidate(candidate);
            }
        }
        self.finish()
    }

    fn finish(self) -> Placement<I> {
        info!(
            lines = self.lines.len(),
            points = self.index.len(),
            candidates = self.stats.candidates,
            rejected_separation = self.stats.rejected_separation,
            rejected_short = self.stats.rejected_short,
            "placement_done"
        );
        Placement {
            lines: self.lines,
            seeds: self.seeds,
            stats: self.stats,
            index: self.index,
        }
    }

    /// Draw uniform points in the bounding box until one has a defined
    /// velocity, and grow the first line from it.
    fn first_line(&mut self) -> SeededLine {
        let b = self.field.bounds();
        loop {
            self.stats.seed_draws += 1;
            if self.stats.seed_draws == SLOW_SEED_DRAWS {
                warn!(draws = SLOW_SEED_DRAWS, "no usable seed found yet");
            }
            let p = Vector2::new(
                self.rng.gen_range(b.min.x..=b.max.x),
                self.rng.gen_range(b.min.y..=b.max.y),
            );
            if self.field.sample(p).is_some() {
                return self.grow_from(p);
            }
        }
    }

    fn test_candidate(&mut self, candidate: Vector2<f64>) {
        self.stats.candidates += 1;
        let distance = self.index.nearest_distance(candidate);
        if distance < self.cfg.d_sep {
            self.stats.rejected_separation += 1;
            return;
        }
        let grown = self.grow_from(candidate);
        if grown.len() < 2 {
            self.stats.rejected_short += 1;
            return;
        }
        let trimmed = trim(&grown, self.cfg.d_test, &self.index);
        if trimmed.len() < 2 {
            self.stats.rejected_short += 1;
            return;
        }
        self.commit(trimmed, distance);
    }

    fn grow_from(&self, seed: Vector2<f64>) -> SeededLine {
        grow(
            self.field,
            &self.reversed,
            seed,
            self.cfg.step,
            self.cfg.max_steps,
        )
    }

    fn commit(&mut self, line: SeededLine, distance: f64) {
        let id = LineId(self.lines.len());
        let seed = line.seed_point().unwrap_or(Vector2::repeat(f64::NAN));
        self.index.insert(id, &line.points);
        self.queue
            .push_back(offset_candidates(&line.points, self.cfg.d_sep));
        debug!(line = id.0, points = line.len(), seed_distance = distance, "commit");
        self.seeds.push(AcceptedSeed {
            point: seed,
            distance,
        });
        self.lines.push(line.points);
        self.stats.committed += 1;
    }
}
