//! Fixed-step RK4 tracing along the unit-speed direction field.

use nalgebra::Vector2;

use super::types::VectorField;

/// Speeds below this count as a stall.
const MIN_SPEED: f64 = 1e-12;

/// Why a trace ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    /// A stage sample or the next position fell outside the defined field.
    LeftDomain,
    /// The local speed vanished or the direction became non-finite.
    Stalled,
    /// `max_steps` steps were taken.
    StepLimit,
}

/// Output of [`integrate`]: `points[0]` is the seed.
///
/// For `LeftDomain` and `Stalled` the last entry is a NaN terminator.
#[derive(Clone, Debug)]
pub struct Trace {
    pub points: Vec<Vector2<f64>>,
    pub stop: StopReason,
}

/// Trace from `seed` along `field`.
///
/// Each step has arc length `step * min(cell width, cell height)` of the cell
/// the current position lies in.
pub fn integrate(field: &VectorField, seed: Vector2<f64>, step: f64, max_steps: usize) -> Trace {
    let mut points = vec![seed];
    let mut p = seed;
    for _ in 0..max_steps {
        match rk4_step(field, p, step) {
            Ok(next) => {
                points.push(next);
                p = next;
            }
            Err(stop) => {
                points.push(Vector2::repeat(f64::NAN));
                return Trace { points, stop };
            }
        }
    }
    Trace {
        points,
        stop: StopReason::StepLimit,
    }
}

fn rk4_step(field: &VectorField, p: Vector2<f64>, step: f64) -> Result<Vector2<f64>, StopReason> {
    let cell = field.cell_size_at(p).ok_or(StopReason::LeftDomain)?;
    let h = step * cell.x.min(cell.y);
    let k1 = direction(field, p)?;
    let k2 = direction(field, p + k1 * (0.5 * h))?;
    let k3 = direction(field, p + k2 * (0.5 * h))?;
    let k4 = direction(field, p + k3 * h)?;
    let next = p + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (h / 6.0);
    field.sample(next).ok_or(StopReason::LeftDomain)?;
    Ok(next)
}

/// Unit velocity direction at `p`.
#[inline]
fn direction(field: &VectorField, p: Vector2<f64>) -> Result<Vector2<f64>, StopReason> {
    let w = field.sample(p).ok_or(StopReason::LeftDomain)?;
    let speed = w.norm();
    if !(speed.is_finite()) || speed < MIN_SPEED {
        return Err(StopReason::Stalled);
    }
    Ok(w / speed)
}
