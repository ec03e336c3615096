use super::*;
use crate::error::StreamError;
use nalgebra::{DMatrix, Vector2};

fn linspace(a: f64, b: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| a + (b - a) * (k as f64) / ((n - 1) as f64))
        .collect()
}

fn uniform_x() -> VectorField {
    VectorField::from_fn(linspace(0.0, 1.0, 11), linspace(0.0, 1.0, 11), |_| {
        Vector2::new(1.0, 0.0)
    })
    .unwrap()
}

#[test]
fn bilinear_reproduces_affine_fields() {
    // u = 2x + 3y - 1, v = x - y: bilinear interpolation is exact for affine data.
    let f = VectorField::from_fn(linspace(-1.0, 2.0, 7), linspace(0.0, 3.0, 5), |p| {
        Vector2::new(2.0 * p.x + 3.0 * p.y - 1.0, p.x - p.y)
    })
    .unwrap();
    for p in [
        Vector2::new(0.13, 0.77),
        Vector2::new(-1.0, 0.0),
        Vector2::new(2.0, 3.0),
        Vector2::new(1.49, 2.51),
    ] {
        let w = f.sample(p).expect("inside");
        assert!((w.x - (2.0 * p.x + 3.0 * p.y - 1.0)).abs() < 1e-12);
        assert!((w.y - (p.x - p.y)).abs() < 1e-12);
    }
}

#[test]
fn sample_outside_domain_is_none() {
    let f = uniform_x();
    assert!(f.sample(Vector2::new(-0.01, 0.5)).is_none());
    assert!(f.sample(Vector2::new(0.5, 1.01)).is_none());
    assert!(f.sample(Vector2::new(f64::NAN, 0.5)).is_none());
}

#[test]
fn nan_corner_makes_cell_undefined() {
    let xs = linspace(0.0, 2.0, 3);
    let ys = linspace(0.0, 2.0, 3);
    let mut u = DMatrix::from_element(3, 3, 1.0);
    let v = DMatrix::from_element(3, 3, 0.0);
    u[(2, 2)] = f64::NAN;
    let f = VectorField::from_axes(xs, ys, u, v).unwrap();
    assert!(f.sample(Vector2::new(0.5, 0.5)).is_some());
    assert!(f.sample(Vector2::new(1.5, 1.5)).is_none());
}

#[test]
fn from_grids_reads_axes_and_rejects_bad_shapes() {
    let x = DMatrix::from_fn(3, 4, |_, c| c as f64);
    let y = DMatrix::from_fn(3, 4, |r, _| 10.0 * r as f64);
    let u = DMatrix::from_element(3, 4, 1.0);
    let v = DMatrix::from_element(3, 4, 1.0);
    let f = VectorField::from_grids(&x, &y, u.clone(), v.clone()).unwrap();
    assert_eq!(f.xs(), &[0.0, 1.0, 2.0, 3.0]);
    assert_eq!(f.ys(), &[0.0, 10.0, 20.0]);
    let b = f.bounds();
    assert_eq!(b.max, Vector2::new(3.0, 20.0));

    let short = DMatrix::from_element(3, 3, 1.0);
    assert!(matches!(
        VectorField::from_grids(&x, &y, short, v.clone()),
        Err(StreamError::InvalidField { .. })
    ));

    let mut skew = x.clone();
    skew[(1, 2)] = 2.5;
    assert!(VectorField::from_grids(&skew, &y, u.clone(), v.clone()).is_err());

    let descending = DMatrix::from_fn(3, 4, |_, c| -(c as f64));
    assert!(VectorField::from_grids(&descending, &y, u, v).is_err());
}

#[test]
fn all_undefined_field_is_rejected() {
    let err = VectorField::from_fn(linspace(0.0, 1.0, 3), linspace(0.0, 1.0, 3), |_| {
        Vector2::new(f64::NAN, 0.0)
    })
    .unwrap_err();
    assert!(format!("{err}").contains("defined"));
}

#[test]
fn negated_flips_both_components() {
    let f = VectorField::from_fn(linspace(0.0, 1.0, 3), linspace(0.0, 1.0, 3), |p| {
        Vector2::new(p.x, 2.0)
    })
    .unwrap();
    let g = f.negated();
    let p = Vector2::new(0.3, 0.6);
    assert!((f.sample(p).unwrap() + g.sample(p).unwrap()).norm() < 1e-15);
}

#[test]
fn uniform_trace_is_straight_with_cell_fraction_steps() {
    let f = uniform_x();
    let tr = integrate(&f, Vector2::new(0.05, 0.5), 0.5, 10_000);
    assert_eq!(tr.stop, StopReason::LeftDomain);
    let last = tr.points.last().unwrap();
    assert!(last.x.is_nan() && last.y.is_nan());
    let valid = &tr.points[..tr.points.len() - 1];
    // cell = 0.1, step = 0.5 → h = 0.05
    for w in valid.windows(2) {
        assert!(((w[1] - w[0]).norm() - 0.05).abs() < 1e-12);
        assert_eq!(w[1].y, 0.5);
    }
    assert!(valid.last().unwrap().x <= 1.0);
    assert!(valid.last().unwrap().x > 0.9);
}

#[test]
fn trace_respects_step_limit() {
    let f = uniform_x();
    let tr = integrate(&f, Vector2::new(0.0, 0.5), 0.1, 7);
    assert_eq!(tr.stop, StopReason::StepLimit);
    assert_eq!(tr.points.len(), 8);
    assert!(tr.points.iter().all(|p| p.x.is_finite()));
}

#[test]
fn zero_field_stalls_immediately() {
    let f = VectorField::from_fn(linspace(0.0, 1.0, 3), linspace(0.0, 1.0, 3), |_| {
        Vector2::zeros()
    })
    .unwrap();
    let tr = integrate(&f, Vector2::new(0.5, 0.5), 0.2, 100);
    assert_eq!(tr.stop, StopReason::Stalled);
    assert_eq!(tr.points.len(), 2);
    assert!(tr.points[1].x.is_nan());
}

#[test]
fn bounds_of_points_skips_nan() {
    let pts = [
        Vector2::new(f64::NAN, f64::NAN),
        Vector2::new(1.0, -2.0),
        Vector2::new(-3.0, 4.0),
    ];
    let b = Bounds2::of_points(pts.iter()).unwrap();
    assert_eq!(b.min, Vector2::new(-3.0, -2.0));
    assert_eq!(b.max, Vector2::new(1.0, 4.0));
    assert!(Bounds2::of_points([Vector2::new(f64::NAN, 0.0)].iter()).is_none());
}
