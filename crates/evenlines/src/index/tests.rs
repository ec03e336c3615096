use super::*;
use crate::field::Bounds2;
use nalgebra::Vector2;
use proptest::prelude::*;

fn unit_bounds() -> Bounds2 {
    Bounds2::new(Vector2::new(0.0, 0.0), Vector2::new(1.0, 1.0))
}

#[test]
fn empty_index_reports_infinity() {
    let g = GridIndex::with_cell_size(unit_bounds(), 0.1);
    assert!(g.is_empty());
    assert_eq!(g.nearest_distance(Vector2::new(0.5, 0.5)), f64::INFINITY);
    assert_eq!(BruteIndex::new().nearest_distance(Vector2::zeros()), f64::INFINITY);
}

#[test]
fn insert_remove_by_line() {
    let mut g = GridIndex::with_cell_size(unit_bounds(), 0.1);
    let a = vec![Vector2::new(0.1, 0.1), Vector2::new(0.2, 0.1)];
    let b = vec![Vector2::new(0.9, 0.9)];
    g.insert(LineId(0), &a);
    g.insert(LineId(1), &b);
    assert_eq!(g.len(), 3);
    let q = Vector2::new(0.8, 0.9);
    assert!((g.nearest_distance(q) - 0.1).abs() < 1e-12);
    g.remove(LineId(1), &b);
    assert_eq!(g.len(), 2);
    let expect = (Vector2::new(0.2, 0.1) - q).norm();
    assert!((g.nearest_distance(q) - expect).abs() < 1e-12);
}

#[test]
fn points_outside_bounds_are_still_found() {
    let mut g = GridIndex::with_cell_size(unit_bounds(), 0.1);
    let far = vec![Vector2::new(5.0, -3.0)];
    g.insert(LineId(7), &far);
    assert!((g.nearest_distance(Vector2::new(5.0, -2.0)) - 1.0).abs() < 1e-12);
    assert!(g.nearest_distance(Vector2::new(0.5, 0.5)) > 4.0);
    g.remove(LineId(7), &far);
    assert!(g.is_empty());
}

#[test]
fn duplicate_and_collinear_points_are_fine() {
    let pts: Vec<_> = (0..50).map(|k| Vector2::new(k as f64 * 0.01, 0.0)).collect();
    let mut g = GridIndex::fitted(&pts);
    g.insert(LineId(0), &pts);
    g.insert(LineId(1), &pts);
    assert_eq!(g.len(), 100);
    assert_eq!(g.nearest_distance(pts[10]), 0.0);
    assert!((g.nearest_distance(Vector2::new(0.25, 0.3)) - 0.3).abs() < 1e-12);
}

#[test]
fn excluding_restores_state() {
    let mut g = GridIndex::with_cell_size(unit_bounds(), 0.05);
    let a = vec![Vector2::new(0.3, 0.3), Vector2::new(0.31, 0.3)];
    let b = vec![Vector2::new(0.6, 0.3)];
    g.insert(LineId(0), &a);
    g.insert(LineId(1), &b);
    let d = excluding(&mut g, LineId(0), &a, |idx| idx.nearest_distance(a[0]));
    assert!((d - 0.3).abs() < 1e-12);
    assert_eq!(g.len(), 3);
    assert_eq!(g.nearest_distance(a[0]), 0.0);
}

#[test]
fn huge_grids_are_coarsened() {
    let g = GridIndex::with_cell_size(unit_bounds(), 1e-9);
    assert!(g.cell_size() > 1e-4);
}

fn point() -> impl Strategy<Value = Vector2<f64>> {
    (-0.5f64..1.5, -0.5f64..1.5).prop_map(|(x, y)| Vector2::new(x, y))
}

proptest! {
    #[test]
    fn grid_matches_brute_force(
        lines in prop::collection::vec(prop::collection::vec(point(), 1..20), 1..8),
        queries in prop::collection::vec(point(), 1..20),
        cell in 0.01f64..0.5,
        dropped in 0usize..8,
    ) {
        let mut g = GridIndex::with_cell_size(unit_bounds(), cell);
        let mut b = BruteIndex::new();
        for (k, l) in lines.iter().enumerate() {
            g.insert(LineId(k), l);
            b.insert(LineId(k), l);
        }
        if dropped < lines.len() {
            g.remove(LineId(dropped), &lines[dropped]);
            b.remove(LineId(dropped), &lines[dropped]);
        }
        prop_assert_eq!(g.len(), b.len());
        for q in queries {
            let dg = g.nearest_distance(q);
            let db = b.nearest_distance(q);
            prop_assert!(dg == db, "grid {} vs brute {} at {:?}", dg, db, q);
        }
    }
}
