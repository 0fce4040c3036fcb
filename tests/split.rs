#![allow(clippy::unwrap_used)]

mod common;

use std::f64::consts::{FRAC_PI_2, PI};

use approx::assert_relative_eq;
use circulis::geometry::{Boundary, Contour, Domain, Parametrized};
use circulis::math::{Point2, Vector2};
use circulis::operations::split::{find_crossings, ContourCrossingSplit, SelfIntersectionSplit};

use common::{init_tracing, points, polygon, polyline};

#[test]
fn split_conserves_length_and_removes_crossings() {
    init_tracing();
    let figure_eight = polygon(&[(0.0, 0.0), (2.0, 2.0), (2.0, 0.0), (0.0, 2.0)]);
    assert_eq!(find_crossings(&figure_eight).len(), 1);
    let pieces = SelfIntersectionSplit::new(figure_eight.clone()).execute().unwrap();
    assert_eq!(pieces.len(), 2);
    let total: f64 = pieces.iter().map(Parametrized::length).sum();
    assert_relative_eq!(total, figure_eight.length(), epsilon = 1e-9);
    for piece in &pieces {
        assert!(piece.is_closed());
        assert!(find_crossings(piece).is_empty());
    }
}

#[test]
fn split_is_idempotent_on_simple_curves() {
    let zigzag = polyline(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
    let pieces = SelfIntersectionSplit::new(zigzag.clone()).execute().unwrap();
    assert_eq!(pieces, vec![zigzag]);
}

#[test]
fn overlapping_squares_rethread_into_union_and_overlap() {
    init_tracing();
    let a = Contour::polygon(&points(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)])).unwrap();
    let b = Contour::polygon(&points(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0)])).unwrap();
    let pieces = ContourCrossingSplit::pair(&a, &b).unwrap();
    assert_eq!(pieces.len(), 2);
    let mut areas: Vec<f64> = pieces.iter().map(|c| c.signed_area().unwrap()).collect();
    areas.sort_by(f64::total_cmp);
    assert_relative_eq!(areas[0], 1.0, epsilon = 1e-9);
    assert_relative_eq!(areas[1], 7.0, epsilon = 1e-9);
    let total: f64 = pieces.iter().map(|c| c.curve().length()).sum();
    assert_relative_eq!(total, 16.0, epsilon = 1e-9);
}

#[test]
fn line_across_circle() {
    init_tracing();
    let line = Contour::line(Point2::new(-5.0, 0.0), Vector2::new(1.0, 0.0)).unwrap();
    let circle = Contour::circle(Point2::origin(), 1.0).unwrap();
    let pieces = ContourCrossingSplit::new(vec![line, circle]).execute().unwrap();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces.iter().filter(|c| c.is_ring()).count(), 1);
    let ring = pieces.iter().find(|c| c.is_ring()).unwrap();
    assert_relative_eq!(ring.signed_area().unwrap().abs(), FRAC_PI_2, epsilon = 1e-9);
    let ring_length = ring.curve().length();
    assert_relative_eq!(ring_length, PI + 2.0, epsilon = 1e-9);
}

#[test]
fn disjoint_contours_are_untouched() {
    let a = Contour::circle(Point2::origin(), 1.0).unwrap();
    let b = Contour::circle(Point2::new(5.0, 0.0), 1.0).unwrap();
    let pieces = ContourCrossingSplit::pair(&a, &b).unwrap();
    assert_eq!(pieces, vec![a.clone(), b.clone()]);
    let domain = Domain::new(pieces);
    assert_eq!(domain.winding_number(&Point2::new(5.0, 0.5)), 1);
    assert_eq!(domain.winding_number(&Point2::new(2.5, 0.0)), 0);
}
