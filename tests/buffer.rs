#![allow(clippy::unwrap_used)]

mod common;

use std::f64::consts::PI;

use approx::assert_relative_eq;
use circulis::geometry::{Contour, ContinuousCurve, Domain};
use circulis::math::{Point2, Vector2};
use circulis::operations::offset::{Buffer2D, BufferOptions};

use common::{init_tracing, points, polygon, polyline};

fn buffer(curve: &ContinuousCurve, distance: f64) -> Domain {
    init_tracing();
    Buffer2D::new(vec![curve.clone()], distance, BufferOptions::default())
        .execute()
        .unwrap()
}

fn ring_areas(domain: &Domain) -> (usize, usize) {
    let areas: Vec<f64> = domain
        .boundary()
        .iter()
        .map(|c| c.signed_area().unwrap())
        .collect();
    let outer = areas.iter().filter(|&&a| a > 0.0).count();
    (outer, areas.len() - outer)
}

fn square() -> ContinuousCurve {
    polygon(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)])
}

#[test]
fn square_small_distance_keeps_a_hole() {
    let domain = buffer(&square(), 3.0);
    assert_eq!(domain.boundary().len(), 2);
    assert_eq!(ring_areas(&domain), (1, 1));
    assert_relative_eq!(domain.area(), 204.0 + 9.0 * PI, epsilon = 1e-6);
    assert!(domain.contains(&Point2::new(1.0, 1.0)));
    assert!(domain.contains(&Point2::new(-2.0, 5.0)));
    assert!(!domain.contains(&Point2::new(5.0, 5.0)));
    assert!(!domain.contains(&Point2::new(-4.0, 5.0)));
}

#[test]
fn square_large_distance_fills_the_hole() {
    let domain = buffer(&square(), 6.0);
    assert_eq!(domain.boundary().len(), 1);
    assert_relative_eq!(domain.area(), 340.0 + 36.0 * PI, epsilon = 1e-6);
    assert!(domain.contains(&Point2::new(5.0, 5.0)));
}

#[test]
fn boundary_stays_at_buffer_distance() {
    let source = square();
    let domain = buffer(&source, 3.0);
    for contour in domain.boundary() {
        for p in contour.curve().sample_points() {
            assert_relative_eq!(source.distance(&p), 3.0, epsilon = 1e-6);
        }
    }
}

#[test]
fn concave_m_has_two_holes() {
    let m = polygon(&[
        (100.0, 100.0),
        (300.0, 100.0),
        (300.0, 300.0),
        (200.0, 200.0),
        (100.0, 300.0),
    ]);
    let domain = buffer(&m, 51.0);
    assert_eq!(domain.boundary().len(), 3);
    assert_eq!(ring_areas(&domain), (1, 2));
    assert!(!domain.contains(&Point2::new(160.0, 160.0)));
    assert!(!domain.contains(&Point2::new(240.0, 160.0)));
    assert!(domain.contains(&Point2::new(200.0, 160.0)));
}

#[test]
fn self_crossing_hexagon() {
    let hexagon = polygon(&[
        (0.0, 0.0),
        (0.0, 100.0),
        (200.0, 100.0),
        (200.0, 200.0),
        (100.0, 200.0),
        (100.0, 0.0),
    ]);
    let domain = buffer(&hexagon, 30.0);
    assert_eq!(domain.boundary().len(), 3);
    assert_eq!(ring_areas(&domain), (1, 2));
    assert!(!domain.contains(&Point2::new(50.0, 50.0)));
    assert!(!domain.contains(&Point2::new(150.0, 150.0)));
    assert!(domain.contains(&Point2::new(100.0, 100.0)));
}

#[test]
fn duplicated_closing_vertex_is_ignored() {
    let coords = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
    let plain = polygon(&coords);
    let mut repeated = coords.to_vec();
    repeated.push(coords[0]);
    let closed_by_points = polyline(&repeated);
    assert!(closed_by_points.is_closed());

    let expected = 14400.0 + 400.0 * PI;
    for curve in [&plain, &closed_by_points, &polygon(&repeated)] {
        let domain = buffer(curve, 20.0);
        assert_eq!(domain.boundary().len(), 2);
        assert_relative_eq!(domain.area(), expected, epsilon = 1e-6);
    }
}

#[test]
fn open_corner_buffer() {
    let corner = polyline(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
    let domain = buffer(&corner, 1.0);
    assert_eq!(domain.boundary().len(), 1);
    assert_relative_eq!(domain.area(), 39.0 + 1.25 * PI, epsilon = 1e-6);
    assert!(domain.contains(&Point2::new(9.5, 0.5)));
    assert!(!domain.contains(&Point2::new(8.0, 2.0)));
}

#[test]
fn line_buffer_is_a_strip() {
    init_tracing();
    let line = Contour::line(Point2::origin(), Vector2::new(1.0, 0.0)).unwrap();
    let domain = line.buffer(1.0).unwrap();
    assert_eq!(domain.boundary().len(), 2);
    assert!(domain.boundary().iter().all(|c| !c.is_ring()));
    assert!(domain.area().is_infinite());
    assert!(domain.contains(&Point2::new(0.0, 0.5)));
    assert!(domain.contains(&Point2::new(100.0, -0.9)));
    assert!(!domain.contains(&Point2::new(0.0, 1.5)));
    assert!(!domain.contains(&Point2::new(-50.0, -3.0)));
}

#[test]
fn domain_buffer_uses_every_contour() {
    init_tracing();
    let outer = Contour::polygon(&points(&[(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]))
        .unwrap();
    let far = Contour::polygon(&points(&[(300.0, 0.0), (330.0, 0.0), (330.0, 30.0), (300.0, 30.0)]))
        .unwrap();
    let domain = Domain::new(vec![outer, far]).buffer(5.0).unwrap();
    // Two annuli around the two rings, none of them crossing.
    assert_eq!(domain.boundary().len(), 4);
    assert_eq!(ring_areas(&domain), (2, 2));
    assert!(domain.contains(&Point2::new(303.0, 15.0)));
    assert!(!domain.contains(&Point2::new(315.0, 15.0)));
    assert!(!domain.contains(&Point2::new(200.0, 15.0)));
}

#[test]
fn tangent_circles_keep_both_holes() {
    init_tracing();
    let left = Contour::circle(Point2::origin(), 1.0).unwrap();
    let right = Contour::circle(Point2::new(2.0, 0.0), 1.0).unwrap();
    let domain = Domain::new(vec![left, right]).buffer(0.5).unwrap();
    // Each outer ring touches the other circle's hole without crossing it.
    assert_eq!(domain.boundary().len(), 3);
    assert_eq!(ring_areas(&domain), (1, 2));
    assert!(!domain.contains(&Point2::new(0.0, 0.0)));
    assert!(!domain.contains(&Point2::new(2.0, 0.0)));
    assert!(domain.contains(&Point2::new(1.0, 0.0)));
    assert!(domain.contains(&Point2::new(1.0, 1.0)));
}
