use std::f64::consts::PI;

use crate::error::{CurveError, OperationError, Result};
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::element::{CircleArc, Element, Segment};
use crate::geometry::traits::Parametrized;
use crate::math::arc_2d::{arc_from_bulge, bulge_from_sweep};
use crate::math::{coincident, Point2};

/// Polyline vertex; `bulge` describes the element leaving it.
///
/// `bulge = tan(sweep / 4)`: zero for a straight element, positive for a
/// counter-clockwise arc, negative for a clockwise one, `±1` for a half
/// circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlineVertex {
    pub x: f64,
    pub y: f64,
    pub bulge: f64,
}

impl PlineVertex {
    #[must_use]
    pub fn new(x: f64, y: f64, bulge: f64) -> Self {
        Self { x, y, bulge }
    }

    /// Vertex followed by a straight element.
    #[must_use]
    pub fn line(x: f64, y: f64) -> Self {
        Self { x, y, bulge: 0.0 }
    }

    #[must_use]
    pub fn point(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

/// Authoring format for bounded circulinear curves: a vertex list where
/// each vertex carries the bulge of the element that leaves it. A closed
/// pline also joins its last vertex to its first.
#[derive(Debug, Clone)]
pub struct Pline {
    pub vertices: Vec<PlineVertex>,
    pub closed: bool,
}

impl Pline {
    /// Creates a `Pline` with all-zero bulges (line segments only).
    #[must_use]
    pub fn from_points(points: &[Point2], closed: bool) -> Self {
        let vertices = points
            .iter()
            .map(|p| PlineVertex::line(p.x, p.y))
            .collect();
        Self { vertices, closed }
    }

    /// Encodes a bounded curve as a polyline. Arcs wider than a half turn are
    /// split in two so every bulge stays finite.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if the curve is unbounded.
    pub fn from_curve(curve: &ContinuousCurve) -> Result<Self> {
        let Some(end) = curve.last_point() else {
            return Err(
                OperationError::InvalidInput("unbounded curve has no polyline form".into()).into(),
            );
        };
        let mut vertices = Vec::with_capacity(curve.element_count() + 1);
        for e in curve.elements() {
            let Some(start) = e.first_point() else {
                return Err(OperationError::InvalidInput(
                    "unbounded curve has no polyline form".into(),
                )
                .into());
            };
            match e {
                Element::Segment(_) => vertices.push(PlineVertex::line(start.x, start.y)),
                Element::Arc(a) => {
                    let halves = if a.extent().abs() > PI { 2 } else { 1 };
                    let step = a.extent() / f64::from(halves);
                    let bulge = bulge_from_sweep(step);
                    for k in 0..halves {
                        let p = a.point(step.abs() * f64::from(k));
                        vertices.push(PlineVertex::new(p.x, p.y, bulge));
                    }
                }
            }
        }
        if !curve.is_closed() {
            vertices.push(PlineVertex::line(end.x, end.y));
        }
        Ok(Self {
            vertices,
            closed: curve.is_closed(),
        })
    }

    /// Converts the polyline to a continuous curve.
    ///
    /// Consecutive duplicate vertices are merged (the later bulge wins) and a
    /// closed polyline whose last vertex repeats the first one drops it.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Empty` when fewer than two distinct vertices
    /// remain, or an element error for an unusable arc.
    pub fn to_curve(&self) -> Result<ContinuousCurve> {
        let mut kept: Vec<PlineVertex> = Vec::with_capacity(self.vertices.len());
        for v in &self.vertices {
            match kept.last_mut() {
                Some(last) if coincident(&last.point(), &v.point()) => last.bulge = v.bulge,
                _ => kept.push(*v),
            }
        }
        if self.closed {
            while kept.len() > 2 && coincident(&kept[0].point(), &kept[kept.len() - 1].point()) {
                kept.pop();
            }
        }
        if kept.len() < 2 {
            return Err(CurveError::Empty.into());
        }

        let n = kept.len();
        let count = if self.closed { n } else { n - 1 };
        let mut elements = Vec::with_capacity(count);
        for i in 0..count {
            let v0 = &kept[i];
            let v1 = &kept[(i + 1) % n];
            let element = match arc_from_bulge(&v0.point(), &v1.point(), v0.bulge) {
                Some(arc) => {
                    CircleArc::new(arc.center, arc.radius, arc.start_angle, arc.sweep)?.into()
                }
                None => Segment::new(v0.point(), v1.point())?.into(),
            };
            elements.push(element);
        }
        ContinuousCurve::new(elements)
    }

    /// Same path travelled backwards: every bulge moves to the other end of
    /// its element and changes sign.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let m = self.vertices.len();
        if m == 0 {
            return self.clone();
        }
        let vertices = if self.closed {
            reverse_closed(&self.vertices)
        } else {
            (0..m)
                .map(|j| {
                    let v = &self.vertices[m - 1 - j];
                    let bulge = if j < m - 1 {
                        -self.vertices[m - 2 - j].bulge
                    } else {
                        0.0
                    };
                    PlineVertex::new(v.x, v.y, bulge)
                })
                .collect()
        };
        Self {
            vertices,
            closed: self.closed,
        }
    }

    /// Number of elements the pline describes.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        let n = self.vertices.len();
        if n < 2 {
            return 0;
        }
        if self.closed {
            n
        } else {
            n - 1
        }
    }
}

/// Reverses a closed vertex loop, keeping the first vertex in place.
fn reverse_closed(vertices: &[PlineVertex]) -> Vec<PlineVertex> {
    let m = vertices.len();
    (0..m)
        .map(|j| {
            let v = &vertices[(m - j) % m];
            // Segment v'[j] → v'[j+1] is the reverse of v[m-j-1] → v[m-j].
            let prev = &vertices[(2 * m - j - 1) % m];
            PlineVertex::new(v.x, v.y, -prev.bulge)
        })
        .collect()
}
