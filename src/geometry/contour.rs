use crate::error::{CurveError, Result};
use crate::geometry::curve::ContinuousCurve;
use crate::geometry::domain::Domain;
use crate::geometry::element::{CircleArc, Element, Segment};
use crate::geometry::traits::{Boundary, Parametrized};
use crate::geometry::transform::Transform2;
use crate::math::{Point2, Vector2};
use crate::operations::offset::{Buffer2D, BufferOptions};

/// A domain boundary: a bounded closed ring, or a curve unbounded at both
/// ends.
///
/// The region bounded by a contour lies on its left.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    curve: ContinuousCurve,
}

impl Contour {
    /// Wraps a closed bounded curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotClosed` if the curve is not closed.
    pub fn ring(curve: ContinuousCurve) -> Result<Self> {
        if !curve.is_closed() {
            return Err(CurveError::NotClosed.into());
        }
        Ok(Self { curve })
    }

    /// Wraps a curve unbounded at both ends.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotContour` if either end is finite.
    pub fn unbounded(curve: ContinuousCurve) -> Result<Self> {
        if curve.first_point().is_some() || curve.last_point().is_some() {
            return Err(CurveError::NotContour.into());
        }
        Ok(Self { curve })
    }

    /// Wraps a curve that is either a ring or unbounded at both ends.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::NotContour` for any other curve.
    pub fn from_curve(curve: ContinuousCurve) -> Result<Self> {
        if curve.is_closed() {
            return Self::ring(curve);
        }
        Self::unbounded(curve)
    }

    /// Polygonal ring through `points`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Empty` for fewer than two distinct points.
    pub fn polygon(points: &[Point2]) -> Result<Self> {
        Self::ring(ContinuousCurve::polygon(points)?)
    }

    /// Counter-clockwise circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a non-positive radius.
    pub fn circle(center: Point2, radius: f64) -> Result<Self> {
        let arc: Element = CircleArc::circle(center, radius)?.into();
        Self::ring(ContinuousCurve::new(vec![arc])?)
    }

    /// Infinite straight line; the bounded side is on its left.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ZeroVector` for a zero direction.
    pub fn line(origin: Point2, direction: Vector2) -> Result<Self> {
        let line: Element = Segment::line(origin, direction)?.into();
        Self::unbounded(ContinuousCurve::new(vec![line])?)
    }

    pub(crate) fn from_curve_unchecked(curve: ContinuousCurve) -> Self {
        Self { curve }
    }

    #[must_use]
    pub fn curve(&self) -> &ContinuousCurve {
        &self.curve
    }

    #[must_use]
    pub fn into_curve(self) -> ContinuousCurve {
        self.curve
    }

    #[must_use]
    pub fn is_ring(&self) -> bool {
        self.curve.is_closed()
    }

    /// Signed enclosed area, positive for counter-clockwise rings; `None`
    /// for unbounded contours.
    #[must_use]
    pub fn signed_area(&self) -> Option<f64> {
        self.is_ring().then(|| self.curve.signed_area())
    }

    /// Winding number of the contour around `point`. Unbounded contours are
    /// closed counter-clockwise at infinity.
    #[must_use]
    pub fn winding_number(&self, point: &Point2) -> i32 {
        self.curve.winding_number(point)
    }

    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            curve: self.curve.reversed(),
        }
    }

    /// Applies a similarity transform.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotCirculinear` for a non-similarity applied
    /// to a contour containing arcs.
    pub fn transform(&self, transform: &Transform2) -> Result<Self> {
        Ok(Self {
            curve: self.curve.transform(transform)?,
        })
    }

    /// Region within `|distance|` of the contour, with round caps.
    ///
    /// # Errors
    ///
    /// Propagates buffer failures, see [`Buffer2D::execute`].
    pub fn buffer(&self, distance: f64) -> Result<Domain> {
        Buffer2D::new(vec![self.curve.clone()], distance, BufferOptions::default()).execute()
    }
}

impl Boundary for Contour {
    fn contours(&self) -> &[Contour] {
        std::slice::from_ref(self)
    }
}
