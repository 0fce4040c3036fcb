use tracing::debug;

use crate::error::Result;
use crate::geometry::contour::Contour;
use crate::geometry::traits::Boundary;
use crate::geometry::transform::Transform2;
use crate::math::Point2;
use crate::operations::offset::{Buffer2D, BufferOptions};

/// A planar region bounded by disjoint, non-crossing contours.
///
/// The region lies on the left of every contour (nonzero winding). A
/// boundary made only of rings whose largest ring is clockwise describes
/// an unbounded region, such as the complement of a disk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Domain {
    boundary: Vec<Contour>,
}

impl Domain {
    /// Creates a domain bounded by `boundary`.
    #[must_use]
    pub fn new(boundary: Vec<Contour>) -> Self {
        Self { boundary }
    }

    #[must_use]
    pub fn boundary(&self) -> &[Contour] {
        &self.boundary
    }

    #[must_use]
    pub fn into_boundary(self) -> Vec<Contour> {
        self.boundary
    }

    /// Returns `true` when the domain has no boundary (and thus no points).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundary.is_empty()
    }

    /// The ring with the largest absolute area, if every contour is a ring.
    fn dominant_ring(&self) -> Option<&Contour> {
        if !self.boundary.iter().all(Contour::is_ring) {
            return None;
        }
        self.boundary.iter().max_by(|a, b| {
            let aa = a.signed_area().unwrap_or(0.0).abs();
            let bb = b.signed_area().unwrap_or(0.0).abs();
            aa.total_cmp(&bb)
        })
    }

    /// Returns `true` if every contour is a ring and the outermost one is
    /// counter-clockwise.
    fn has_outer_ring(&self) -> bool {
        self.dominant_ring()
            .and_then(Contour::signed_area)
            .is_some_and(|area| area > 0.0)
    }

    fn is_inverted(&self) -> bool {
        self.dominant_ring()
            .and_then(Contour::signed_area)
            .is_some_and(|area| area < 0.0)
    }

    /// Nonzero-winding point containment.
    #[must_use]
    pub fn contains(&self, point: &Point2) -> bool {
        let mut winding = self.winding_number(point);
        if self.is_inverted() {
            winding += 1;
        }
        winding != 0
    }

    /// Area of the region: the sum of signed ring areas, or `+∞` when the
    /// region is unbounded.
    #[must_use]
    pub fn area(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        if !self.is_bounded() {
            return f64::INFINITY;
        }
        self.boundary
            .iter()
            .filter_map(Contour::signed_area)
            .sum()
    }

    /// The closure of the rest of the plane. The complement of an empty
    /// domain is empty.
    #[must_use]
    pub fn complement(&self) -> Self {
        Self::new(self.boundary.iter().map(Contour::reversed).collect())
    }

    /// Applies a similarity transform to every contour. A reflection also
    /// reverses the orientation of every contour, so the region is kept on
    /// the left.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotCirculinear` for a non-similarity applied
    /// to a boundary containing arcs.
    pub fn transform(&self, transform: &Transform2) -> Result<Self> {
        let mut boundary = self
            .boundary
            .iter()
            .map(|c| c.transform(transform))
            .collect::<Result<Vec<_>>>()?;
        if transform.is_reflection() {
            boundary = boundary.iter().map(Contour::reversed).collect();
        }
        Ok(Self::new(boundary))
    }

    /// Region within `|distance|` of the boundary, with round caps.
    ///
    /// # Errors
    ///
    /// Propagates buffer failures, see [`Buffer2D::execute`].
    pub fn buffer(&self, distance: f64) -> Result<Self> {
        self.buffer_with(distance, &BufferOptions::default())
    }

    /// Region within `|distance|` of the boundary.
    ///
    /// # Errors
    ///
    /// Propagates buffer failures, see [`Buffer2D::execute`].
    pub fn buffer_with(&self, distance: f64, options: &BufferOptions) -> Result<Self> {
        debug!(
            contours = self.boundary.len(),
            distance, "buffering domain boundary"
        );
        let curves = self.boundary.iter().map(|c| c.curve().clone()).collect();
        Buffer2D::new(curves, distance, options.clone()).execute()
    }
}

impl Boundary for Domain {
    fn contours(&self) -> &[Contour] {
        &self.boundary
    }

    fn is_bounded(&self) -> bool {
        self.has_outer_ring()
    }
}

impl From<Contour> for Domain {
    fn from(contour: Contour) -> Self {
        Self::new(vec![contour])
    }
}
