pub mod contour;
pub mod curve;
pub mod domain;
pub mod element;
pub mod pline;
pub mod traits;
pub mod transform;

pub use contour::Contour;
pub use curve::ContinuousCurve;
pub use domain::Domain;
pub use element::{CircleArc, Element, ElementKind, Segment};
pub use pline::{Pline, PlineVertex};
pub use traits::{Boundary, Offsettable, Parametrized};
pub use transform::Transform2;
