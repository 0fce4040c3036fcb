pub mod arc_2d;
pub mod distance_2d;
pub mod intersect_2d;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3x3 homogeneous transformation matrix.
pub type Matrix3 = nalgebra::Matrix3<f64>;

/// Global geometric tolerance for point coincidence, parallelism and
/// angle-containment tests. Every component compares against this value.
pub const ACCURACY: f64 = 1e-10;

/// Returns `true` if two points coincide within [`ACCURACY`].
#[must_use]
pub fn coincident(a: &Point2, b: &Point2) -> bool {
    (a - b).norm() < ACCURACY
}

/// Returns the right-pointing normal of a direction vector.
#[must_use]
pub fn right_normal(dir: &Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}

/// Z component of the 2D cross product `a × b`.
#[must_use]
pub fn cross(a: &Vector2, b: &Vector2) -> f64 {
    a.x * b.y - a.y * b.x
}
