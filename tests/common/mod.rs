#![allow(dead_code)]

use circulis::geometry::ContinuousCurve;
use circulis::math::Point2;

/// Installs a test subscriber once; `RUST_LOG=circulis=trace` shows the
/// traversal and filter decisions.
pub fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_test_writer()
        .try_init();
}

pub fn points(coords: &[(f64, f64)]) -> Vec<Point2> {
    coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

#[allow(clippy::unwrap_used)]
pub fn polygon(coords: &[(f64, f64)]) -> ContinuousCurve {
    ContinuousCurve::polygon(&points(coords)).unwrap()
}

#[allow(clippy::unwrap_used)]
pub fn polyline(coords: &[(f64, f64)]) -> ContinuousCurve {
    ContinuousCurve::polyline(&points(coords)).unwrap()
}
