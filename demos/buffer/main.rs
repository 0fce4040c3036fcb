//! Buffers a few reference shapes and logs the resulting boundaries.
//!
//! ```text
//! cargo run --example buffer                       # all shapes, d = 20
//! cargo run --example buffer -- 51                 # custom distance
//! RUST_LOG=circulis=trace cargo run --example buffer
//! ```

use circulis::geometry::{ContinuousCurve, Contour, Domain};
use circulis::math::Point2;
use circulis::Result;
use tracing::info;

fn shape(coords: &[(f64, f64)]) -> Result<Contour> {
    let points: Vec<Point2> = coords.iter().map(|&(x, y)| Point2::new(x, y)).collect();
    Contour::ring(ContinuousCurve::polygon(&points)?)
}

fn report(name: &str, domain: &Domain) {
    info!(
        shape = name,
        contours = domain.boundary().len(),
        area = domain.area(),
        "buffered"
    );
    for (i, contour) in domain.boundary().iter().enumerate() {
        info!(
            index = i,
            elements = contour.curve().element_count(),
            area = contour.signed_area(),
            "  contour"
        );
    }
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for this demo and the kernel.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("buffer=info".parse().unwrap_or_default())
        .add_directive("circulis=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let distance = std::env::args()
        .nth(1)
        .and_then(|a| a.parse::<f64>().ok())
        .unwrap_or(20.0);

    let shapes = [
        ("square", vec![(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)]),
        (
            "m",
            vec![(100.0, 100.0), (300.0, 100.0), (300.0, 300.0), (200.0, 200.0), (100.0, 300.0)],
        ),
        (
            "hexagon",
            vec![
                (0.0, 0.0),
                (0.0, 100.0),
                (200.0, 100.0),
                (200.0, 200.0),
                (100.0, 200.0),
                (100.0, 0.0),
            ],
        ),
    ];
    for (name, coords) in &shapes {
        let domain = shape(coords)?.buffer(distance)?;
        report(name, &domain);
    }
    Ok(())
}
