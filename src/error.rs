use thiserror::Error;

/// Top-level error type for the Circulis geometry kernel.
#[derive(Debug, Error)]
pub enum CirculisError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Curve(#[from] CurveError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors related to individual elements.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("zero-length vector")]
    ZeroVector,

    #[error("not a circulinear shape: {0}")]
    NotCirculinear(String),
}

/// Errors related to chains of elements (curves and contours).
#[derive(Debug, Error)]
pub enum CurveError {
    #[error("curve is not continuous: gap of {gap} after element {index}")]
    Discontinuous { index: usize, gap: f64 },

    #[error("element {index} is unbounded inside the curve")]
    UnboundedInterior { index: usize },

    #[error("curve is not closed")]
    NotClosed,

    #[error("curve is neither a ring nor unbounded at both ends")]
    NotContour,

    #[error("curve has no elements")]
    Empty,
}

/// Errors related to splitting, offsetting and buffering.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unresolved crossing: {0}")]
    UnresolvedCrossing(String),
}

/// Convenience type alias for results using [`CirculisError`].
pub type Result<T> = std::result::Result<T, CirculisError>;
