//! Error types for scene construction and rendering.
//!
//! Only configuration and construction problems are errors. Per-ray
//! failures (misses, absorbed paths) are ordinary `None` results.

use thiserror::Error;

/// Errors raised before or while starting a render pass.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render config: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },

    #[error("Cannot render an empty image ({width}x{height})")]
    EmptyResolution { width: u32, height: u32 },

    #[error("Failed to build render thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Errors raised when building primitives from raw shape parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    #[error("Sphere radius must be positive and finite, got {0}")]
    NonPositiveRadius(f64),

    #[error("Plane normal must be non-zero")]
    ZeroNormal,

    #[error("Polygon needs at least 3 vertices, got {0}")]
    TooFewVertices(usize),

    #[error("Polygon's first three vertices are collinear")]
    DegeneratePolygon,
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
