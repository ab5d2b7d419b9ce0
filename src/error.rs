use thiserror::Error;

/// Errors reported before any construction work begins.
///
/// Degenerate geometry (collinear triples, coincident sites) is not an error; the sweep
/// recovers from it locally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VoronoiError {
    #[error("invalid bounds: min ({min_x}, {min_y}) must be finite and strictly less than max ({max_x}, {max_y})")]
    InvalidBounds {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    #[error("site {index} has non-finite coordinates ({x}, {y})")]
    NonFiniteSite { index: usize, x: f64, y: f64 },

    #[error("site {index} at ({x}, {y}) lies outside the clip rectangle")]
    SiteOutsideBounds { index: usize, x: f64, y: f64 },

    #[error("generator buffer of length {len} does not hold whole [x, y] pairs")]
    MalformedGenerators { len: usize },

    #[error("site index {index} is out of range for {count} sites")]
    SiteIndexOutOfRange { index: usize, count: usize },
}
