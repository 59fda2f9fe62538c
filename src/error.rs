use thiserror::Error;

use crate::pixel::PixelKey;

/// Errors from vector math and collision primitives.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum GeomError {
    #[error("expected {expected} vertices, got {actual}")]
    InvalidArity { expected: usize, actual: usize },

    #[error("cannot normalise a zero-length vector")]
    DegenerateVector,

    #[error("cannot build a vector from {0}")]
    UnsupportedInput(String),
}

/// Which safety cap stopped a tracing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// More blobs than `max_shapes`.
    Shapes(usize),
    /// A single boundary walk took more than `max_steps`.
    Steps(usize),
}

impl std::fmt::Display for Limit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Limit::Shapes(n) => write!(f, "shape limit of {}", n),
            Limit::Steps(n) => write!(f, "step limit of {}", n),
        }
    }
}

/// Errors that can occur while loading and tracing an image.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TraceError {
    #[error("failed to load image: {0}")]
    ImageLoad(String),

    #[error("pixel buffer has {actual} bytes, expected {expected}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("boundary starting at {start} hit the {limit}")]
    TraceLimitExceeded { limit: Limit, start: PixelKey },

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error(transparent)]
    Geometry(#[from] GeomError),
}
