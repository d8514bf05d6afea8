use thiserror::Error;

/// Errors originating from the core fractal engine.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid max iterations: {0} (must be >= 1)")]
    InvalidMaxIterations(u32),

    #[error("invalid color multiple: {0} (must be >= 1)")]
    InvalidColorMultiple(u32),

    #[error("invalid resolution: {0} (must be > 0)")]
    InvalidResolution(u32),

    #[error("invalid region: {reason}")]
    InvalidRegion { reason: String },

    #[error("invalid complex number {0:?} (expected \"re,im\")")]
    InvalidComplex(String),
}
