use thiserror::Error;

/// Errors originating from the rendering pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid grid resolution: {0}×{0} (must be > 0)")]
    InvalidResolution(u32),

    #[error("invalid palette anchors: {reason}")]
    InvalidAnchors { reason: String },

    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),

    #[error("PNG export failed: {0}")]
    Export(String),

    #[error(transparent)]
    Core(#[from] mandelview_core::CoreError),
}
