use std::path::PathBuf;

use thiserror::Error;

use mandelview_core::CoreError;
use mandelview_render::RenderError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("zoom factor must be finite and positive, got {0}")]
    InvalidZoomFactor(f64),

    #[error("failed to write settings to {path}: {source}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
