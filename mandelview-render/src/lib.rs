pub mod engine;
pub mod error;
pub mod export;
pub mod generator;
pub mod grid;
pub mod palette;
pub mod recolor;
pub mod scheduler;

pub use engine::{MandelbrotEngine, ZOOM_ANIMATION_FRAMES, ZOOM_IN_FACTOR, ZOOM_OUT_FACTOR};
pub use error::RenderError;
pub use export::{export_png, timestamped_filename, ExportMetadata};
pub use generator::{default_workers, GenerationStats, WorkerPool};
pub use grid::{PixelGrid, RowMut};
pub use palette::{Palette, Rgb, PALETTE_SIZE};
pub use recolor::recolor;
pub use scheduler::{RowClaim, RowScheduler};

/// Convenience result type for the render crate.
pub type Result<T> = std::result::Result<T, RenderError>;
