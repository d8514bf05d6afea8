pub mod animation;
pub mod complex;
pub mod config;
pub mod error;
pub mod escape;
pub mod region;
pub mod viewport;

// Re-export primary types for convenience.
pub use animation::{zoom_frames, ZoomFrame};
pub use complex::Complex;
pub use config::{ColorScheme, RenderConfig};
pub use error::CoreError;
pub use escape::{escape, escape_point, BAILOUT_SQ};
pub use region::ComplexRegion;
pub use viewport::Viewport;

/// Convenience result type for the core crate.
pub type Result<T> = std::result::Result<T, CoreError>;
