use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Which palette the renderer builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScheme {
    /// Continuous cubic-polynomial gradient.
    Polynomial,
    /// Black → blue → white → orange → black.
    #[default]
    Scheme1,
    /// Black → green → blue → black.
    Scheme2,
    /// Black → red → black.
    Scheme3,
}

impl ColorScheme {
    pub const ALL: [Self; 4] = [Self::Polynomial, Self::Scheme1, Self::Scheme2, Self::Scheme3];

    pub fn label(self) -> &'static str {
        match self {
            Self::Polynomial => "polynomial",
            Self::Scheme1 => "scheme1",
            Self::Scheme2 => "scheme2",
            Self::Scheme3 => "scheme3",
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters read by a generation pass.
///
/// Set before a pass starts and treated as read-only while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Iteration cap; points reaching it are drawn black.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Multiplier applied to the iteration count before the palette lookup.
    #[serde(default = "default_color_multiple")]
    pub color_multiple: u32,

    #[serde(default)]
    pub scheme: ColorScheme,
}

fn default_max_iterations() -> u32 {
    RenderConfig::DEFAULT_MAX_ITERATIONS
}

fn default_color_multiple() -> u32 {
    1
}

impl RenderConfig {
    pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

    pub fn new(max_iterations: u32, color_multiple: u32, scheme: ColorScheme) -> crate::Result<Self> {
        if max_iterations < 1 {
            return Err(CoreError::InvalidMaxIterations(max_iterations));
        }
        if color_multiple < 1 {
            return Err(CoreError::InvalidColorMultiple(color_multiple));
        }
        Ok(Self {
            max_iterations,
            color_multiple,
            scheme,
        })
    }

    /// Return a copy with a different `max_iterations` value.
    pub fn with_max_iterations(self, max_iterations: u32) -> crate::Result<Self> {
        Self::new(max_iterations, self.color_multiple, self.scheme)
    }

    /// Return a copy with a different `color_multiple` value.
    pub fn with_color_multiple(self, color_multiple: u32) -> crate::Result<Self> {
        Self::new(self.max_iterations, color_multiple, self.scheme)
    }

    pub fn with_scheme(self, scheme: ColorScheme) -> Self {
        Self { scheme, ..self }
    }

    /// Check a value that may have bypassed [`new`](Self::new), e.g. one
    /// loaded from a settings file.
    pub fn validated(self) -> crate::Result<Self> {
        Self::new(self.max_iterations, self.color_multiple, self.scheme)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            max_iterations: Self::DEFAULT_MAX_ITERATIONS,
            color_multiple: 1,
            scheme: ColorScheme::default(),
        }
    }
}
