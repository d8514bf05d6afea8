use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use mandelview_core::RenderConfig;

use crate::error::CliError;

pub const DEFAULT_RESOLUTION: u32 = 1024;

/// Persisted defaults for the render harness. Command-line flags override
/// whatever is loaded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_resolution")]
    pub resolution: u32,

    #[serde(default)]
    pub render: RenderConfig,

    /// Worker threads; `None` means one per hardware thread.
    #[serde(default)]
    pub workers: Option<usize>,

    /// Directory for timestamped output when no explicit path is given.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            render: RenderConfig::default(),
            workers: None,
            output_dir: default_output_dir(),
        }
    }
}

impl Settings {
    /// Read settings from `path`, falling back to defaults if the file is
    /// missing or unreadable.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings file at {}", path.display());
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    error!("Failed to parse settings: {e}");
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| CliError::SettingsWrite {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, json).map_err(|source| CliError::SettingsWrite {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }
}
