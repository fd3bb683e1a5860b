//! Configuration for the framealign CLI.
//!
//! Everything has a default, so a config file is optional. Command-line
//! flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::AlignError;
use crate::frames::{FrameLocator, DEFAULT_PATTERN};

/// Top-level configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlignConfig {
    /// Directory holding the extracted frame images.
    pub frames_dir: PathBuf,

    /// File name pattern of a frame image, e.g. `image%d.png`.
    pub pattern: String,

    pub logging: LoggingConfig,
}

/// Logging configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "framealign=debug,warn").
    /// `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,
}

impl Default for AlignConfig {
    fn default() -> Self {
        Self {
            frames_dir: PathBuf::from("."),
            pattern: DEFAULT_PATTERN.to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

impl AlignConfig {
    /// Loads a JSON config file. Missing keys take their defaults.
    pub fn load(path: &Path) -> Result<Self, AlignError> {
        let content = fs::read_to_string(path).map_err(|source| AlignError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| AlignError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads `path` if given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, AlignError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Builds the frame locator this config describes.
    pub fn locator(&self) -> Result<FrameLocator, AlignError> {
        FrameLocator::new(self.frames_dir.clone(), &self.pattern)
    }
}
