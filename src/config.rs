//! Editor configuration module.
//!
//! Handles loading and validating `editor.toml`. Every key is optional;
//! a config file needs only the values it wants to override.
//!
//! ## Config File Location
//!
//! 1. The path given with `--config`, which must exist.
//! 2. Otherwise `editor.toml` in the current directory, if present.
//! 3. Otherwise the stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [preview]
//! enabled = true                     # Write the side-by-side preview image
//! width = 600                        # Width of each half, in pixels
//! path = "image-editor-preview.png"  # Where the preview is written
//!
//! [history]
//! # max_depth = 50                   # Cap undo snapshots (omit for unbounded)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "editor.toml";

const MAX_PREVIEW_WIDTH: u32 = 4096;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Editor configuration loaded from `editor.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Side-by-side preview rendering.
    pub preview: PreviewConfig,
    /// Undo history limits.
    pub history: HistoryConfig,
}

impl EditorConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.preview.width == 0 || self.preview.width > MAX_PREVIEW_WIDTH {
            return Err(ConfigError::Validation(format!(
                "preview.width must be 1-{MAX_PREVIEW_WIDTH}"
            )));
        }
        if self.preview.enabled && self.preview.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "preview.path must not be empty".into(),
            ));
        }
        if self.history.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "history.max_depth must be at least 1 (omit it for unbounded)".into(),
            ));
        }
        Ok(())
    }
}

/// Preview rendering settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PreviewConfig {
    /// Whether the preview image is written after every command.
    pub enabled: bool,
    /// Display width of each half of the preview.
    pub width: u32,
    /// Output path; the extension picks the codec.
    pub path: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 600,
            path: PathBuf::from("image-editor-preview.png"),
        }
    }
}

/// Undo history settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of undo snapshots. `None` keeps every snapshot.
    pub max_depth: Option<usize>,
}

/// Parse and validate config from a TOML string.
pub fn parse_config(content: &str) -> Result<EditorConfig, ConfigError> {
    let config: EditorConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Load config from an explicit path, or from [`DEFAULT_CONFIG_FILE`] in
/// `dir` when it exists, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, dir: &Path) -> Result<EditorConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let candidate = dir.join(DEFAULT_CONFIG_FILE);
            if !candidate.exists() {
                return Ok(EditorConfig::default());
            }
            candidate
        }
    };
    log::debug!("loading config from {}", path.display());
    let content = fs::read_to_string(&path)?;
    parse_config(&content)
}

/// Returns a fully-commented stock `editor.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Image Editor Configuration
# ==========================
#
# All options are optional. Remove or comment out any key to use its default.
# Place this file as editor.toml in the working directory, or pass it with
# --config <path>.

[preview]
# Write the original | edited preview after every command. Open the file in
# any image viewer that reloads on change to watch edits live.
enabled = true

# Width of each half of the preview, in pixels (1-4096). Heights follow the
# image's aspect ratio.
width = 600

# Where the preview is written. The extension picks the format.
path = "image-editor-preview.png"

[history]
# Maximum number of undo steps kept in memory. Every step is a full copy of
# the image, so large photos add up quickly. Omit for unlimited history.
# max_depth = 50
"##
}
