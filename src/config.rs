//! Configuration file loading with environment variable overrides.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::options::{MergeOptions, OutputFormat, Target};
use crate::output::OutputDirs;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Default merge options (overridden by explicit CLI flags).
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Output directories.
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Default merge option values from the config file.
#[derive(Debug, Default, Deserialize)]
pub struct DefaultsConfig {
    /// Default width cap.
    pub max_width: Option<i64>,
    /// Default output format.
    pub format: Option<OutputFormat>,
    /// Default JPEG quality.
    pub quality: Option<i64>,
    /// Default output target.
    pub target: Option<Target>,
}

/// Output directory configuration.
#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
    /// Directory for `target = "temp"`.
    pub temp_dir: Option<PathBuf>,
    /// Directory for `target = "disk"`.
    pub output_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from the given path, or return defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
    }

    /// Load configuration from a path the user named explicitly.
    ///
    /// # Errors
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_required(path: &Path) -> Result<Self, String> {
        if !path.is_file() {
            return Err(format!("Config file not found: {}", path.display()));
        }
        Self::load(path)
    }

    /// Temp output directory, preferring `MERGE_IMAGES_TEMP_DIR`.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        std::env::var_os("MERGE_IMAGES_TEMP_DIR")
            .map(PathBuf::from)
            .or_else(|| self.paths.temp_dir.clone())
            .unwrap_or_else(std::env::temp_dir)
    }

    /// Persistent output directory, preferring `MERGE_IMAGES_OUTPUT_DIR`.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        std::env::var_os("MERGE_IMAGES_OUTPUT_DIR")
            .map(PathBuf::from)
            .or_else(|| self.paths.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Both output directories.
    #[must_use]
    pub fn output_dirs(&self) -> OutputDirs {
        OutputDirs { temp_dir: self.temp_dir(), output_dir: self.output_dir() }
    }

    /// Merge options built from the `[defaults]` section.
    #[must_use]
    pub fn default_options(&self) -> MergeOptions {
        MergeOptions {
            max_width: self.defaults.max_width,
            format: self.defaults.format.unwrap_or_default(),
            jpeg_quality: self.defaults.quality,
            target: self.defaults.target.unwrap_or_default(),
            destination: None,
        }
    }
}

/// Discover the config file path using the resolution order:
/// 1. Explicit path (from `--config` flag)
/// 2. `MERGE_IMAGES_CONFIG` environment variable
/// 3. `~/.config/merge-images/config.toml`
#[must_use]
pub fn discover_config_path(explicit: Option<&str>) -> PathBuf {
    if let Some(p) = explicit {
        return PathBuf::from(p);
    }

    if let Ok(p) = std::env::var("MERGE_IMAGES_CONFIG") {
        return PathBuf::from(p);
    }

    default_config_path()
}

/// Default config path: `~/.config/merge-images/config.toml`.
fn default_config_path() -> PathBuf {
    if let Ok(home) = std::env::var("HOME") {
        PathBuf::from(home).join(".config/merge-images/config.toml")
    } else {
        PathBuf::from("merge-images.toml")
    }
}
