//! Merge options and their validation.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MergeError;

/// JPEG quality used when none is given.
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Options recognized by [`merge`](crate::merge).
///
/// Field names serialize in camelCase so a JSON options object from a
/// calling runtime (`{ "maxWidth": 800 }`) deserializes directly. Numeric
/// fields are signed so that out-of-range values reach validation instead
/// of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    /// Caps the width of every placed image. Absent means unconstrained.
    pub max_width: Option<i64>,
    /// Output encoding.
    pub format: OutputFormat,
    /// JPEG quality, `1..=100`. Ignored for other formats.
    pub jpeg_quality: Option<i64>,
    /// Where engine-generated output files go.
    pub target: Target,
    /// Explicit output path. Overrides `target`.
    pub destination: Option<PathBuf>,
}

/// [`MergeOptions`] after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedOptions {
    /// Positive width cap, if any.
    pub max_width: Option<u32>,
    /// Output encoding.
    pub format: OutputFormat,
    /// JPEG quality in `1..=100`.
    pub jpeg_quality: u8,
    /// Output directory selector.
    pub target: Target,
    /// Explicit output path.
    pub destination: Option<PathBuf>,
}

impl MergeOptions {
    /// Options with only a width cap set.
    #[must_use]
    pub fn with_max_width(max_width: i64) -> Self {
        Self { max_width: Some(max_width), ..Self::default() }
    }

    /// Validate the width cap.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidOptions`] if `max_width` is present and
    /// not a positive 32-bit value.
    pub fn max_width(&self) -> Result<Option<u32>, MergeError> {
        match self.max_width {
            None => Ok(None),
            Some(w) if w <= 0 => Err(MergeError::InvalidOptions(format!(
                "maxWidth must be a positive integer, got {w}"
            ))),
            Some(w) => u32::try_from(w).map(Some).map_err(|_| {
                MergeError::InvalidOptions(format!("maxWidth {w} is too large"))
            }),
        }
    }

    /// Validate every option and fill in defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MergeError::InvalidOptions`] for a non-positive width cap or
    /// a JPEG quality outside `1..=100`.
    pub fn resolve(&self) -> Result<ResolvedOptions, MergeError> {
        let max_width = self.max_width()?;
        let jpeg_quality = match self.jpeg_quality {
            None => DEFAULT_JPEG_QUALITY,
            Some(q) => u8::try_from(q).ok().filter(|q| (1..=100).contains(q)).ok_or_else(|| {
                MergeError::InvalidOptions(format!("jpegQuality must be in 1..=100, got {q}"))
            })?,
        };
        Ok(ResolvedOptions {
            max_width,
            format: self.format,
            jpeg_quality,
            target: self.target,
            destination: self.destination.clone(),
        })
    }
}

/// Encoding of the merged file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG; alpha is dropped. Each side is limited to 65535 pixels.
    #[default]
    Jpeg,
    /// Lossless PNG.
    Png,
    /// Lossless WebP.
    WebP,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::WebP => "webp",
        })
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::WebP),
            _ => Err(format!("Unsupported format '{s}'. Valid: jpeg, png, webp")),
        }
    }
}

/// Output directory selector for engine-generated file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Scratch directory; files may be cleaned up by the system.
    #[default]
    Temp,
    /// Persistent output directory.
    Disk,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Temp => "temp",
            Self::Disk => "disk",
        })
    }
}

impl FromStr for Target {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "temp" => Ok(Self::Temp),
            "disk" => Ok(Self::Disk),
            _ => Err(format!("Unsupported target '{s}'. Valid: temp, disk")),
        }
    }
}
