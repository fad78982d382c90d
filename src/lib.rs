//! Stack a list of images vertically into a single image file.
//!
//! ```no_run
//! # async fn run() -> Result<(), merge_images::MergeError> {
//! use merge_images::{merge, MergeOptions};
//!
//! let result = merge(&["top.png", "bottom.jpg"], &MergeOptions::with_max_width(1080)).await?;
//! println!("{} ({}x{})", result.path.display(), result.width, result.height);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod compositor;
pub mod config;
pub mod context;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod layout;
pub mod loader;
pub mod options;
pub mod output;
pub mod ports;
pub mod raster;

pub use engine::{MergeEngine, MergeResult};
pub use error::{ErrorKind, MergeError};
pub use options::{MergeOptions, OutputFormat, Target};

/// Merge images with the default filesystem engine.
///
/// Output directories come from the environment overrides
/// (`MERGE_IMAGES_TEMP_DIR`, `MERGE_IMAGES_OUTPUT_DIR`) or their defaults;
/// no config file is read.
///
/// # Errors
///
/// See [`MergeEngine::merge`].
pub async fn merge<S: AsRef<str>>(
    image_paths: &[S],
    options: &MergeOptions,
) -> Result<MergeResult, MergeError> {
    MergeEngine::from_config(&config::Config::default()).merge(image_paths, options).await
}
