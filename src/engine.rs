//! The merge pipeline: load, plan, composite, encode, write.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use crate::compositor::composite;
use crate::config::Config;
use crate::context::ServiceContext;
use crate::encoder::{check_dimensions, encode};
use crate::error::MergeError;
use crate::layout::plan;
use crate::loader::load_all;
use crate::options::MergeOptions;
use crate::output::{resolve_destination, OutputDirs};
use crate::raster::Raster;

/// Outcome of a successful merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeResult {
    /// The newly written file.
    pub path: PathBuf,
    /// Pixel width of the written image.
    pub width: u32,
    /// Pixel height of the written image.
    pub height: u32,
}

impl MergeResult {
    /// `file://` URI for the result, if the path is absolute.
    #[must_use]
    pub fn uri(&self) -> Option<String> {
        Url::from_file_path(&self.path).ok().map(String::from)
    }
}

/// Runs merges against a fixed set of adapters and output directories.
///
/// Each call is independent; the engine holds no per-call state.
#[derive(Debug, Clone, Default)]
pub struct MergeEngine {
    ctx: ServiceContext,
    dirs: OutputDirs,
}

impl MergeEngine {
    /// Build an engine from explicit adapters and directories.
    #[must_use]
    pub fn new(ctx: ServiceContext, dirs: OutputDirs) -> Self {
        Self { ctx, dirs }
    }

    /// Filesystem engine using the directories from `config`.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(ServiceContext::filesystem(), config.output_dirs())
    }

    /// Stack `image_paths` top to bottom into one image and write it.
    ///
    /// Dropping the returned future abandons the merge; any partially
    /// written output is removed.
    ///
    /// # Errors
    ///
    /// - [`MergeError::Input`] if `image_paths` is empty
    /// - [`MergeError::InvalidOptions`] if an option is out of range
    /// - [`MergeError::Decode`] naming the first input that failed
    /// - [`MergeError::Encode`] / [`MergeError::Write`] on output failure
    pub async fn merge<S: AsRef<str>>(
        &self,
        image_paths: &[S],
        options: &MergeOptions,
    ) -> Result<MergeResult, MergeError> {
        if image_paths.is_empty() {
            return Err(MergeError::Input("provided list of image paths is empty".into()));
        }
        let resolved = options.resolve()?;

        debug!(state = "loading", count = image_paths.len());
        let rasters = load_all(&self.ctx.source, image_paths).await?;

        debug!(state = "planning", max_width = ?resolved.max_width);
        let dims: Vec<_> = rasters.iter().map(Raster::dimensions).collect();
        let layout = plan(&dims, options)?;
        let (width, height) = (layout.width, layout.height);
        check_dimensions(resolved.format, width, height)?;

        debug!(state = "compositing", width, height);
        let (format, quality) = (resolved.format, resolved.jpeg_quality);
        let bytes = tokio::task::spawn_blocking(move || {
            let canvas = composite(rasters, &layout);
            debug!(state = "encoding", %format);
            encode(canvas, format, quality)
        })
        .await
        .map_err(|e| MergeError::Encode(e.to_string()))??;

        let destination = resolve_destination(&resolved, &self.dirs, &chrono::Local::now());
        let path = self.ctx.sink.write(destination, bytes).await?;

        info!(path = %path.display(), width, height, inputs = image_paths.len(), "merged images");
        Ok(MergeResult { path, width, height })
    }
}
