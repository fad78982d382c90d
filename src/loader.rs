//! Image loading: read every input concurrently, decode off the async
//! runtime, and return rasters in input order.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::debug;
use url::Url;

use crate::error::MergeError;
use crate::ports::ImageSource;
use crate::raster::Raster;

/// Turn an input string into a filesystem path. `file://` URIs are
/// converted; anything else is taken as a path verbatim.
#[must_use]
pub fn resolve_input_path(input: &str) -> PathBuf {
    Url::parse(input)
        .ok()
        .filter(|url| url.scheme() == "file")
        .and_then(|url| url.to_file_path().ok())
        .unwrap_or_else(|| PathBuf::from(input))
}

/// Decode encoded bytes into a raster. The format is sniffed from content.
///
/// # Errors
///
/// Returns [`MergeError::Decode`] naming `path` if the bytes are not a
/// supported image.
pub fn decode(path: &str, bytes: &[u8]) -> Result<Raster, MergeError> {
    let image = image::load_from_memory(bytes).map_err(|e| MergeError::decode(path, e))?;
    Ok(Raster::new(path, image))
}

/// Read and decode every input.
///
/// Inputs are processed concurrently; the result keeps input order. The
/// first failure to complete aborts the remaining work and is returned.
///
/// # Errors
///
/// Returns [`MergeError::Input`] for an empty list and
/// [`MergeError::Decode`] for any unreadable or undecodable input.
pub async fn load_all<S: AsRef<str>>(
    source: &Arc<dyn ImageSource>,
    paths: &[S],
) -> Result<Vec<Raster>, MergeError> {
    if paths.is_empty() {
        return Err(MergeError::Input("provided list of image paths is empty".into()));
    }

    let mut tasks = JoinSet::new();
    let mut task_paths = HashMap::with_capacity(paths.len());

    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref().to_string();
        let source = Arc::clone(source);
        let task_path = path.clone();
        let handle = tasks.spawn(async move {
            let bytes = source.read(&path).await?;
            let decoded = {
                let path = path.clone();
                tokio::task::spawn_blocking(move || decode(&path, &bytes)).await
            };
            let raster = decoded.map_err(|e| MergeError::decode(&path, e))??;
            Ok::<_, MergeError>((index, raster))
        });
        task_paths.insert(handle.id(), task_path);
    }

    let mut slots: Vec<Option<Raster>> = (0..paths.len()).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok((index, raster))) => {
                debug!(input = %raster.source, width = raster.width(), height = raster.height(), "decoded");
                slots[index] = Some(raster);
            }
            Ok(Err(e)) => return Err(e),
            Err(e) => {
                let path = task_paths.get(&e.id()).cloned().unwrap_or_default();
                return Err(MergeError::decode(&path, e));
            }
        }
    }

    slots
        .into_iter()
        .zip(paths)
        .map(|(slot, path)| {
            slot.ok_or_else(|| MergeError::decode(path.as_ref(), "decoding did not complete"))
        })
        .collect()
}
