//! In-memory adapters.
//!
//! Useful for tests and for embedding the merge pipeline where inputs are
//! already in memory.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::MergeError;
use crate::output::candidate_name;
use crate::ports::image_sink::{Destination, ImageSink, WriteFuture};
use crate::ports::image_source::{ImageSource, ReadFuture};

/// Serves encoded images from a map keyed by input path.
#[derive(Debug, Default)]
pub struct MemoryImageSource {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryImageSource {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `bytes` under `path`.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.files.insert(path.into(), bytes);
        self
    }
}

impl ImageSource for MemoryImageSource {
    fn read(&self, path: &str) -> ReadFuture<'_> {
        let result = self
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| MergeError::decode(path, "no such file"));
        Box::pin(async move { result })
    }
}

/// Keeps written images in memory.
#[derive(Debug, Default)]
pub struct MemoryImageSink {
    files: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryImageSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes written at `path`, if any.
    #[must_use]
    pub fn get(&self, path: &std::path::Path) -> Option<Vec<u8>> {
        self.files.lock().ok()?.get(path).cloned()
    }

    /// Number of stored files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.lock().map(|f| f.len()).unwrap_or_default()
    }

    /// Whether nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ImageSink for MemoryImageSink {
    fn write(&self, destination: Destination, bytes: Vec<u8>) -> WriteFuture<'_> {
        Box::pin(async move {
            let mut files = self.files.lock().map_err(|e| {
                MergeError::write(destination.display_path(), std::io::Error::other(e.to_string()))
            })?;
            let path = match destination {
                Destination::Exact(path) => path,
                Destination::Generated { dir, stem, extension } => (0..)
                    .map(|attempt| dir.join(candidate_name(&stem, extension, attempt)))
                    .find(|p| !files.contains_key(p))
                    .unwrap_or_else(|| dir.join(candidate_name(&stem, extension, 0))),
            };
            files.insert(path.clone(), bytes);
            Ok(path)
        })
    }
}
