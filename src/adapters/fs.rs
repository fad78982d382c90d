//! Filesystem adapters.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::error::MergeError;
use crate::loader::resolve_input_path;
use crate::output::write_atomic;
use crate::ports::image_sink::{Destination, ImageSink, WriteFuture};
use crate::ports::image_source::{ImageSource, ReadFuture};

/// Reads input images from the local filesystem. Accepts plain paths and
/// `file://` URIs.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageSource;

impl ImageSource for FsImageSource {
    fn read(&self, path: &str) -> ReadFuture<'_> {
        let path = path.to_string();
        Box::pin(async move {
            let resolved = resolve_input_path(&path);
            debug!(input = %path, resolved = %resolved.display(), "reading image");
            tokio::fs::read(&resolved).await.map_err(|e| MergeError::decode(&path, e))
        })
    }
}

/// Writes merged images to the local filesystem, atomically.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsImageSink;

/// Sets the shared flag when the owning future is dropped.
struct CancelOnDrop(Arc<AtomicBool>);

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

impl ImageSink for FsImageSink {
    fn write(&self, destination: Destination, bytes: Vec<u8>) -> WriteFuture<'_> {
        Box::pin(async move {
            let cancelled = Arc::new(AtomicBool::new(false));
            let _guard = CancelOnDrop(Arc::clone(&cancelled));
            let shown = destination.display_path();

            // The blocking write runs to completion even if this future is
            // dropped; the flag makes it clean up after itself.
            tokio::task::spawn_blocking(move || write_atomic(&destination, &bytes, &cancelled))
                .await
                .map_err(|e| MergeError::write(shown, std::io::Error::other(e)))?
        })
    }
}
