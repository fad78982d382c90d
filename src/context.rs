//! Service context that bundles all port trait objects.

use std::sync::Arc;

use crate::adapters::fs::{FsImageSink, FsImageSource};
use crate::ports::{ImageSink, ImageSource};

/// Bundles all port trait objects into a single context.
#[derive(Clone)]
pub struct ServiceContext {
    /// Where input images are read from.
    pub source: Arc<dyn ImageSource>,
    /// Where the merged image is written to.
    pub sink: Arc<dyn ImageSink>,
}

impl ServiceContext {
    /// Build a context from explicit adapters.
    #[must_use]
    pub fn new(source: Arc<dyn ImageSource>, sink: Arc<dyn ImageSink>) -> Self {
        Self { source, sink }
    }

    /// Read from and write to the local filesystem.
    #[must_use]
    pub fn filesystem() -> Self {
        Self::new(Arc::new(FsImageSource), Arc::new(FsImageSink))
    }
}

impl Default for ServiceContext {
    fn default() -> Self {
        Self::filesystem()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext").finish_non_exhaustive()
    }
}
