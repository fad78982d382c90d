//! Image sink port: where the encoded merge result goes.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;

use crate::error::MergeError;

/// Where the merged file should be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Caller-supplied path; an existing file there is replaced.
    Exact(PathBuf),
    /// Engine-generated name `<stem>.<extension>` inside `dir`. Existing
    /// files are never replaced; a `-N` suffix is added instead.
    Generated {
        /// Output directory, created if missing.
        dir: PathBuf,
        /// File stem, e.g. `IMG_20260101_120000`.
        stem: String,
        /// File extension without the dot.
        extension: &'static str,
    },
}

impl Destination {
    /// The path used in error messages before a final name is chosen.
    #[must_use]
    pub fn display_path(&self) -> PathBuf {
        match self {
            Self::Exact(path) => path.clone(),
            Self::Generated { dir, stem, extension } => dir.join(format!("{stem}.{extension}")),
        }
    }

    /// Directory the file will land in.
    #[must_use]
    pub fn dir(&self) -> &Path {
        match self {
            Self::Exact(path) => match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            },
            Self::Generated { dir, .. } => dir,
        }
    }
}

/// Boxed future type returned by [`ImageSink::write`].
pub type WriteFuture<'a> = Pin<Box<dyn Future<Output = Result<PathBuf, MergeError>> + Send + 'a>>;

/// Stores encoded images.
pub trait ImageSink: Send + Sync {
    /// Store `bytes` at `destination` and return the final path.
    ///
    /// The write is all-or-nothing: on failure or cancellation no partial
    /// file is left at the final path.
    fn write(&self, destination: Destination, bytes: Vec<u8>) -> WriteFuture<'_>;
}
