//! Image source port: where encoded input bytes come from.

use std::future::Future;
use std::pin::Pin;

use crate::error::MergeError;

/// Boxed future type returned by [`ImageSource::read`].
pub type ReadFuture<'a> = Pin<Box<dyn Future<Output = Result<Vec<u8>, MergeError>> + Send + 'a>>;

/// Reads encoded image bytes for an input path.
///
/// Implementations report failures as [`MergeError::Decode`] carrying the
/// path exactly as given.
pub trait ImageSource: Send + Sync {
    /// Read the raw bytes behind `path`.
    fn read(&self, path: &str) -> ReadFuture<'_>;
}
