//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the merge pipeline and the
//! storage it reads from or writes to. Implementations live in `src/adapters/`.

pub mod image_sink;
pub mod image_source;

pub use image_sink::{Destination, ImageSink};
pub use image_source::ImageSource;
