//! Decoded in-memory images.

use image::{ColorType, DynamicImage, RgbaImage};

/// A decoded input image, normalized to RGBA8.
#[derive(Debug, Clone)]
pub struct Raster {
    /// The input path exactly as the caller passed it.
    pub source: String,
    /// Color type of the encoded source before normalization.
    pub color: ColorType,
    /// Pixel data.
    pub pixels: RgbaImage,
}

impl Raster {
    /// Wrap a decoded image.
    #[must_use]
    pub fn new(source: impl Into<String>, image: DynamicImage) -> Self {
        let color = image.color();
        Self { source: source.into(), color, pixels: image.into_rgba8() }
    }

    /// Width in pixels.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// `(width, height)` in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }
}
