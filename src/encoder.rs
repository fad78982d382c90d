//! Canvas encoding.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::MergeError;
use crate::options::OutputFormat;

/// Largest width or height a JPEG can describe.
pub const JPEG_MAX_DIMENSION: u32 = u16::MAX as u32;

/// Check that a canvas of `width` x `height` can be encoded as `format`.
///
/// # Errors
///
/// Returns [`MergeError::Encode`] if a JPEG side exceeds
/// [`JPEG_MAX_DIMENSION`].
pub fn check_dimensions(format: OutputFormat, width: u32, height: u32) -> Result<(), MergeError> {
    if format == OutputFormat::Jpeg && (width > JPEG_MAX_DIMENSION || height > JPEG_MAX_DIMENSION) {
        return Err(MergeError::Encode(format!(
            "jpeg: {width}x{height} exceeds the {JPEG_MAX_DIMENSION} pixel limit per side; \
             set maxWidth or use png/webp"
        )));
    }
    Ok(())
}

/// Encode the canvas in the requested format.
///
/// JPEG has no alpha channel; transparent areas come out black.
///
/// # Errors
///
/// Returns [`MergeError::Encode`] if the encoder rejects the image.
pub fn encode(canvas: RgbaImage, format: OutputFormat, jpeg_quality: u8) -> Result<Vec<u8>, MergeError> {
    let mut buf = Cursor::new(Vec::new());
    let image = DynamicImage::ImageRgba8(canvas);

    match format {
        OutputFormat::Jpeg => {
            let rgb = image.into_rgb8();
            JpegEncoder::new_with_quality(&mut buf, jpeg_quality)
                .encode_image(&rgb)
                .map_err(|e| MergeError::Encode(format!("jpeg: {e}")))?;
        }
        OutputFormat::Png => image
            .write_to(&mut buf, ImageFormat::Png)
            .map_err(|e| MergeError::Encode(format!("png: {e}")))?,
        OutputFormat::WebP => image
            .write_to(&mut buf, ImageFormat::WebP)
            .map_err(|e| MergeError::Encode(format!("webp: {e}")))?,
    }

    Ok(buf.into_inner())
}
