//! Vertical stacking layout.
//!
//! Inputs are stacked top to bottom in input order and left-aligned at
//! `x = 0`. Each input keeps its natural size unless it is wider than the
//! width cap, in which case it is shrunk proportionally to the cap. Inputs
//! are never enlarged.

use serde::Serialize;

use crate::error::MergeError;
use crate::options::MergeOptions;

/// Where one input lands on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Placement {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Scaled width.
    pub width: u32,
    /// Scaled height.
    pub height: u32,
}

/// Placements for every input plus the canvas size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Layout {
    /// One placement per input, in input order.
    pub placements: Vec<Placement>,
    /// Canvas width.
    pub width: u32,
    /// Canvas height.
    pub height: u32,
}

/// Largest canvas, in bytes of RGBA8 pixel data, the planner accepts.
/// Matches the allocation cap `image` applies when decoding.
#[must_use]
pub fn max_canvas_bytes() -> u64 {
    image::Limits::default().max_alloc.unwrap_or(u64::MAX)
}

/// Shrink `(width, height)` so the width does not exceed `max_width`,
/// keeping the aspect ratio. Height rounds down but never below 1.
#[must_use]
pub fn clamp_size((width, height): (u32, u32), max_width: Option<u32>) -> (u32, u32) {
    match max_width {
        Some(max) if width > max => {
            let scaled = u64::from(max) * u64::from(height) / u64::from(width);
            // scaled <= height, so the conversion cannot fail
            let scaled = u32::try_from(scaled).unwrap_or(height).max(1);
            (max, scaled)
        }
        _ => (width, height),
    }
}

/// Compute the layout for inputs of the given natural dimensions.
///
/// # Errors
///
/// Returns [`MergeError::InvalidOptions`] if `maxWidth` is non-positive,
/// [`MergeError::Input`] if there are no inputs, an input has a zero
/// dimension, or the stacked canvas is larger than [`max_canvas_bytes`].
pub fn plan(dimensions: &[(u32, u32)], options: &MergeOptions) -> Result<Layout, MergeError> {
    let max_width = options.max_width()?;
    if dimensions.is_empty() {
        return Err(MergeError::Input("no images to lay out".into()));
    }

    let mut placements = Vec::with_capacity(dimensions.len());
    let mut canvas_width = 0u32;
    let mut y = 0u32;

    for (index, &natural) in dimensions.iter().enumerate() {
        if natural.0 == 0 || natural.1 == 0 {
            return Err(MergeError::Input(format!(
                "image {index} has empty dimensions {}x{}",
                natural.0, natural.1
            )));
        }
        let (width, height) = clamp_size(natural, max_width);
        placements.push(Placement { x: 0, y, width, height });
        canvas_width = canvas_width.max(width);
        y = y.checked_add(height).ok_or_else(|| {
            MergeError::Input("combined image height exceeds the supported maximum".into())
        })?;
    }

    let bytes = u64::from(canvas_width) * u64::from(y) * 4;
    if bytes > max_canvas_bytes() {
        return Err(MergeError::Input(format!(
            "merged image {canvas_width}x{y} needs {bytes} bytes, over the {} byte limit",
            max_canvas_bytes()
        )));
    }

    Ok(Layout { placements, width: canvas_width, height: y })
}
