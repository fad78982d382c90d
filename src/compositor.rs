//! Paints rasters onto the merged canvas.

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::layout::Layout;
use crate::raster::Raster;

/// Resampling filter used when a raster is scaled to its placement.
pub const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// Paint each raster at its placement on a transparent canvas of the
/// planned size. Rasters are consumed and dropped as they are painted.
///
/// `rasters` and `layout.placements` must be the same length and in the
/// same order; extra entries on either side are ignored.
#[must_use]
pub fn composite(rasters: Vec<Raster>, layout: &Layout) -> RgbaImage {
    let mut canvas = RgbaImage::new(layout.width, layout.height);

    for (raster, placement) in rasters.into_iter().zip(&layout.placements) {
        let scaled = if raster.dimensions() == (placement.width, placement.height) {
            raster.pixels
        } else {
            imageops::resize(&raster.pixels, placement.width, placement.height, RESAMPLE_FILTER)
        };
        imageops::replace(&mut canvas, &scaled, i64::from(placement.x), i64::from(placement.y));
    }

    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::plan;
    use crate::options::MergeOptions;
    use image::{DynamicImage, Rgba};

    fn solid(name: &str, width: u32, height: u32, color: [u8; 4]) -> Raster {
        let pixels = RgbaImage::from_pixel(width, height, Rgba(color));
        Raster::new(name, DynamicImage::ImageRgba8(pixels))
    }

    #[test]
    fn stacks_top_to_bottom() {
        let rasters = vec![solid("red", 100, 50, [255, 0, 0, 255]), solid("green", 200, 100, [0, 255, 0, 255])];
        let dims: Vec<_> = rasters.iter().map(Raster::dimensions).collect();
        let layout = plan(&dims, &MergeOptions::default()).unwrap();

        let canvas = composite(rasters, &layout);

        assert_eq!(canvas.dimensions(), (200, 150));
        assert_eq!(canvas.get_pixel(10, 10), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(150, 100), &Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn narrow_rows_leave_transparent_gap() {
        let rasters = vec![solid("a", 100, 50, [255, 0, 0, 255]), solid("b", 200, 100, [0, 0, 255, 255])];
        let dims: Vec<_> = rasters.iter().map(Raster::dimensions).collect();
        let layout = plan(&dims, &MergeOptions::default()).unwrap();

        let canvas = composite(rasters, &layout);

        assert_eq!(canvas.get_pixel(150, 10)[3], 0);
    }

    #[test]
    fn scales_to_placement() {
        let rasters = vec![solid("wide", 400, 200, [10, 20, 30, 255])];
        let layout = plan(&[(400, 200)], &MergeOptions::with_max_width(100)).unwrap();

        let canvas = composite(rasters, &layout);

        assert_eq!(canvas.dimensions(), (100, 50));
        // A solid color stays solid under bilinear resampling.
        assert_eq!(canvas.get_pixel(50, 25), &Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn deterministic_output() {
        let make = || {
            let mut img = RgbaImage::new(64, 32);
            for (x, y, px) in img.enumerate_pixels_mut() {
                *px = Rgba([(x * 4) as u8, (y * 8) as u8, 128, 255]);
            }
            vec![Raster::new("gradient", DynamicImage::ImageRgba8(img))]
        };
        let layout = plan(&[(64, 32)], &MergeOptions::with_max_width(20)).unwrap();

        assert_eq!(composite(make(), &layout), composite(make(), &layout));
    }
}
