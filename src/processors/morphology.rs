//! Morphological opening over a 2x2 rectangular structuring element.
//!
//! Binarization leaves sub-character speckle that the recognition engine
//! reads as stray marks. Opening (erosion then dilation) removes blobs
//! smaller than the structuring element while restoring the extent of
//! anything that survives. The element is deliberately smaller than a
//! character stroke.

use image::{GrayImage, Luma};

/// Erodes with a 2x2 element anchored at the top-left pixel.
///
/// Each output pixel is the minimum over the 2x2 window extending right and
/// down from it, clamped at the raster borders.
pub fn erode_2x2(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);

    for y in 0..height {
        let y1 = (y + 1).min(height - 1);
        for x in 0..width {
            let x1 = (x + 1).min(width - 1);
            let min = image.get_pixel(x, y)[0]
                .min(image.get_pixel(x1, y)[0])
                .min(image.get_pixel(x, y1)[0])
                .min(image.get_pixel(x1, y1)[0]);
            out.put_pixel(x, y, Luma([min]));
        }
    }
    out
}

/// Dilates with the reflected 2x2 element, extending left and up.
///
/// Using the reflected element makes erosion followed by dilation a proper
/// opening: surviving shapes regain their original extent.
pub fn dilate_2x2(image: &GrayImage) -> GrayImage {
    let (width, height) = image.dimensions();
    let mut out = GrayImage::new(width, height);

    for y in 0..height {
        let y0 = y.saturating_sub(1);
        for x in 0..width {
            let x0 = x.saturating_sub(1);
            let max = image.get_pixel(x, y)[0]
                .max(image.get_pixel(x0, y)[0])
                .max(image.get_pixel(x, y0)[0])
                .max(image.get_pixel(x0, y0)[0]);
            out.put_pixel(x, y, Luma([max]));
        }
    }
    out
}

/// Morphological opening: erosion followed by dilation.
pub fn open_2x2(image: &GrayImage) -> GrayImage {
    dilate_2x2(&erode_2x2(image))
}
