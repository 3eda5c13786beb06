//! Adaptive mean binarization.
//!
//! Receipts are frequently photographed under uneven lighting, so a global
//! cutoff misclassifies whole regions. The cutoff here is computed per pixel
//! from the mean of a square neighborhood (clamped at the raster borders)
//! minus a constant offset, via an integral image so the cost is independent
//! of the block size.

use image::{GrayImage, Luma};

use crate::core::constants::{THRESHOLD_BLOCK_SIZE, THRESHOLD_OFFSET};
use crate::core::errors::{PipelineError, PipelineResult};

/// Binarizes a grayscale raster against local neighborhood means.
///
/// Output pixels are 255 where the input exceeds its local threshold and 0
/// otherwise.
#[derive(Debug, Clone, Copy)]
pub struct AdaptiveMeanThreshold {
    /// Side length of the square neighborhood. Must be odd and at least 3.
    pub block_size: u32,
    /// Constant subtracted from the neighborhood mean.
    pub offset: i32,
}

impl Default for AdaptiveMeanThreshold {
    fn default() -> Self {
        Self {
            block_size: THRESHOLD_BLOCK_SIZE,
            offset: THRESHOLD_OFFSET,
        }
    }
}

impl AdaptiveMeanThreshold {
    /// Creates a threshold with the given neighborhood size and offset.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if `block_size` is even or below 3.
    pub fn new(block_size: u32, offset: i32) -> PipelineResult<Self> {
        if block_size < 3 || block_size % 2 == 0 {
            return Err(PipelineError::config(format!(
                "threshold block size must be odd and >= 3, got {block_size}"
            )));
        }
        Ok(Self { block_size, offset })
    }

    /// Applies the threshold to a grayscale raster.
    pub fn apply(&self, image: &GrayImage) -> GrayImage {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return image.clone();
        }

        let integral = integral_image(image);
        let stride = (width + 1) as usize;
        let radius = self.block_size / 2;

        let mut out = GrayImage::new(width, height);
        for y in 0..height {
            let y0 = y.saturating_sub(radius);
            let y1 = (y + radius).min(height - 1);
            for x in 0..width {
                let x0 = x.saturating_sub(radius);
                let x1 = (x + radius).min(width - 1);

                let count = u64::from(x1 - x0 + 1) * u64::from(y1 - y0 + 1);
                let sum = integral[(y1 as usize + 1) * stride + x1 as usize + 1]
                    + integral[y0 as usize * stride + x0 as usize]
                    - integral[y0 as usize * stride + x1 as usize + 1]
                    - integral[(y1 as usize + 1) * stride + x0 as usize];

                let mean = ((sum + count / 2) / count) as i32;
                let value = if i32::from(image.get_pixel(x, y)[0]) > mean - self.offset {
                    255
                } else {
                    0
                };
                out.put_pixel(x, y, Luma([value]));
            }
        }
        out
    }
}

/// Builds a summed-area table with a zero first row and column, so any
/// rectangle sum is four lookups.
fn integral_image(image: &GrayImage) -> Vec<u64> {
    let (width, height) = image.dimensions();
    let stride = (width + 1) as usize;
    let mut integral = vec![0u64; stride * (height + 1) as usize];

    for y in 0..height as usize {
        let mut row_sum = 0u64;
        for x in 0..width as usize {
            row_sum += u64::from(image.get_pixel(x as u32, y as u32)[0]);
            integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
        }
    }
    integral
}
