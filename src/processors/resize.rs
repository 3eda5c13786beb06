//! Bounded downscaling for oversized input rasters.
//!
//! Recognition latency and memory grow with raster area while text legibility
//! does not, so inputs whose longer side exceeds a limit are scaled down to
//! that limit with linear interpolation. Smaller inputs pass through
//! untouched.

use image::imageops::FilterType;
use image::DynamicImage;

use crate::core::constants::MAX_SIDE_LEN;

/// Downscales a raster so its longer side does not exceed a fixed limit.
#[derive(Debug, Clone, Copy)]
pub struct LimitSideResize {
    /// Maximum allowed side length in pixels.
    pub max_side: u32,
}

impl Default for LimitSideResize {
    fn default() -> Self {
        Self {
            max_side: MAX_SIDE_LEN,
        }
    }
}

impl LimitSideResize {
    /// Creates a resizer with the given side limit.
    pub fn new(max_side: u32) -> Self {
        Self { max_side }
    }

    /// Returns true if the raster exceeds the limit in either dimension.
    pub fn needs_resize(&self, width: u32, height: u32) -> bool {
        width > self.max_side || height > self.max_side
    }

    /// Computes the output dimensions for an input raster.
    ///
    /// The longer side becomes exactly the limit; the shorter side is scaled
    /// by the same factor, truncated, and kept at least 1 px.
    pub fn target_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        if !self.needs_resize(width, height) {
            return (width, height);
        }

        let scale = f64::from(self.max_side);
        if width > height {
            let new_height = (f64::from(height) * (scale / f64::from(width))) as u32;
            (self.max_side, new_height.max(1))
        } else {
            let new_width = (f64::from(width) * (scale / f64::from(height))) as u32;
            (new_width.max(1), self.max_side)
        }
    }

    /// Applies the downscale, returning the input unchanged when it already
    /// fits within the limit.
    pub fn apply(&self, image: DynamicImage) -> DynamicImage {
        let (width, height) = (image.width(), image.height());
        if !self.needs_resize(width, height) {
            return image;
        }

        let (new_width, new_height) = self.target_dimensions(width, height);
        image.resize_exact(new_width, new_height, FilterType::Triangle)
    }
}
