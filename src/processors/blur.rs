//! Smoothing passes applied around binarization.
//!
//! A small Gaussian ahead of thresholding suppresses sensor and compression
//! noise; a median pass afterwards removes residual speckle while keeping
//! character edges crisp, which a mean filter would not.

use image::GrayImage;
use imageproc::filter::{median_filter, separable_filter_equal};

use crate::core::constants::{GAUSSIAN_KERNEL_3, MEDIAN_WINDOW};

/// Applies the fixed 3x3 Gaussian smoothing kernel.
pub fn gaussian_smooth(image: &GrayImage) -> GrayImage {
    separable_filter_equal(image, &GAUSSIAN_KERNEL_3)
}

/// Applies the final 3x3 median denoise pass.
pub fn median_denoise(image: &GrayImage) -> GrayImage {
    let radius = MEDIAN_WINDOW / 2;
    median_filter(image, radius, radius)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn gaussian_preserves_uniform_regions() {
        let img = GrayImage::from_pixel(16, 16, Luma([200u8]));
        let out = gaussian_smooth(&img);
        assert_eq!(out.dimensions(), (16, 16));
        // Interior pixels of a flat image stay flat.
        assert_eq!(out.get_pixel(8, 8)[0], 200);
    }

    #[test]
    fn gaussian_spreads_an_impulse() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([0u8]));
        img.put_pixel(4, 4, Luma([255u8]));
        let out = gaussian_smooth(&img);
        assert!(out.get_pixel(4, 4)[0] < 255);
        assert!(out.get_pixel(3, 4)[0] > 0);
    }

    #[test]
    fn median_removes_single_outlier() {
        let mut img = GrayImage::from_pixel(9, 9, Luma([255u8]));
        img.put_pixel(4, 4, Luma([0u8]));
        let out = median_denoise(&img);
        assert_eq!(out.get_pixel(4, 4)[0], 255);
    }

    #[test]
    fn median_keeps_solid_blocks() {
        let mut img = GrayImage::from_pixel(12, 12, Luma([0u8]));
        for y in 3..9 {
            for x in 3..9 {
                img.put_pixel(x, y, Luma([255u8]));
            }
        }
        let out = median_denoise(&img);
        assert_eq!(out.get_pixel(5, 5)[0], 255);
        assert_eq!(out.get_pixel(1, 1)[0], 0);
    }
}
