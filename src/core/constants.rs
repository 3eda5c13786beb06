//! Fixed parameters of the preprocessing transform sequence.
//!
//! These values were tuned for photographed payment receipts; changing them
//! shifts the balance between noise suppression and character stroke
//! preservation.

/// Longest side above which an input raster is downscaled before any other
/// transform runs.
pub const MAX_SIDE_LEN: u32 = 2000;

/// Separable 3x3 binomial smoothing kernel, normalized to 1.
///
/// A larger kernel would start to blur character strokes.
pub const GAUSSIAN_KERNEL_3: [f32; 3] = [0.25, 0.5, 0.25];

/// Neighborhood side length used by the adaptive mean threshold. Must be odd.
pub const THRESHOLD_BLOCK_SIZE: u32 = 11;

/// Constant subtracted from the neighborhood mean before comparison.
pub const THRESHOLD_OFFSET: i32 = 2;

/// Window side length of the final median denoise pass.
pub const MEDIAN_WINDOW: u32 = 3;
