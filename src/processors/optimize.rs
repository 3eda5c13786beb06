//! The full preprocessing transform sequence, raw bytes in, PNG bytes out.
//!
//! The sequence is fixed: decode, bounded downscale, grayscale collapse,
//! Gaussian smoothing, adaptive mean threshold, 2x2 opening, median denoise,
//! lossless PNG re-encode. Each intermediate raster is owned by this
//! function and dropped as soon as the next transform has consumed it, on
//! every exit path. The optimizer holds no per-request state and is safe to
//! share across concurrent runs.

use image::codecs::png::PngEncoder;
use image::GrayImage;
use tracing::debug;

use crate::core::errors::{PipelineError, PipelineResult};
use crate::processors::blur::{gaussian_smooth, median_denoise};
use crate::processors::morphology::open_2x2;
use crate::processors::resize::LimitSideResize;
use crate::processors::threshold::AdaptiveMeanThreshold;

/// Turns raw receipt image bytes into a recognition-ready binary PNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageOptimizer {
    resize: LimitSideResize,
    threshold: AdaptiveMeanThreshold,
}

impl ImageOptimizer {
    /// Creates an optimizer with the fixed receipt preprocessing parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs the transform sequence on raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Decode` if the bytes are empty, are not a
    /// supported raster format, decode to an empty raster, or the final
    /// re-encode fails.
    pub fn optimize(&self, raw_bytes: &[u8]) -> PipelineResult<Vec<u8>> {
        if raw_bytes.is_empty() {
            return Err(PipelineError::decode_msg("input byte sequence is empty"));
        }

        let decoded = image::load_from_memory(raw_bytes)
            .map_err(|e| PipelineError::decode("unable to decode image from bytes", e))?;
        if decoded.width() == 0 || decoded.height() == 0 {
            return Err(PipelineError::decode_msg("decoded image is empty"));
        }

        let (input_width, input_height) = (decoded.width(), decoded.height());
        let resized = self.resize.apply(decoded);
        debug!(
            input_width,
            input_height,
            width = resized.width(),
            height = resized.height(),
            "raster decoded"
        );

        let gray = resized.to_luma8();
        drop(resized);

        let blurred = gaussian_smooth(&gray);
        drop(gray);

        let binary = self.threshold.apply(&blurred);
        drop(blurred);

        let opened = open_2x2(&binary);
        drop(binary);

        let denoised = median_denoise(&opened);
        drop(opened);

        encode_png(&denoised)
    }
}

/// Re-encodes the final raster losslessly, so no compression artifacts are
/// reintroduced before recognition.
fn encode_png(image: &GrayImage) -> PipelineResult<Vec<u8>> {
    let mut out = Vec::new();
    image
        .write_with_encoder(PngEncoder::new(&mut out))
        .map_err(|e| PipelineError::decode("re-encode of processed raster failed", e))?;
    Ok(out)
}
