//! # Receipt OCR
//!
//! A Rust library that extracts structured transaction data from photographed
//! or scanned payment receipts. Raw image bytes go in; a validated
//! [`ReceiptTransaction`](domain::ReceiptTransaction) comes out.
//!
//! ## Pipeline
//!
//! Each request flows through a fixed, linear sequence:
//!
//! 1. **Preprocess**: decode, bounded downscale, grayscale, Gaussian blur,
//!    adaptive mean threshold, morphological opening, median denoise, PNG
//!    re-encode.
//! 2. **Recognize**: the optimized image is handed to a text recognition
//!    engine (Tesseract by default).
//! 3. **Extract**: the raw text plus a fixed field schema go to a remote
//!    extraction service, which returns schema-shaped field values.
//! 4. **Assemble**: field values are strictly mapped onto the receipt
//!    record, defaults filled in for anything missing.
//!
//! The first failing stage ends the run with its own error kind; nothing is
//! retried inside the library.
//!
//! ## Modules
//!
//! * [`core`] - Error taxonomy, configuration, and port traits
//! * [`processors`] - Pure image preprocessing transforms
//! * [`recognition`] - Tesseract-backed recognition engine adapter
//! * [`extraction`] - Field schema and remote extraction backends
//! * [`domain`] - The receipt record, assembler, and field rules
//! * [`pipeline`] - The per-request orchestrator
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use receipt_ocr::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let recognizer = TesseractRecognizer::new(RecognizerConfig::default())?;
//! let extractor = GoogleAiExtractor::new(ExtractorConfig::google_from_env()?)?;
//! let pipeline = RecognitionPipeline::new(Arc::new(recognizer), Arc::new(extractor));
//!
//! let bytes = std::fs::read("receipt.jpg")?;
//! let receipt = pipeline
//!     .run(RawImage::new(bytes, ".jpg"), &CancelToken::new())
//!     .await?;
//! println!("{} {}", receipt.amount, receipt.currency);
//! # Ok(())
//! # }
//! ```

pub mod core;
pub mod domain;
pub mod extraction;
pub mod pipeline;
pub mod processors;
pub mod recognition;

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::core::config::{ExtractorConfig, PipelineConfig, RecognizerConfig};
    pub use crate::core::errors::{PipelineError, PipelineResult, PipelineStage};
    pub use crate::core::traits::{RawFieldMap, StructuredExtractor, TextRecognizer};
    pub use crate::domain::receipt::{ReceiptAssembler, ReceiptTransaction};
    pub use crate::extraction::schema::{ExtractionSchema, FieldKind, FieldSpec, RECEIPT_SCHEMA};
    pub use crate::extraction::{GoogleAiExtractor, HuggingFaceExtractor};
    pub use crate::pipeline::{CancelToken, RawImage, RecognitionPipeline};
    pub use crate::processors::ImageOptimizer;
    pub use crate::recognition::TesseractRecognizer;
}
