//! The receipt recognition orchestrator.
//!
//! One pipeline run is a strictly linear sequence: preprocess, recognize,
//! extract, assemble. The first failing stage ends the run; nothing is
//! retried here. Runs share no mutable state, so a single pipeline value can
//! drive any number of concurrent requests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use tokio::task;
use tracing::{debug, info, warn};

use crate::core::config::PipelineConfig;
use crate::core::errors::{PipelineError, PipelineResult, PipelineStage};
use crate::core::traits::{StructuredExtractor, TextRecognizer};
use crate::domain::receipt::{ReceiptAssembler, ReceiptTransaction};
use crate::extraction::schema::RECEIPT_SCHEMA;
use crate::extraction::GoogleAiExtractor;
use crate::processors::ImageOptimizer;
use crate::recognition::TesseractRecognizer;

/// Raw image bytes as handed over by the transport layer.
///
/// The calling layer has already enforced upload size and extension policy;
/// the pipeline only keeps the declared extension for diagnostics and fails
/// with a decode error if the bytes turn out malformed anyway. The value is
/// owned by exactly one run and dropped when it completes.
#[derive(Debug, Clone)]
pub struct RawImage {
    /// The uploaded bytes, unvalidated.
    pub bytes: Vec<u8>,
    /// Declared file extension, e.g. `.jpg`.
    pub extension: String,
}

impl RawImage {
    /// Wraps uploaded bytes with their declared extension.
    pub fn new(bytes: Vec<u8>, extension: impl Into<String>) -> Self {
        Self {
            bytes,
            extension: extension.into(),
        }
    }
}

/// Cooperative cancellation handle for one pipeline run.
///
/// The run consults the token at every stage boundary and aborts with
/// [`PipelineError::Canceled`] instead of starting the next stage. Dropping
/// the run future cancels outright; the token exists for callers that keep
/// the future alive but want the work abandoned (a disconnected client).
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Sequences preprocessing, recognition, extraction, and assembly for one
/// request at a time.
pub struct RecognitionPipeline {
    optimizer: ImageOptimizer,
    recognizer: Arc<dyn TextRecognizer>,
    extractor: Arc<dyn StructuredExtractor>,
}

impl RecognitionPipeline {
    /// Creates a pipeline over the given collaborators.
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        extractor: Arc<dyn StructuredExtractor>,
    ) -> Self {
        Self {
            optimizer: ImageOptimizer::new(),
            recognizer,
            extractor,
        }
    }

    /// Creates a pipeline with the default collaborators: a Tesseract
    /// recognizer and the Google AI extraction backend.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if either component config is invalid.
    pub fn from_config(config: PipelineConfig) -> PipelineResult<Self> {
        let recognizer = TesseractRecognizer::new(config.recognizer)?;
        let extractor = GoogleAiExtractor::new(config.extractor)?;
        Ok(Self::new(Arc::new(recognizer), Arc::new(extractor)))
    }

    /// Runs the full pipeline on one image.
    ///
    /// CPU-bound stages run on the blocking pool so the async runtime stays
    /// responsive; every intermediate buffer is owned by the run and released
    /// on success, failure, and cancellation alike.
    ///
    /// # Errors
    ///
    /// Returns the failing stage's error kind: `Decode` for undecodable
    /// input, `Recognition` for engine failures, `Extraction` for remote
    /// service failures, `Assembly` for schema-nonconforming field values,
    /// and `Canceled` when the token was set at a stage boundary.
    pub async fn run(
        &self,
        image: RawImage,
        cancel: &CancelToken,
    ) -> PipelineResult<ReceiptTransaction> {
        let started = Instant::now();
        ensure_active(cancel, PipelineStage::Received)?;

        let RawImage { bytes, extension } = image;
        debug!(
            stage = %PipelineStage::Received,
            size = bytes.len(),
            %extension,
            "pipeline run started"
        );

        let optimizer = self.optimizer;
        let optimized = task::spawn_blocking(move || optimizer.optimize(&bytes))
            .await
            .map_err(|e| PipelineError::decode("preprocessing task failed", e))??;
        debug!(
            stage = %PipelineStage::Preprocessed,
            png_bytes = optimized.len(),
            "image optimized"
        );
        ensure_active(cancel, PipelineStage::Preprocessed)?;

        let recognizer = Arc::clone(&self.recognizer);
        let text = task::spawn_blocking(move || recognizer.recognize(&optimized))
            .await
            .map_err(|e| PipelineError::recognition("recognition task failed", e))??;
        if text.trim().is_empty() {
            // Valid but unhelpful; extraction proceeds with empty input.
            warn!("recognition engine found no text");
        }
        debug!(stage = %PipelineStage::Recognized, chars = text.len(), "text recognized");
        ensure_active(cancel, PipelineStage::Recognized)?;

        let raw_fields = self.extractor.extract(&text, &RECEIPT_SCHEMA).await?;
        debug!(
            stage = %PipelineStage::Extracted,
            fields = raw_fields.len(),
            "raw fields extracted"
        );
        ensure_active(cancel, PipelineStage::Extracted)?;

        let receipt = ReceiptAssembler::assemble(&raw_fields)?;
        info!(
            stage = %PipelineStage::Completed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "receipt assembled"
        );
        Ok(receipt)
    }
}

fn ensure_active(cancel: &CancelToken, stage: PipelineStage) -> PipelineResult<()> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Canceled { stage });
    }
    Ok(())
}
