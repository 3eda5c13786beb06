//! End-to-end pipeline scenarios over in-crate fake collaborators.
//!
//! No network and no recognition engine: the fakes implement the port traits
//! directly, so these tests exercise exactly the orchestration, the
//! preprocessing, and the assembly.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use image::codecs::png::PngEncoder;
use image::{Rgb, RgbImage};
use serde_json::json;

use receipt_ocr::prelude::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([235, 235, 235]));
    let mut out = Vec::new();
    img.write_with_encoder(PngEncoder::new(&mut out)).unwrap();
    out
}

fn field_map(value: serde_json::Value) -> RawFieldMap {
    value.as_object().unwrap().clone()
}

/// Recognizer returning a fixed text, recording the dimensions of the PNG it
/// was handed.
struct FakeRecognizer {
    text: String,
    seen_dimensions: Mutex<Option<(u32, u32)>>,
}

impl FakeRecognizer {
    fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            seen_dimensions: Mutex::new(None),
        }
    }
}

impl TextRecognizer for FakeRecognizer {
    fn recognize(&self, png_bytes: &[u8]) -> PipelineResult<String> {
        let img = image::load_from_memory(png_bytes).expect("pipeline must hand over a valid PNG");
        *self.seen_dimensions.lock().unwrap() = Some((img.width(), img.height()));
        Ok(self.text.clone())
    }
}

/// Recognizer that flips a cancel token while running, simulating a client
/// disconnect mid-pipeline.
struct CancellingRecognizer {
    token: CancelToken,
}

impl TextRecognizer for CancellingRecognizer {
    fn recognize(&self, _png_bytes: &[u8]) -> PipelineResult<String> {
        self.token.cancel();
        Ok("some text".to_string())
    }
}

struct FailingRecognizer;

impl TextRecognizer for FailingRecognizer {
    fn recognize(&self, _png_bytes: &[u8]) -> PipelineResult<String> {
        Err(PipelineError::recognition_msg("engine exited with code 1"))
    }
}

/// Extractor returning a fixed field map, recording the text it received.
struct FakeExtractor {
    fields: RawFieldMap,
    called: AtomicBool,
    last_text: Mutex<Option<String>>,
}

impl FakeExtractor {
    fn new(fields: RawFieldMap) -> Self {
        Self {
            fields,
            called: AtomicBool::new(false),
            last_text: Mutex::new(None),
        }
    }
}

#[async_trait]
impl StructuredExtractor for FakeExtractor {
    async fn extract(&self, text: &str, _schema: &ExtractionSchema) -> PipelineResult<RawFieldMap> {
        self.called.store(true, Ordering::SeqCst);
        *self.last_text.lock().unwrap() = Some(text.to_string());
        Ok(self.fields.clone())
    }
}

struct FailingExtractor;

#[async_trait]
impl StructuredExtractor for FailingExtractor {
    async fn extract(
        &self,
        _text: &str,
        _schema: &ExtractionSchema,
    ) -> PipelineResult<RawFieldMap> {
        Err(PipelineError::extraction_msg(
            "extraction service returned status 503 Service Unavailable",
        ))
    }
}

#[tokio::test]
async fn clean_receipt_assembles_with_defaults_for_the_rest() {
    let recognizer = Arc::new(FakeRecognizer::new("Total: 45.50 USD, Bank: ABC, Ref: 12345"));
    let extractor = Arc::new(FakeExtractor::new(field_map(json!({
        "amount": 45.5,
        "currency": "USD",
        "bank_name": "ABC",
        "reference": "12345",
    }))));
    let pipeline = RecognitionPipeline::new(recognizer.clone(), extractor.clone());

    let receipt = pipeline
        .run(RawImage::new(png_bytes(800, 600), ".png"), &CancelToken::new())
        .await
        .unwrap();

    assert_eq!(receipt.amount, 45.5);
    assert_eq!(receipt.currency, "USD");
    assert_eq!(receipt.bank_name, "ABC");
    assert_eq!(receipt.reference, "12345");
    assert_eq!(receipt.transaction_id, "");
    assert_eq!(receipt.sender_name, "");
    assert_eq!(receipt.fee, 0.0);

    // The extractor saw the recognized text verbatim.
    assert_eq!(
        extractor.last_text.lock().unwrap().as_deref(),
        Some("Total: 45.50 USD, Bank: ABC, Ref: 12345")
    );
    // An 800x600 input must reach recognition at its original size.
    assert_eq!(
        *recognizer.seen_dimensions.lock().unwrap(),
        Some((800, 600))
    );
}

#[tokio::test]
async fn oversized_image_is_downscaled_before_recognition() {
    let recognizer = Arc::new(FakeRecognizer::new(""));
    let extractor = Arc::new(FakeExtractor::new(RawFieldMap::new()));
    let pipeline = RecognitionPipeline::new(recognizer.clone(), extractor);

    pipeline
        .run(
            RawImage::new(png_bytes(3000, 4000), ".jpg"),
            &CancelToken::new(),
        )
        .await
        .unwrap();

    let (width, height) = recognizer.seen_dimensions.lock().unwrap().unwrap();
    assert_eq!(width.max(height), 2000);
    assert_eq!((width, height), (1500, 2000));
}

#[tokio::test]
async fn empty_recognized_text_still_produces_a_record() {
    let recognizer = Arc::new(FakeRecognizer::new(""));
    let extractor = Arc::new(FakeExtractor::new(RawFieldMap::new()));
    let pipeline = RecognitionPipeline::new(recognizer, extractor.clone());

    let receipt = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &CancelToken::new())
        .await
        .unwrap();

    // Empty text is valid: extraction still runs and the record is fully
    // defaulted, not an error.
    assert!(extractor.called.load(Ordering::SeqCst));
    assert_eq!(extractor.last_text.lock().unwrap().as_deref(), Some(""));
    assert_eq!(receipt, ReceiptTransaction::default());
}

#[tokio::test]
async fn extraction_failure_yields_no_partial_record() {
    let pipeline = RecognitionPipeline::new(
        Arc::new(FakeRecognizer::new("Total: 12.00")),
        Arc::new(FailingExtractor),
    );

    let err = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &CancelToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Extraction { .. }));
}

#[tokio::test]
async fn recognition_failure_short_circuits_extraction() {
    let extractor = Arc::new(FakeExtractor::new(RawFieldMap::new()));
    let pipeline = RecognitionPipeline::new(Arc::new(FailingRecognizer), extractor.clone());

    let err = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &CancelToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Recognition { .. }));
    assert!(!extractor.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn wrong_typed_field_is_an_assembly_error() {
    let extractor = Arc::new(FakeExtractor::new(field_map(json!({
        "amount": "45.50"
    }))));
    let pipeline = RecognitionPipeline::new(Arc::new(FakeRecognizer::new("x")), extractor);

    let err = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &CancelToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Assembly { .. }));
}

#[tokio::test]
async fn garbage_bytes_fail_with_decode_error() {
    let pipeline = RecognitionPipeline::new(
        Arc::new(FakeRecognizer::new("x")),
        Arc::new(FakeExtractor::new(RawFieldMap::new())),
    );

    let err = pipeline
        .run(
            RawImage::new(b"definitely not an image".to_vec(), ".jpg"),
            &CancelToken::new(),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Decode { .. }));
}

#[tokio::test]
async fn pre_cancelled_token_aborts_immediately() {
    let extractor = Arc::new(FakeExtractor::new(RawFieldMap::new()));
    let pipeline = RecognitionPipeline::new(Arc::new(FakeRecognizer::new("x")), extractor.clone());

    let token = CancelToken::new();
    token.cancel();
    let err = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &token)
        .await
        .unwrap_err();

    assert!(matches!(err, PipelineError::Canceled { .. }));
    assert!(!extractor.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn cancellation_mid_run_stops_at_the_next_stage_boundary() {
    let token = CancelToken::new();
    let extractor = Arc::new(FakeExtractor::new(RawFieldMap::new()));
    let pipeline = RecognitionPipeline::new(
        Arc::new(CancellingRecognizer {
            token: token.clone(),
        }),
        extractor.clone(),
    );

    let err = pipeline
        .run(RawImage::new(png_bytes(200, 100), ".png"), &token)
        .await
        .unwrap_err();

    // Recognition completed, but the run aborted before extraction started.
    assert!(matches!(
        err,
        PipelineError::Canceled {
            stage: PipelineStage::Recognized
        }
    ));
    assert!(!extractor.called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn concurrent_runs_are_independent() {
    let pipeline = Arc::new(RecognitionPipeline::new(
        Arc::new(FakeRecognizer::new("Total: 5.00")),
        Arc::new(FakeExtractor::new(field_map(json!({ "amount": 5.0 })))),
    ));

    let mut handles = Vec::new();
    for _ in 0..4 {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            pipeline
                .run(RawImage::new(png_bytes(300, 200), ".png"), &CancelToken::new())
                .await
        }));
    }
    for handle in handles {
        let receipt = handle.await.unwrap().unwrap();
        assert_eq!(receipt.amount, 5.0);
    }
}
