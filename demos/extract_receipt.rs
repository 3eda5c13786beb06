//! Runs the full receipt pipeline on an image file.
//!
//! Requires a `tesseract` binary on the PATH and the `GOOGLE_AI_API_URL`,
//! `GOOGLE_AI_API_MODEL` and `GOOGLE_AI_API_TOKEN` environment variables.
//!
//! ```bash
//! cargo run --example extract_receipt -- receipt.jpg
//! ```

use std::path::Path;
use std::sync::Arc;

use receipt_ocr::prelude::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: extract_receipt <image-file>")?;
    let bytes = std::fs::read(&path)?;
    let extension = Path::new(&path)
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let recognizer = TesseractRecognizer::new(RecognizerConfig::default())?;
    let extractor = GoogleAiExtractor::new(ExtractorConfig::google_from_env()?)?;
    let pipeline = RecognitionPipeline::new(Arc::new(recognizer), Arc::new(extractor));

    let receipt = pipeline
        .run(RawImage::new(bytes, extension), &CancelToken::new())
        .await?;
    println!("{}", serde_json::to_string_pretty(&receipt)?);
    Ok(())
}
