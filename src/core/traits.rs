//! Port traits at the pipeline's collaborator boundaries.
//!
//! The pipeline never depends on a concrete recognition engine or extraction
//! backend. It sequences two capabilities: turning an optimized image into
//! raw text, and turning raw text plus a schema into a raw field map. Both
//! are terminal on failure; operational retry belongs to the caller, not
//! here.

use async_trait::async_trait;

use crate::core::errors::PipelineResult;
use crate::extraction::schema::ExtractionSchema;

/// Field values as returned by an extraction backend, keyed by schema field
/// name, not yet validated against the domain model.
pub type RawFieldMap = serde_json::Map<String, serde_json::Value>;

/// A text recognition engine consuming PNG-encoded image bytes.
///
/// An empty string result is success: absence of recognizable text is a
/// legitimate outcome that propagates downstream.
pub trait TextRecognizer: Send + Sync {
    /// Extracts raw text from the given PNG-encoded image bytes.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Recognition` if the engine cannot be invoked
    /// or reports a failure.
    fn recognize(&self, png_bytes: &[u8]) -> PipelineResult<String>;
}

/// A remote service turning free text into schema-shaped field values.
///
/// Implementations transmit the schema alongside the text to constrain the
/// response shape, and must treat a response that does not parse as a single
/// JSON object as a terminal failure. There is no field-by-field salvage.
#[async_trait]
pub trait StructuredExtractor: Send + Sync {
    /// Extracts a raw field map from `text`, constrained by `schema`.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::Extraction` if the service is unreachable,
    /// answers with a non-success status, or its payload cannot be parsed
    /// as an object conforming to the schema.
    async fn extract(&self, text: &str, schema: &ExtractionSchema) -> PipelineResult<RawFieldMap>;
}
