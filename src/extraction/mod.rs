//! Schema-constrained text-to-structured-data extraction.
//!
//! Two interchangeable remote backends implement the same capability
//! interface; the pipeline depends only on [`crate::core::traits::StructuredExtractor`].
//! A response that does not parse as a single JSON object is terminal;
//! there is no field-by-field salvage.

pub mod googleai;
pub mod huggingface;
pub mod prompt;
pub mod schema;

pub use googleai::GoogleAiExtractor;
pub use huggingface::HuggingFaceExtractor;
pub use schema::{ExtractionSchema, FieldKind, FieldSpec, RECEIPT_SCHEMA};

use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::traits::RawFieldMap;

/// Parses a backend's generated text as a single JSON object.
///
/// # Errors
///
/// Returns `PipelineError::Extraction` if the text is not valid JSON or is
/// valid JSON of any shape other than an object.
pub(crate) fn parse_field_object(text: &str) -> PipelineResult<RawFieldMap> {
    let value: serde_json::Value = serde_json::from_str(text)
        .map_err(|e| PipelineError::extraction("response text is not valid JSON", e))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(PipelineError::extraction_msg(format!(
            "expected a JSON object, got {}",
            json_shape(&other)
        ))),
    }
}

fn json_shape(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
