//! Hugging Face inference API extraction backend.
//!
//! This backend has no response-schema support, so the schema is inlined
//! into the prompt as a default-valued JSON template and the reply is
//! cleaned up before parsing: text generation models like to wrap their
//! output in markdown fences.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::config::ExtractorConfig;
use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::traits::{RawFieldMap, StructuredExtractor};
use crate::extraction::parse_field_object;
use crate::extraction::prompt::extraction_prompt_with_template;
use crate::extraction::schema::ExtractionSchema;

#[derive(Debug, Deserialize)]
struct Generation {
    #[serde(default)]
    generated_text: String,
}

/// [`StructuredExtractor`] backed by the Hugging Face inference API.
#[derive(Debug, Clone)]
pub struct HuggingFaceExtractor {
    config: ExtractorConfig,
    http: Client,
}

impl HuggingFaceExtractor {
    /// Creates an extractor with a dedicated HTTP client honoring the
    /// configured timeout.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid config, or an extraction
    /// error if the HTTP client cannot be built.
    pub fn new(config: ExtractorConfig) -> PipelineResult<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| PipelineError::extraction("failed to build HTTP client", e))?;
        Ok(Self { config, http })
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}", self.config.base_url, self.config.model)
    }
}

/// Strips whitespace and markdown fences from a generated payload.
fn clean_generated_text(text: &str) -> &str {
    text.trim().trim_matches('`').trim()
}

/// Pulls the first non-empty generation out of the response array.
fn first_generation(generations: Vec<Generation>) -> PipelineResult<String> {
    generations
        .into_iter()
        .map(|generation| generation.generated_text)
        .find(|text| !text.is_empty())
        .ok_or_else(|| PipelineError::extraction_msg("empty response from extraction service"))
}

#[async_trait]
impl StructuredExtractor for HuggingFaceExtractor {
    async fn extract(&self, text: &str, schema: &ExtractionSchema) -> PipelineResult<RawFieldMap> {
        let prompt = extraction_prompt_with_template(text, schema);

        let response = self
            .http
            .post(self.request_url())
            .bearer_auth(&self.config.api_token)
            .header("Content-Type", "application/json")
            .json(&json!({ "inputs": prompt }))
            .send()
            .await
            .map_err(|e| PipelineError::extraction("request to extraction service failed", e))?;

        let status = response.status();
        let payload = response
            .text()
            .await
            .map_err(|e| PipelineError::extraction("failed to read extraction response", e))?;

        if !status.is_success() {
            return Err(PipelineError::extraction_msg(format!(
                "extraction service returned status {status}: {payload}"
            )));
        }
        debug!(model = %self.config.model, bytes = payload.len(), "extraction response received");

        let generations: Vec<Generation> = serde_json::from_str(&payload)
            .map_err(|e| PipelineError::extraction("failed to parse response envelope", e))?;
        let generated = first_generation(generations)?;
        parse_field_object(clean_generated_text(&generated))
    }
}
