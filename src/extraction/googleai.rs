//! Google AI `generateContent` extraction backend.
//!
//! The schema travels as a `responseSchema` in the generation config, so the
//! service itself constrains its output shape. The reply nests the payload
//! two levels deep: the first candidate's first part carries the JSON text.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::core::config::ExtractorConfig;
use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::traits::{RawFieldMap, StructuredExtractor};
use crate::extraction::parse_field_object;
use crate::extraction::prompt::extraction_prompt;
use crate::extraction::schema::ExtractionSchema;

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
struct ContentPart {
    #[serde(default)]
    text: String,
}

/// [`StructuredExtractor`] backed by the Google AI generation API.
#[derive(Debug, Clone)]
pub struct GoogleAiExtractor {
    config: ExtractorConfig,
    http: Client,
}

impl GoogleAiExtractor {
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
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_token
        )
    }

    fn request_body(prompt: &str, schema: &ExtractionSchema) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema.response_schema(),
            },
        })
    }
}

/// Unwraps the generated JSON text from the response envelope.
fn first_candidate_text(response: GenerateContentResponse) -> PipelineResult<String> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content.parts.into_iter().next())
        .map(|part| part.text)
        .filter(|text| !text.is_empty())
        .ok_or_else(|| PipelineError::extraction_msg("no valid content found in response"))
}

#[async_trait]
impl StructuredExtractor for GoogleAiExtractor {
    async fn extract(&self, text: &str, schema: &ExtractionSchema) -> PipelineResult<RawFieldMap> {
        let prompt = extraction_prompt(text);
        let body = Self::request_body(&prompt, schema);

        let response = self
            .http
            .post(self.request_url())
            .header("Content-Type", "application/json")
            .json(&body)
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

        let envelope: GenerateContentResponse = serde_json::from_str(&payload)
            .map_err(|e| PipelineError::extraction("failed to parse response envelope", e))?;
        let inner = first_candidate_text(envelope)?;
        parse_field_object(&inner)
    }
}
