//! Startup configuration for the pipeline and its collaborators.
//!
//! Configuration is constructed once at startup, validated, and passed by
//! value into component constructors. Components never reach into ambient
//! global state. The `from_env` constructors mirror the environment keys the
//! deployment environment provides; a missing key is a hard error naming the
//! key.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::errors::{PipelineError, PipelineResult};

/// Default request timeout for the remote extraction service.
const DEFAULT_EXTRACTION_TIMEOUT_SECS: u64 = 30;

/// Configuration for the local text recognition engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecognizerConfig {
    /// Engine binary to spawn per run.
    pub binary: String,
    /// Recognition language passed to the engine.
    pub language: String,
}

impl Default for RecognizerConfig {
    fn default() -> Self {
        Self {
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
        }
    }
}

impl RecognizerConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the binary name or language is empty.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.binary.is_empty() {
            return Err(PipelineError::config("recognizer binary must not be empty"));
        }
        if self.language.is_empty() {
            return Err(PipelineError::config(
                "recognizer language must not be empty",
            ));
        }
        Ok(())
    }
}

/// Configuration for a remote extraction backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// Service base URL, without a trailing slash.
    pub base_url: String,
    /// Model identifier appended to the request path.
    pub model: String,
    /// API token; sent as a query key or bearer header depending on backend.
    pub api_token: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_EXTRACTION_TIMEOUT_SECS
}

impl ExtractorConfig {
    /// Creates a validated configuration.
    ///
    /// The base URL is normalized by trimming a trailing slash.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the URL or model is empty.
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_token: impl Into<String>,
    ) -> PipelineResult<Self> {
        let config = Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_token: api_token.into(),
            timeout_secs: DEFAULT_EXTRACTION_TIMEOUT_SECS,
        };
        config.validate()?;
        Ok(config)
    }

    /// Loads the Google AI backend configuration from the environment.
    ///
    /// Reads `GOOGLE_AI_API_URL`, `GOOGLE_AI_API_MODEL` and
    /// `GOOGLE_AI_API_TOKEN`.
    pub fn google_from_env() -> PipelineResult<Self> {
        Self::new(
            require_env("GOOGLE_AI_API_URL")?,
            require_env("GOOGLE_AI_API_MODEL")?,
            require_env("GOOGLE_AI_API_TOKEN")?,
        )
    }

    /// Loads the Hugging Face backend configuration from the environment.
    ///
    /// Reads `HUGGINGFACE_API_URL`, `HUGGINGFACE_API_MODEL` and
    /// `HUGGINGFACE_API_TOKEN`.
    pub fn huggingface_from_env() -> PipelineResult<Self> {
        Self::new(
            require_env("HUGGINGFACE_API_URL")?,
            require_env("HUGGINGFACE_API_MODEL")?,
            require_env("HUGGINGFACE_API_TOKEN")?,
        )
    }

    /// Validates the configuration.
    pub fn validate(&self) -> PipelineResult<()> {
        if self.base_url.is_empty() {
            return Err(PipelineError::config("extractor base URL must not be empty"));
        }
        if self.model.is_empty() {
            return Err(PipelineError::config("extractor model must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(PipelineError::config("extractor timeout must be positive"));
        }
        Ok(())
    }

    /// Request timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Aggregate startup configuration for one pipeline instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Local recognition engine settings.
    pub recognizer: RecognizerConfig,
    /// Remote extraction backend settings.
    pub extractor: ExtractorConfig,
}

impl PipelineConfig {
    /// Validates all component configurations.
    pub fn validate(&self) -> PipelineResult<()> {
        self.recognizer.validate()?;
        self.extractor.validate()
    }
}

fn require_env(key: &str) -> PipelineResult<String> {
    std::env::var(key).map_err(|_| PipelineError::config(format!("KEY {key} IS MISSING")))
}
