//! Error types for the receipt recognition pipeline.
//!
//! Every stage of the pipeline fails with its own error kind so that callers
//! can tell a bad input image apart from a misbehaving dependency. All kinds
//! are terminal for the current request; nothing in this crate retries.

use thiserror::Error;

/// Stages of a single pipeline run.
///
/// The run moves through these states in order and transitions to a failure
/// on the first stage that errors. Stage names appear in log events and in
/// cancellation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Raw image bytes accepted, nothing done yet.
    Received,
    /// Image bytes decoded into a raster.
    Decoded,
    /// Preprocessing transforms applied, PNG re-encoded.
    Preprocessed,
    /// Recognition engine produced raw text.
    Recognized,
    /// Remote extraction produced a raw field map.
    Extracted,
    /// Field map assembled into a receipt record.
    Assembled,
    /// Run finished successfully.
    Completed,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStage::Received => write!(f, "received"),
            PipelineStage::Decoded => write!(f, "decoded"),
            PipelineStage::Preprocessed => write!(f, "preprocessed"),
            PipelineStage::Recognized => write!(f, "recognized"),
            PipelineStage::Extracted => write!(f, "extracted"),
            PipelineStage::Assembled => write!(f, "assembled"),
            PipelineStage::Completed => write!(f, "completed"),
        }
    }
}

/// Errors produced by the receipt recognition pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input bytes could not be decoded into a non-empty raster.
    #[error("image decode failed: {message}")]
    Decode {
        /// What went wrong while decoding.
        message: String,
        /// The underlying decoder error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The recognition engine could not be invoked or reported a failure.
    #[error("text recognition failed: {message}")]
    Recognition {
        /// What went wrong while recognizing.
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The remote extraction service was unreachable, returned a non-success
    /// status, or produced a payload that does not parse against the schema.
    #[error("structured extraction failed: {message}")]
    Extraction {
        /// What went wrong while extracting.
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A raw field value did not conform to the kind the schema declares.
    #[error("assembly failed for field `{field}`: expected {expected}, got {actual}")]
    Assembly {
        /// Name of the offending schema field.
        field: String,
        /// Kind the schema declares for the field.
        expected: String,
        /// Description of the value actually present.
        actual: String,
    },

    /// Startup configuration is missing or invalid.
    #[error("configuration: {message}")]
    Config {
        /// A message describing the configuration problem.
        message: String,
    },

    /// The caller cancelled the run; aborted before the next stage started.
    #[error("run cancelled after stage `{stage}`")]
    Canceled {
        /// The last stage that completed before cancellation was observed.
        stage: PipelineStage,
    },
}

impl PipelineError {
    /// Creates a decode error with an underlying cause.
    pub fn decode(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PipelineError::Decode {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a decode error without an underlying cause.
    pub fn decode_msg(message: impl Into<String>) -> Self {
        PipelineError::Decode {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a recognition error with an underlying cause.
    pub fn recognition(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PipelineError::Recognition {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates a recognition error without an underlying cause.
    pub fn recognition_msg(message: impl Into<String>) -> Self {
        PipelineError::Recognition {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an extraction error with an underlying cause.
    pub fn extraction(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PipelineError::Extraction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Creates an extraction error without an underlying cause.
    pub fn extraction_msg(message: impl Into<String>) -> Self {
        PipelineError::Extraction {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an assembly error for a field whose value has the wrong kind.
    pub fn assembly(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        PipelineError::Assembly {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        PipelineError::Config {
            message: message.into(),
        }
    }
}

/// Convenient result alias for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
