//! Core building blocks: error taxonomy, configuration, port traits, and the
//! fixed preprocessing parameters.

pub mod config;
pub mod constants;
pub mod errors;
pub mod traits;

pub use config::{ExtractorConfig, PipelineConfig, RecognizerConfig};
pub use errors::{PipelineError, PipelineResult, PipelineStage};
pub use traits::{RawFieldMap, StructuredExtractor, TextRecognizer};
