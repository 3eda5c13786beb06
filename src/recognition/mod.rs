//! Tesseract-backed text recognition.
//!
//! The engine is an external process, spawned once per run: the child is the
//! scoped native resource, acquired at invocation and released on every exit
//! path. Nothing is shared between in-flight runs, so cross-request engine
//! state cannot leak.

use std::io::Write;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::core::config::RecognizerConfig;
use crate::core::errors::{PipelineError, PipelineResult};
use crate::core::traits::TextRecognizer;

/// [`TextRecognizer`] that pipes PNG bytes through the `tesseract` binary.
#[derive(Debug, Clone)]
pub struct TesseractRecognizer {
    config: RecognizerConfig,
}

impl TesseractRecognizer {
    /// Creates a recognizer for the configured binary and language.
    ///
    /// Construction is cheap; the engine process is spawned per run.
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid config.
    pub fn new(config: RecognizerConfig) -> PipelineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize(&self, png_bytes: &[u8]) -> PipelineResult<String> {
        let mut child = Command::new(&self.config.binary)
            .arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.config.language)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                PipelineError::recognition(
                    format!("failed to start recognition engine `{}`", self.config.binary),
                    e,
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Err(e) = stdin.write_all(png_bytes) {
                // The child must not outlive this run.
                let _ = child.kill();
                let _ = child.wait();
                return Err(PipelineError::recognition(
                    "failed to pipe image to recognition engine",
                    e,
                ));
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| PipelineError::recognition("failed to wait for recognition engine", e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::recognition_msg(format!(
                "recognition engine exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!(chars = text.len(), "recognition engine returned");
        Ok(text)
    }
}
