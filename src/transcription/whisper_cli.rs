//! Local Whisper transcription via an external binary.

use super::SpeechToText;
use crate::config::LocalModelSettings;
use crate::error::{HarkError, Result};
use async_trait::async_trait;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Local speech-to-text fallback driving a `whisper` binary.
///
/// Runs the tool against the audio file with plain-text output into a
/// temporary directory, then reads the `.txt` it writes.
pub struct WhisperCli {
    binary: String,
    model: String,
}

impl WhisperCli {
    /// Create a local transcriber from settings.
    pub fn new(settings: &LocalModelSettings) -> Self {
        Self {
            binary: settings.whisper_bin.clone(),
            model: settings.whisper_model.clone(),
        }
    }
}

#[async_trait]
impl SpeechToText for WhisperCli {
    #[instrument(skip(self), fields(audio_path = %audio_path.display(), model = %self.model))]
    async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let output_dir = tempfile::tempdir()?;

        debug!("Running local whisper transcription");

        let result = Command::new(&self.binary)
            .arg(audio_path)
            .arg("--model").arg(&self.model)
            .arg("--output_format").arg("txt")
            .arg("--output_dir").arg(output_dir.path())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await;

        let output = match result {
            Ok(o) => o,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(HarkError::ToolNotFound(self.binary.clone()));
            }
            Err(e) => {
                return Err(HarkError::ToolFailed(format!(
                    "{} execution failed: {e}",
                    self.binary
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(HarkError::ToolFailed(format!(
                "{} failed: {stderr}",
                self.binary
            )));
        }

        let stem = audio_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| HarkError::InvalidInput("Audio path has no file name".to_string()))?;
        let transcript_path = output_dir.path().join(format!("{stem}.txt"));

        let transcript = tokio::fs::read_to_string(&transcript_path)
            .await
            .map_err(|e| {
                HarkError::ToolFailed(format!(
                    "{} produced no transcript at {}: {e}",
                    self.binary,
                    transcript_path.display()
                ))
            })?;

        Ok(transcript.trim().to_string())
    }
}
