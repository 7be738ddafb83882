//! Speech-to-text transcription.
//!
//! The [`Transcriber`] pairs the remote transcription endpoint with a local
//! speech-to-text model through the resilient call pattern: remote first,
//! local on any remote failure, no retry.

mod whisper_cli;

pub use whisper_cli::WhisperCli;

use crate::error::{HarkError, Result};
use crate::inference::{call_with_fallback, RemoteClient};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// Local speech-to-text model, treated as a black box.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Transcribe an audio file to plain text.
    async fn transcribe(&self, audio_path: &Path) -> Result<String>;
}

/// Remote-first transcriber with a local fallback.
pub struct Transcriber {
    remote: Arc<RemoteClient>,
    local: Arc<dyn SpeechToText>,
}

impl Transcriber {
    /// Create a transcriber from a remote client and a local model.
    pub fn new(remote: Arc<RemoteClient>, local: Arc<dyn SpeechToText>) -> Self {
        Self { remote, local }
    }

    /// Transcribe an audio file.
    ///
    /// The audio is read up front: an unreadable input file is a caller
    /// error and propagates directly, it does not trigger the fallback.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let audio = tokio::fs::read(audio_path).await?;
        let file_name = audio_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("audio.mp3")
            .to_string();

        let transcript = call_with_fallback(
            "transcription",
            self.remote.transcribe(&file_name, audio),
            self.local.transcribe(audio_path),
        )
        .await?;

        if transcript.trim().is_empty() {
            return Err(HarkError::EmptyTranscript);
        }

        Ok(transcript)
    }
}
