//! Pipeline orchestrator for Hark.
//!
//! Owns the current transcript generation and coordinates transcription,
//! index building, retrieval and answer generation. Build-vs-search access
//! is serialized here: a rebuild replaces the generation atomically under a
//! write lock, so a concurrent question never observes a half-built index.

use crate::config::{EmbeddingProvider, Settings};
use crate::embedding::{Embedder, HashEmbedder, RemoteEmbedder};
use crate::error::{HarkError, Result};
use crate::inference::RemoteClient;
use crate::qa::{build_context, Answerer, LexicalQa};
use crate::retrieval::{RetrievalEngine, TranscriptIndex};
use crate::transcription::{Transcriber, WhisperCli};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};

/// One build cycle: a transcript and the index derived from it. A new
/// transcription fully supersedes the previous generation.
struct Generation {
    transcript: String,
    index: TranscriptIndex,
}

/// The main orchestrator for the Hark pipeline.
pub struct Orchestrator {
    settings: Settings,
    transcriber: Transcriber,
    answerer: Answerer,
    retrieval: RetrievalEngine,
    generation: RwLock<Option<Generation>>,
}

impl Orchestrator {
    /// Create an orchestrator wired from settings.
    pub fn new(settings: Settings) -> Result<Self> {
        let remote = Arc::new(RemoteClient::new(&settings.remote)?);

        let embedder: Arc<dyn Embedder> = match settings.embedding.provider {
            EmbeddingProvider::Remote => Arc::new(RemoteEmbedder::with_config(
                &settings.remote,
                &settings.embedding,
            )?),
            EmbeddingProvider::Hash => {
                Arc::new(HashEmbedder::new(settings.embedding.dimensions as usize))
            }
        };

        let transcriber = Transcriber::new(remote.clone(), Arc::new(WhisperCli::new(&settings.local)));
        let answerer = Answerer::new(remote, Arc::new(LexicalQa::new()));

        Ok(Self {
            settings,
            transcriber,
            answerer,
            retrieval: RetrievalEngine::new(embedder),
            generation: RwLock::new(None),
        })
    }

    /// Create an orchestrator with custom components.
    pub fn with_components(
        settings: Settings,
        transcriber: Transcriber,
        answerer: Answerer,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        Self {
            settings,
            transcriber,
            answerer,
            retrieval: RetrievalEngine::new(embedder),
            generation: RwLock::new(None),
        }
    }

    /// Transcribe an audio file and build the semantic index over it.
    ///
    /// Returns the transcript. On success the previous generation is fully
    /// replaced; on any failure it is left intact.
    #[instrument(skip(self), fields(audio_path = %audio_path.display()))]
    pub async fn transcribe(&self, audio_path: &Path) -> Result<String> {
        let transcript = self.transcriber.transcribe(audio_path).await?;
        let index = self.retrieval.build_index(&transcript).await?;

        // Swap in the new generation only once it is fully built.
        let mut generation = self.generation.write().await;
        *generation = Some(Generation {
            transcript: transcript.clone(),
            index,
        });
        drop(generation);

        info!("Transcription indexed ({} chars)", transcript.len());
        Ok(transcript)
    }

    /// Answer a question against the current generation.
    ///
    /// Fails with [`HarkError::IndexNotBuilt`] if no transcription has
    /// succeeded yet in this process.
    #[instrument(skip(self))]
    pub async fn ask(&self, question: &str, k: Option<usize>) -> Result<String> {
        let k = k.unwrap_or(self.settings.retrieval.top_k);

        let chunks = {
            let generation = self.generation.read().await;
            let generation = generation.as_ref().ok_or(HarkError::IndexNotBuilt)?;
            self.retrieval.top_k(&generation.index, question, k).await?
        };

        let context = build_context(&chunks);
        self.answerer.answer(question, &context).await
    }

    /// The current generation's transcript, if any transcription has run.
    pub async fn transcript(&self) -> Option<String> {
        self.generation
            .read()
            .await
            .as_ref()
            .map(|g| g.transcript.clone())
    }

    /// Number of chunks in the current generation's index.
    pub async fn chunk_count(&self) -> usize {
        self.generation
            .read()
            .await
            .as_ref()
            .map(|g| g.index.len())
            .unwrap_or(0)
    }
}
