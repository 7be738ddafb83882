//! Retrieval engine: transcript → index, query → top-k chunks.
//!
//! Ties the chunker, embedder and vector index together. One
//! [`TranscriptIndex`] is one generation: building a new one fully replaces
//! the previous chunks and vectors, never merges with them.

use crate::chunking::{Chunk, SentenceChunker};
use crate::embedding::Embedder;
use crate::error::{HarkError, Result};
use crate::index::VectorIndex;
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// A built semantic index over one transcript.
///
/// Invariant: `index.len() == chunks.len()`, and slot N of the index holds
/// the embedding of chunk N. The mapping is positional, not by stored ID.
#[derive(Debug)]
pub struct TranscriptIndex {
    chunks: Vec<Chunk>,
    index: VectorIndex,
}

impl TranscriptIndex {
    /// The ordered chunk sequence this index was built from.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Number of indexed chunks.
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Whether the index holds no chunks. Never true for an index produced
    /// by [`RetrievalEngine::build_index`].
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}

/// Orchestrates chunking, embedding and nearest-neighbor search.
pub struct RetrievalEngine {
    embedder: Arc<dyn Embedder>,
}

impl RetrievalEngine {
    /// Create a retrieval engine around an embedder.
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self { embedder }
    }

    /// Build a fresh index from a transcript.
    ///
    /// Fails with [`HarkError::EmptyTranscript`] if chunking produces no
    /// chunks; no index is created in that case.
    #[instrument(skip(self, transcript), fields(transcript_len = transcript.len()))]
    pub async fn build_index(&self, transcript: &str) -> Result<TranscriptIndex> {
        let chunks = SentenceChunker::split(transcript);
        if chunks.is_empty() {
            return Err(HarkError::EmptyTranscript);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        if vectors.len() != chunks.len() {
            return Err(HarkError::Embedding(format!(
                "Embedder returned {} vectors for {} chunks",
                vectors.len(),
                chunks.len()
            )));
        }

        let mut index = VectorIndex::new(self.embedder.dimensions());
        index.reset();
        index.add_all(vectors)?;

        info!("Built index with {} chunks", chunks.len());
        Ok(TranscriptIndex { chunks, index })
    }

    /// Return the texts of the `k` chunks most relevant to `query`,
    /// ascending by distance.
    #[instrument(skip(self, index, query))]
    pub async fn top_k(
        &self,
        index: &TranscriptIndex,
        query: &str,
        k: usize,
    ) -> Result<Vec<String>> {
        let query_embedding = self.embedder.embed(query).await?;
        let hits = index.index.search(&query_embedding, k)?;

        debug!("Retrieved {} chunks for query", hits.len());
        Ok(hits
            .into_iter()
            .map(|hit| index.chunks[hit.slot].text.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::embedding::HashEmbedder;

    fn engine() -> RetrievalEngine {
        RetrievalEngine::new(Arc::new(HashEmbedder::new(128)))
    }

    #[tokio::test]
    async fn test_build_index_counts_match_sentences() {
        let built = engine()
            .build_index("The cat sat. The dog ran. Birds flew south.")
            .await
            .unwrap();
        assert_eq!(built.len(), 3);
        assert_eq!(built.index.len(), built.chunks().len());
    }

    #[tokio::test]
    async fn test_empty_transcript_is_rejected() {
        let err = engine().build_index("").await.unwrap_err();
        assert!(matches!(err, HarkError::EmptyTranscript));
    }

    #[tokio::test]
    async fn test_rebuild_is_idempotent() {
        let e = engine();
        let transcript = "The cat sat. The dog ran. Birds flew south.";
        let first = e.build_index(transcript).await.unwrap();
        let second = e.build_index(transcript).await.unwrap();
        assert_eq!(first.len(), second.len());
        assert_eq!(first.chunks(), second.chunks());
    }

    #[tokio::test]
    async fn test_top_k_retrieves_relevant_chunk() {
        let e = engine();
        let built = e
            .build_index("The cat sat. The dog ran. Birds flew south.")
            .await
            .unwrap();
        let top = e.top_k(&built, "Where did the dog go?", 1).await.unwrap();
        assert_eq!(top.len(), 1);
        assert!(top[0].contains("dog ran"));
    }

    #[tokio::test]
    async fn test_query_identical_to_chunk_is_top_hit() {
        let e = engine();
        let built = e
            .build_index("The cat sat. The dog ran. Birds flew south.")
            .await
            .unwrap();
        let top = e.top_k(&built, "The dog ran", 1).await.unwrap();
        assert_eq!(top[0], "The dog ran");
    }

    #[tokio::test]
    async fn test_top_k_larger_than_index_returns_all_chunks() {
        let e = engine();
        let built = e.build_index("One. Two. Three.").await.unwrap();
        let top = e.top_k(&built, "two", 10).await.unwrap();
        assert_eq!(top.len(), 3);
    }

    #[tokio::test]
    async fn test_top_k_is_deterministic() {
        let e = engine();
        let built = e
            .build_index("The cat sat. The dog ran. Birds flew south.")
            .await
            .unwrap();
        let first = e.top_k(&built, "cat", 3).await.unwrap();
        let second = e.top_k(&built, "cat", 3).await.unwrap();
        assert_eq!(first, second);
    }
}
