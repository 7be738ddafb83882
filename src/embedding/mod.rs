//! Embedding generation for semantic retrieval.
//!
//! The embedder has no fallback of its own: if the configured model is
//! unavailable the call fails fatally, unlike the transcription and answer
//! paths which recover via local inference.

mod hash;
mod remote;

pub use hash::HashEmbedder;
pub use remote::RemoteEmbedder;

use crate::error::Result;
use async_trait::async_trait;

/// Trait for embedding generation.
///
/// Implementations must be deterministic for a fixed model configuration:
/// the same text produces the same vector regardless of call order or batch
/// size, and every vector has exactly `dimensions()` components.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a single text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts, order-preserving.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Get the embedding dimensions.
    fn dimensions(&self) -> usize;
}
