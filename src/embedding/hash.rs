//! Deterministic feature-hashing embedder.
//!
//! Local, offline embedding provider: tokens are hashed into a fixed number
//! of buckets and the resulting count vector is L2-normalized. Not as strong
//! as a learned model, but bit-for-bit deterministic and dependency-free,
//! which makes it the offline provider and the test double of choice.

use super::Embedder;
use crate::error::{HarkError, Result};
use async_trait::async_trait;

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// Feature-hashing embedder with a fixed output dimensionality.
pub struct HashEmbedder {
    dimensions: usize,
}

impl HashEmbedder {
    /// Create a hash embedder producing vectors of the given dimensionality.
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    fn embed_one(&self, text: &str) -> Vec<f32> {
        let mut buckets = vec![0.0f32; self.dimensions];

        for token in tokenize(text) {
            let bucket = (fnv1a(token.as_bytes()) % self.dimensions as u64) as usize;
            buckets[bucket] += 1.0;
        }

        let norm = buckets.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut buckets {
                *value /= norm;
            }
        }

        buckets
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        if self.dimensions == 0 {
            return Err(HarkError::Embedding(
                "Embedding dimensionality must be non-zero".to_string(),
            ));
        }
        Ok(self.embed_one(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut embeddings = Vec::with_capacity(texts.len());
        for text in texts {
            embeddings.push(self.embed(text).await?);
        }
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Lowercase alphanumeric word tokenization.
fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::euclidean_distance;

    #[tokio::test]
    async fn test_fixed_dimensionality() {
        let embedder = HashEmbedder::new(64);
        let vector = embedder.embed("hello world").await.unwrap();
        assert_eq!(vector.len(), 64);
        assert_eq!(embedder.dimensions(), 64);
    }

    #[tokio::test]
    async fn test_deterministic_across_calls_and_batches() {
        let embedder = HashEmbedder::new(32);
        let single = embedder.embed("the dog ran").await.unwrap();
        let batch = embedder
            .embed_batch(&["unrelated".to_string(), "the dog ran".to_string()])
            .await
            .unwrap();
        assert_eq!(single, batch[1]);
    }

    #[tokio::test]
    async fn test_identical_text_has_zero_distance() {
        let embedder = HashEmbedder::new(32);
        let a = embedder.embed("Birds flew south.").await.unwrap();
        let b = embedder.embed("Birds flew south.").await.unwrap();
        assert!(euclidean_distance(&a, &b) < 1e-6);
    }

    #[tokio::test]
    async fn test_vectors_are_normalized() {
        let embedder = HashEmbedder::new(32);
        let vector = embedder.embed("some words to hash").await.unwrap();
        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_overlapping_text_is_closer_than_disjoint() {
        let embedder = HashEmbedder::new(128);
        let query = embedder.embed("Where did the dog go?").await.unwrap();
        let dog = embedder.embed("The dog ran").await.unwrap();
        let birds = embedder.embed("Birds flew south.").await.unwrap();
        assert!(euclidean_distance(&query, &dog) < euclidean_distance(&query, &birds));
    }
}
