//! Remote embedding API implementation.

use super::Embedder;
use crate::config::{EmbeddingSettings, RemoteSettings};
use crate::error::{HarkError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Embedder backed by the remote inference API.
///
/// Sends `POST {base_url}/embeddings` with a batch of input texts and expects
/// one vector per text, in input order. There is no local fallback: any
/// transport or payload failure is fatal for the call.
pub struct RemoteEmbedder {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
    dimensions: usize,
}

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embeddings: Vec<Vec<f32>>,
}

impl RemoteEmbedder {
    /// Create a remote embedder from settings.
    pub fn with_config(remote: &RemoteSettings, embedding: &EmbeddingSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(remote.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: remote.api_base_url.trim_end_matches('/').to_string(),
            api_key: remote.api_key.clone(),
            model: embedding.model.clone(),
            dimensions: embedding.dimensions as usize,
        })
    }

    async fn embed_slice(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            HarkError::Config("Remote embedding requires an API key; run 'hark config set-key'".to_string())
        })?;

        let response = self
            .http
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(api_key)
            .json(&EmbeddingRequest {
                model: &self.model,
                input: texts,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(HarkError::Embedding(format!(
                "Embedding API returned {}: {}",
                status,
                body.chars().take(200).collect::<String>()
            )));
        }

        let payload: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| HarkError::Embedding(format!("Malformed embedding response: {}", e)))?;

        if payload.embeddings.len() != texts.len() {
            return Err(HarkError::Embedding(format!(
                "Embedding API returned {} vectors for {} inputs",
                payload.embeddings.len(),
                texts.len()
            )));
        }

        for vector in &payload.embeddings {
            if vector.len() != self.dimensions {
                return Err(HarkError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                });
            }
        }

        Ok(payload.embeddings)
    }
}

#[async_trait]
impl Embedder for RemoteEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| HarkError::Embedding("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        // The API caps batch sizes, process in slices
        const BATCH_SIZE: usize = 64;
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for slice in texts.chunks(BATCH_SIZE) {
            all_embeddings.extend(self.embed_slice(slice).await?);
        }

        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedder_creation() {
        let remote = RemoteSettings::default();
        let embedding = EmbeddingSettings::default();
        let embedder = RemoteEmbedder::with_config(&remote, &embedding).unwrap();
        assert_eq!(embedder.dimensions(), embedding.dimensions as usize);
    }
}
