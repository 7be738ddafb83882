//! Remote inference API client.
//!
//! Speaks the bearer-authenticated transcription and question-answering
//! endpoints. Every method returns [`RemoteError`] on failure so the caller
//! can decide fallback; nothing here retries.

use super::RemoteError;
use crate::config::RemoteSettings;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

/// Client for the remote transcription and QA endpoints.
pub struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct QaRequest<'a> {
    context: &'a str,
    question: &'a str,
}

#[derive(Deserialize)]
struct TranscribeResponse {
    transcript: String,
}

#[derive(Deserialize)]
struct QaResponse {
    answer: String,
}

impl RemoteClient {
    /// Create a client from remote settings. The request timeout bounds the
    /// primary attempt so an unresponsive endpoint cannot hang the pipeline;
    /// the fallback handles the rest.
    pub fn new(settings: &RemoteSettings) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .build()?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    fn api_key(&self) -> std::result::Result<&str, RemoteError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .ok_or(RemoteError::MissingCredentials)
    }

    /// Transcribe audio remotely: multipart `POST {base_url}/transcribe`,
    /// expecting `{"transcript": "..."}` on HTTP 200.
    #[instrument(skip(self, audio), fields(file_name = %file_name, bytes = audio.len()))]
    pub async fn transcribe(
        &self,
        file_name: &str,
        audio: Vec<u8>,
    ) -> std::result::Result<String, RemoteError> {
        let api_key = self.api_key()?;

        let part = reqwest::multipart::Part::bytes(audio).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(format!("{}/transcribe", self.base_url))
            .bearer_auth(api_key)
            .multipart(form)
            .send()
            .await?;

        let payload: TranscribeResponse = parse_success(response).await?;
        debug!("Remote transcription returned {} chars", payload.transcript.len());
        Ok(payload.transcript)
    }

    /// Answer a question remotely: JSON `POST {base_url}/qa` with
    /// `{"context", "question"}`, expecting `{"answer": "..."}` on HTTP 200.
    #[instrument(skip(self, context, question))]
    pub async fn answer(
        &self,
        context: &str,
        question: &str,
    ) -> std::result::Result<String, RemoteError> {
        let api_key = self.api_key()?;

        let response = self
            .http
            .post(format!("{}/qa", self.base_url))
            .bearer_auth(api_key)
            .json(&QaRequest { context, question })
            .send()
            .await?;

        let payload: QaResponse = parse_success(response).await?;
        Ok(payload.answer)
    }
}

/// Treat anything other than HTTP 200 with a well-formed body as a failure.
async fn parse_success<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> std::result::Result<T, RemoteError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(RemoteError::Status {
            status,
            body: body.chars().take(200).collect(),
        });
    }

    serde_json::from_str(&body).map_err(|e| RemoteError::MalformedPayload(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_is_a_remote_error() {
        let settings = RemoteSettings {
            api_key: None,
            ..RemoteSettings::default()
        };
        let client = RemoteClient::new(&settings).unwrap();
        assert!(matches!(
            client.api_key(),
            Err(RemoteError::MissingCredentials)
        ));
    }

    #[test]
    fn test_empty_key_is_a_remote_error() {
        let settings = RemoteSettings {
            api_key: Some(String::new()),
            ..RemoteSettings::default()
        };
        let client = RemoteClient::new(&settings).unwrap();
        assert!(matches!(
            client.api_key(),
            Err(RemoteError::MissingCredentials)
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let settings = RemoteSettings {
            api_base_url: "https://api.example.com/v1/".to_string(),
            ..RemoteSettings::default()
        };
        let client = RemoteClient::new(&settings).unwrap();
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }
}
