//! Resilient inference execution.
//!
//! Both transcription and answer generation follow the same two-path
//! strategy: attempt the remote inference API first, and on any failure run
//! a local model instead. The primary is never retried and remote health is
//! never cached across calls; every invocation independently tries the
//! remote path first.

mod remote;

pub use remote::RemoteClient;

use crate::error::{HarkError, Result};
use std::future::Future;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure of a primary remote inference call.
///
/// These are never surfaced to callers; they only decide whether the local
/// fallback runs. Enumerating the conditions keeps the fallback trigger
/// explicit instead of swallowing arbitrary errors.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    #[error("remote API credentials are not configured")]
    MissingCredentials,
}

/// Run `primary`, falling back to `fallback` on any remote failure.
///
/// On primary success the result is returned unchanged. On primary failure
/// the reason is logged and the fallback runs unconditionally; its outcome,
/// success or failure, is final. A failed fallback surfaces as
/// [`HarkError::LocalInference`] — there is no further recovery.
pub async fn call_with_fallback<T, P, F>(operation: &str, primary: P, fallback: F) -> Result<T>
where
    P: Future<Output = std::result::Result<T, RemoteError>>,
    F: Future<Output = Result<T>>,
{
    match primary.await {
        Ok(value) => {
            debug!("{} completed via remote API", operation);
            Ok(value)
        }
        Err(reason) => {
            warn!(
                "{} remote call failed ({}); falling back to local inference",
                operation, reason
            );
            fallback.await.map_err(|e| {
                HarkError::LocalInference(format!("{} fallback failed: {}", operation, e))
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_primary_success_is_returned_unchanged() {
        let result = call_with_fallback(
            "test",
            async { Ok::<_, RemoteError>("remote".to_string()) },
            async { Ok("local".to_string()) },
        )
        .await
        .unwrap();
        assert_eq!(result, "remote");
    }

    #[tokio::test]
    async fn test_primary_failure_runs_fallback() {
        let result = call_with_fallback(
            "test",
            async { Err::<String, _>(RemoteError::MissingCredentials) },
            async { Ok("local".to_string()) },
        )
        .await
        .unwrap();
        assert_eq!(result, "local");
    }

    #[tokio::test]
    async fn test_primary_status_failure_never_propagates() {
        let result = call_with_fallback(
            "test",
            async {
                Err::<String, _>(RemoteError::Status {
                    status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
                    body: "boom".to_string(),
                })
            },
            async { Ok("recovered".to_string()) },
        )
        .await;
        assert_eq!(result.unwrap(), "recovered");
    }

    #[tokio::test]
    async fn test_fallback_failure_is_local_inference_error() {
        let result = call_with_fallback(
            "test",
            async { Err::<String, _>(RemoteError::MissingCredentials) },
            async { Err(HarkError::ToolNotFound("whisper".to_string())) },
        )
        .await;
        assert!(matches!(result, Err(HarkError::LocalInference(_))));
    }
}
