//! HTTP API server for integration with other systems.
//!
//! Thin glue over the orchestrator: upload audio to build the index, then
//! ask questions against it. Concurrency between builds and questions is
//! serialized inside the orchestrator.

use crate::cli::Output;
use crate::config::Settings;
use crate::error::HarkError;
use crate::orchestrator::Orchestrator;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
    settings: Settings,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    let orchestrator = Orchestrator::new(settings.clone())?;

    let state = Arc::new(AppState {
        orchestrator,
        settings,
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/transcribe", post(transcribe))
        .route("/ask", post(ask))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Hark API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Transcribe", "POST /transcribe");
    Output::kv("Ask", "POST /ask");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Serialize)]
struct TranscribeResponse {
    transcript: String,
}

#[derive(Deserialize)]
struct AskRequest {
    question: String,
    /// Number of transcript chunks to retrieve (defaults from config).
    #[serde(default)]
    k: Option<usize>,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(err: HarkError) -> axum::response::Response {
    let status = match err {
        HarkError::IndexNotBuilt => StatusCode::BAD_REQUEST,
        HarkError::EmptyTranscript | HarkError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("Request failed: {}", err);
    (
        status,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn transcribe(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> axum::response::Response {
    // Save the uploaded file into the temp dir, then run the pipeline on it.
    let temp_dir = state.settings.temp_dir();
    if let Err(e) = tokio::fs::create_dir_all(&temp_dir).await {
        return error_response(e.into());
    }

    let mut saved = None;
    loop {
        match multipart.next_field().await {
            Ok(Some(field)) if field.name() == Some("file") => {
                let file_name = field
                    .file_name()
                    .map(sanitize_file_name)
                    .unwrap_or_else(|| "upload.mp3".to_string());
                let bytes = match field.bytes().await {
                    Ok(b) => b,
                    Err(e) => {
                        return error_response(HarkError::InvalidInput(format!(
                            "Failed to read upload: {}",
                            e
                        )))
                    }
                };
                let path = temp_dir.join(file_name);
                if let Err(e) = tokio::fs::write(&path, &bytes).await {
                    return error_response(e.into());
                }
                saved = Some(path);
            }
            Ok(Some(_)) => continue,
            Ok(None) => break,
            Err(e) => {
                return error_response(HarkError::InvalidInput(format!(
                    "Malformed multipart body: {}",
                    e
                )))
            }
        }
    }

    let Some(path) = saved else {
        return error_response(HarkError::InvalidInput(
            "Missing 'file' field in upload".to_string(),
        ));
    };

    let result = state.orchestrator.transcribe(&path).await;
    let _ = tokio::fs::remove_file(&path).await;

    match result {
        Ok(transcript) => Json(TranscribeResponse { transcript }).into_response(),
        Err(e) => error_response(e),
    }
}

async fn ask(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AskRequest>,
) -> axum::response::Response {
    match state.orchestrator.ask(&req.question, req.k).await {
        Ok(answer) => Json(AskResponse { answer }).into_response(),
        Err(e) => error_response(e),
    }
}

/// Strip any path components from a client-supplied file name.
fn sanitize_file_name(name: &str) -> String {
    let base = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(name)
        .trim()
        .to_string();
    if base.is_empty() {
        "upload.mp3".to_string()
    } else {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name_strips_paths() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\temp\\a.mp3"), "a.mp3");
        assert_eq!(sanitize_file_name("meeting.wav"), "meeting.wav");
        assert_eq!(sanitize_file_name(""), "upload.mp3");
    }
}
