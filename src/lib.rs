//! Hark - Audio Question Answering
//!
//! Transcribe an audio recording, index the transcript for semantic lookup,
//! and answer natural-language questions about its content.
//!
//! # Overview
//!
//! Hark runs a retrieval-augmented answering pipeline:
//! - Transcribe audio to text (remote API first, local Whisper fallback)
//! - Split the transcript into sentence chunks and embed them
//! - Retrieve the most relevant chunks for a question by nearest-neighbor
//!   search and generate an answer from them (remote API first, local
//!   extractive fallback)
//!
//! The index lives in memory and is rebuilt in full on each transcription;
//! one transcript at a time, nothing is persisted.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `chunking` - Sentence-boundary transcript chunking
//! - `embedding` - Embedding generation
//! - `index` - In-memory flat L2 vector index
//! - `retrieval` - Index building and top-k retrieval
//! - `inference` - Remote-first, local-fallback call pattern
//! - `transcription` - Speech-to-text transcription
//! - `qa` - Answer generation over retrieved context
//! - `orchestrator` - Pipeline coordination and generation ownership
//!
//! # Example
//!
//! ```rust,no_run
//! use hark::config::Settings;
//! use hark::orchestrator::Orchestrator;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let orchestrator = Orchestrator::new(settings)?;
//!
//!     let transcript = orchestrator.transcribe("meeting.mp3".as_ref()).await?;
//!     println!("Transcribed {} chars", transcript.len());
//!
//!     let answer = orchestrator.ask("What was decided?", None).await?;
//!     println!("{}", answer);
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod cli;
pub mod config;
pub mod embedding;
pub mod error;
pub mod index;
pub mod inference;
pub mod orchestrator;
pub mod qa;
pub mod retrieval;
pub mod transcription;

pub use error::{HarkError, Result};
