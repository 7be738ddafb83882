//! Question answering over retrieved context.
//!
//! The [`Answerer`] mirrors the transcriber: the remote QA endpoint is tried
//! first, and any remote failure is recovered by a local extractive model.

mod extractive;

pub use extractive::LexicalQa;

use crate::error::Result;
use crate::inference::{call_with_fallback, RemoteClient};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::instrument;

/// Local question-answering model, treated as a black box.
#[async_trait]
pub trait QaModel: Send + Sync {
    /// Answer a question given a context passage.
    async fn answer(&self, question: &str, context: &str) -> Result<String>;
}

/// Join retrieved chunk texts into one answer context.
///
/// The context is ephemeral: constructed per question and discarded once the
/// answer is produced.
pub fn build_context(chunks: &[String]) -> String {
    chunks.join(" ")
}

/// Remote-first answer generator with a local fallback.
pub struct Answerer {
    remote: Arc<RemoteClient>,
    local: Arc<dyn QaModel>,
}

impl Answerer {
    /// Create an answerer from a remote client and a local model.
    pub fn new(remote: Arc<RemoteClient>, local: Arc<dyn QaModel>) -> Self {
        Self { remote, local }
    }

    /// Generate an answer from a question and its retrieved context.
    #[instrument(skip(self, context), fields(context_len = context.len()))]
    pub async fn answer(&self, question: &str, context: &str) -> Result<String> {
        call_with_fallback(
            "answer generation",
            self.remote.answer(context, question),
            self.local.answer(question, context),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_context_joins_with_space() {
        let chunks = vec!["The dog ran".to_string(), "The cat sat".to_string()];
        assert_eq!(build_context(&chunks), "The dog ran The cat sat");
    }

    #[test]
    fn test_build_context_of_nothing_is_empty() {
        assert_eq!(build_context(&[]), "");
    }
}
