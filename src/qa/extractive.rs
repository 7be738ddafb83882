//! Local extractive question answering.

use super::QaModel;
use crate::chunking::SentenceChunker;
use crate::error::{HarkError, Result};
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::debug;

/// Lexical-overlap extractive QA model.
///
/// Stands in for a learned extractive model when the remote endpoint is
/// unavailable: the answer is the context sentence sharing the most tokens
/// with the question. Ties go to the earliest sentence, which keeps the
/// output deterministic.
pub struct LexicalQa;

impl LexicalQa {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LexicalQa {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QaModel for LexicalQa {
    async fn answer(&self, question: &str, context: &str) -> Result<String> {
        let sentences = SentenceChunker::split(context);
        if sentences.is_empty() {
            return Err(HarkError::InvalidInput(
                "Cannot answer from an empty context".to_string(),
            ));
        }

        let question_tokens: HashSet<String> = tokenize(question).collect();

        let best = sentences
            .iter()
            .map(|sentence| {
                let overlap = tokenize(&sentence.text)
                    .filter(|t| question_tokens.contains(t))
                    .collect::<HashSet<_>>()
                    .len();
                (overlap, sentence)
            })
            // max_by_key returns the last maximum; compare on (overlap, reverse index)
            // so the earliest sentence wins ties
            .max_by_key(|(overlap, sentence)| (*overlap, std::cmp::Reverse(sentence.index)))
            .map(|(_, sentence)| sentence.text.clone())
            .unwrap_or_default();

        debug!("Extracted answer sentence of {} chars", best.len());
        Ok(best)
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_picks_sentence_with_most_question_overlap() {
        let qa = LexicalQa::new();
        let answer = qa
            .answer(
                "Where did the dog go?",
                "The cat sat. The dog ran. Birds flew south.",
            )
            .await
            .unwrap();
        assert_eq!(answer, "The dog ran");
    }

    #[tokio::test]
    async fn test_ties_go_to_earliest_sentence() {
        let qa = LexicalQa::new();
        let answer = qa
            .answer("zebra?", "First sentence. Second sentence.")
            .await
            .unwrap();
        assert_eq!(answer, "First sentence");
    }

    #[tokio::test]
    async fn test_empty_context_is_rejected() {
        let qa = LexicalQa::new();
        assert!(qa.answer("anything?", "").await.is_err());
    }
}
