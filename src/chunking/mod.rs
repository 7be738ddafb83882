//! Transcript chunking.
//!
//! Splits a transcript into ordered, positionally indexed sentence chunks.
//! The positional index is retrieval-significant: the vector index stores
//! embeddings in the same order, so slot N of a search result maps back to
//! chunk N here.

use serde::{Deserialize, Serialize};

/// One retrievable unit of transcript text.
///
/// Chunks are never edited after creation; `index` equals the chunk's
/// first-appearance position in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// 0-based position in the transcript's chunk sequence.
    pub index: usize,
    /// Text content of this chunk.
    pub text: String,
}

/// Sentence-boundary chunker.
///
/// Delimiter policy: the transcript is split on the literal `". "` sequence,
/// which is stripped from the produced chunks. The final piece keeps whatever
/// trailing punctuation it has. Pieces are trimmed and whitespace-only pieces
/// dropped, so no non-empty sentence is ever silently lost.
pub struct SentenceChunker;

impl SentenceChunker {
    /// Split a transcript into ordered chunks. An empty transcript yields an
    /// empty sequence; rejecting that is the index builder's job.
    pub fn split(transcript: &str) -> Vec<Chunk> {
        transcript
            .split(". ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
            .map(|(index, text)| Chunk {
                index,
                text: text.to_string(),
            })
            .collect()
    }
}
