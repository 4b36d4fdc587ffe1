//! Retrieval strategies for the answer pipeline.
//!
//! Exactly one strategy is active per process, chosen from configuration
//! at startup: `knowledge_base` matches against the built-in corpus by
//! token overlap, `encyclopedia` looks a topic up on Wikipedia. An empty
//! result set means "nothing found" and is not an error; `Err` is
//! reserved for faults the strategy cannot absorb locally.

use async_trait::async_trait;

use crate::core::errors::ApiError;

pub mod lexical;
pub mod wiki;

pub use lexical::LexicalRetriever;
pub use wiki::WikiRetriever;

/// Upper bound on passages returned for a single query.
pub const MAX_PASSAGES: usize = 3;

#[derive(Debug, Clone)]
pub struct ScoredPassage {
    pub text: String,
    pub source: String,
    pub url: String,
    pub category: String,
    pub score: f32,
}

#[async_trait]
pub trait Retriever: Send + Sync {
    fn name(&self) -> &str;

    /// Returns passages relevant to an English-language question, best
    /// first, scores non-increasing.
    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredPassage>, ApiError>;
}
