//! Built-in health reference corpus.
//!
//! Five short reference paragraphs with their source citations, loaded
//! once at startup and never mutated. This is the entire document set
//! for the knowledge-base retrieval strategy.

use serde::{Deserialize, Serialize};

pub mod corpus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDocument {
    pub id: String,
    pub content: String,
    pub source: String,
    pub category: String,
    pub url: String,
}
