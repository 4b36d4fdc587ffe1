use std::cmp::Ordering;
use std::collections::HashSet;

use async_trait::async_trait;
use regex::Regex;

use super::{Retriever, ScoredPassage, MAX_PASSAGES};
use crate::core::errors::ApiError;
use crate::knowledge::HealthDocument;

/// Token-set overlap matcher over the fixed corpus.
///
/// Score is |query tokens ∩ document tokens| / |document tokens|. The top
/// three positive-scoring documents win; when nothing scores above zero
/// the first document is returned anyway so the caller always has one
/// passage to work with.
pub struct LexicalRetriever {
    documents: Vec<HealthDocument>,
    token_sets: Vec<HashSet<String>>,
    word: Regex,
}

impl LexicalRetriever {
    pub fn new(documents: Vec<HealthDocument>) -> Self {
        let word = Regex::new(r"[a-z0-9]+").expect("valid regex");
        let token_sets = documents
            .iter()
            .map(|doc| tokenize(&word, &doc.content))
            .collect();
        Self {
            documents,
            token_sets,
            word,
        }
    }

    fn score(&self, query_tokens: &HashSet<String>) -> Vec<(usize, f32)> {
        let mut scored: Vec<(usize, f32)> = self
            .token_sets
            .iter()
            .enumerate()
            .map(|(idx, doc_tokens)| {
                let overlap = query_tokens.intersection(doc_tokens).count();
                let score = if doc_tokens.is_empty() {
                    0.0
                } else {
                    overlap as f32 / doc_tokens.len() as f32
                };
                (idx, score)
            })
            .collect();

        // Stable sort keeps corpus order among equal scores.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored
    }
}

#[async_trait]
impl Retriever for LexicalRetriever {
    fn name(&self) -> &str {
        "knowledge_base"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredPassage>, ApiError> {
        let query_tokens = tokenize(&self.word, query);

        let mut passages: Vec<ScoredPassage> = self
            .score(&query_tokens)
            .into_iter()
            .filter(|(_, score)| *score > 0.0)
            .take(MAX_PASSAGES)
            .map(|(idx, score)| passage(&self.documents[idx], score))
            .collect();

        if passages.is_empty() {
            if let Some(first) = self.documents.first() {
                passages.push(passage(first, 0.0));
            }
        }

        Ok(passages)
    }
}

fn tokenize(word: &Regex, text: &str) -> HashSet<String> {
    word.find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

fn passage(doc: &HealthDocument, score: f32) -> ScoredPassage {
    ScoredPassage {
        text: doc.content.clone(),
        source: doc.source.clone(),
        url: doc.url.clone(),
        category: doc.category.clone(),
        score,
    }
}
