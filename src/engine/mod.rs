//! Query orchestration: translate in, retrieve, extract, compose,
//! translate out.
//!
//! [`HealthEngine::process_query`] never fails. Upstream hiccups degrade
//! to local fallbacks inside the pipeline; anything unexpected is caught
//! at the boundary and turned into a fixed apology reply.

use std::sync::Arc;

use serde::Serialize;

use crate::core::errors::ApiError;
use crate::generate::HfGenerator;
use crate::retrieval::{Retriever, ScoredPassage};
use crate::translate::{Translation, TranslationClient};

pub mod compose;
pub mod sections;

use compose::compose_answer;
use sections::extract_sections;

pub const ENGLISH: &str = "en";

const NOT_FOUND_ANSWER: &str = "I could not find medical information about that topic. Please \
     try rephrasing your question, or consult a qualified healthcare professional.";
const FAILURE_ANSWER: &str =
    "I apologize, but I'm experiencing technical difficulties. Please try again later.";
const TRANSLATION_CAVEAT: &str =
    "(Automatic translation was unavailable; showing the answer in English.)";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    pub id: usize,
    pub source: String,
    pub url: String,
    pub relevance_score: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub answer: String,
    pub citations: Vec<Citation>,
    pub original_query: String,
    pub processed_query: String,
    pub language: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub struct HealthEngine {
    retriever: Arc<dyn Retriever>,
    translator: TranslationClient,
    generator: Option<HfGenerator>,
}

impl HealthEngine {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        translator: TranslationClient,
        generator: Option<HfGenerator>,
    ) -> Self {
        Self {
            retriever,
            translator,
            generator,
        }
    }

    /// Runs the full pipeline for one question.
    pub async fn process_query(&self, message: &str, language: &str) -> ChatReply {
        match self.answer(message, language).await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!("Query pipeline failed: {}", err);
                ChatReply {
                    answer: FAILURE_ANSWER.to_string(),
                    citations: Vec::new(),
                    original_query: message.to_string(),
                    processed_query: message.to_string(),
                    language: language.to_string(),
                    timestamp: now(),
                    error: Some(err.to_string()),
                }
            }
        }
    }

    async fn answer(&self, message: &str, language: &str) -> Result<ChatReply, ApiError> {
        let original_query = message.to_string();

        let processed_query = if language == ENGLISH {
            original_query.clone()
        } else {
            match self.translator.translate(&original_query, language, ENGLISH).await {
                Translation::Translated(text) => text,
                Translation::Unavailable(text) => {
                    tracing::warn!("Query translation from '{}' unavailable", language);
                    text
                }
            }
        };

        let passages = self.retriever.retrieve(&processed_query).await?;

        if passages.is_empty() {
            return Ok(ChatReply {
                answer: self.localize(NOT_FOUND_ANSWER.to_string(), language).await,
                citations: Vec::new(),
                original_query,
                processed_query,
                language: language.to_string(),
                timestamp: now(),
                error: None,
            });
        }

        let citations = build_citations(&passages);
        let sections = extract_sections(&passages[0].text);
        let mut answer = compose_answer(&processed_query, &sections);

        if let Some(generator) = &self.generator {
            if let Some(enhanced) = generator.enhance(&processed_query).await {
                answer = enhanced;
            }
        }

        let answer = self.localize(answer, language).await;

        Ok(ChatReply {
            answer,
            citations,
            original_query,
            processed_query,
            language: language.to_string(),
            timestamp: now(),
            error: None,
        })
    }

    /// Translates the finished answer to the target language. When the
    /// endpoint is unreachable the English text goes out with a caveat
    /// line instead of failing the request.
    async fn localize(&self, answer: String, language: &str) -> String {
        if language == ENGLISH {
            return answer;
        }

        match self.translator.translate(&answer, ENGLISH, language).await {
            Translation::Translated(text) => text,
            Translation::Unavailable(text) => {
                tracing::warn!("Answer translation to '{}' unavailable", language);
                format!("{}\n\n{}", text, TRANSLATION_CAVEAT)
            }
        }
    }
}

fn build_citations(passages: &[ScoredPassage]) -> Vec<Citation> {
    passages
        .iter()
        .enumerate()
        .map(|(idx, passage)| Citation {
            id: idx + 1,
            source: passage.source.clone(),
            url: passage.url.clone(),
            relevance_score: round3(passage.score),
        })
        .collect()
}

fn round3(score: f32) -> f32 {
    (score * 1000.0).round() / 1000.0
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::knowledge::corpus::seed_documents;
    use crate::retrieval::{LexicalRetriever, WikiRetriever};

    fn offline_translator() -> TranslationClient {
        TranslationClient::with_base_url("http://127.0.0.1:9").unwrap()
    }

    fn engine() -> HealthEngine {
        let retriever = Arc::new(LexicalRetriever::new(seed_documents()));
        HealthEngine::new(retriever, offline_translator(), None)
    }

    struct NoHits;

    #[async_trait]
    impl Retriever for NoHits {
        fn name(&self) -> &str {
            "no_hits"
        }

        async fn retrieve(&self, _query: &str) -> Result<Vec<ScoredPassage>, ApiError> {
            Ok(Vec::new())
        }
    }

    struct Exploding;

    #[async_trait]
    impl Retriever for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        async fn retrieve(&self, _query: &str) -> Result<Vec<ScoredPassage>, ApiError> {
            Err(ApiError::Internal("index corrupted".to_string()))
        }
    }

    #[tokio::test]
    async fn english_diabetes_query_cites_the_diabetes_source() {
        let reply = engine().process_query("What is diabetes?", "en").await;

        assert!(reply.error.is_none());
        assert_eq!(reply.language, "en");
        assert_eq!(reply.original_query, "What is diabetes?");
        assert_eq!(reply.processed_query, "What is diabetes?");
        assert!(!reply.citations.is_empty());
        assert_eq!(reply.citations[0].id, 1);
        assert_eq!(reply.citations[0].source, "WHO Diabetes Fact Sheet 2023");
        assert!(reply.answer.contains("📖 **Definition**"));
        assert!(reply.answer.contains(compose::DISCLAIMER));
        assert!(!reply.timestamp.is_empty());
    }

    #[tokio::test]
    async fn identical_queries_yield_identical_answers_and_citations() {
        let engine = engine();

        let first = engine.process_query("How much exercise do adults need?", "en").await;
        let second = engine.process_query("How much exercise do adults need?", "en").await;

        assert_eq!(first.answer, second.answer);
        assert_eq!(first.citations, second.citations);
    }

    #[tokio::test]
    async fn empty_retrieval_surfaces_the_not_found_answer() {
        let engine = HealthEngine::new(Arc::new(NoHits), offline_translator(), None);

        let reply = engine.process_query("asdkjaslkdj", "en").await;

        assert!(reply.error.is_none());
        assert!(reply.citations.is_empty());
        assert!(reply.answer.contains("could not find medical information"));
    }

    #[tokio::test]
    async fn unreachable_encyclopedia_yields_the_not_found_answer() {
        let retriever = Arc::new(WikiRetriever::with_base_url("http://127.0.0.1:9").unwrap());
        let engine = HealthEngine::new(retriever, offline_translator(), None);

        let reply = engine.process_query("asdkjaslkdj", "en").await;

        assert!(reply.error.is_none());
        assert!(reply.citations.is_empty());
        assert!(reply.answer.contains("could not find medical information"));
    }

    #[tokio::test]
    async fn retriever_failure_becomes_the_apology_reply() {
        let engine = HealthEngine::new(Arc::new(Exploding), offline_translator(), None);

        let reply = engine.process_query("What is diabetes?", "en").await;

        assert_eq!(reply.answer, FAILURE_ANSWER);
        assert!(reply.citations.is_empty());
        let error = reply.error.expect("error field set");
        assert!(error.contains("index corrupted"));
    }

    #[tokio::test]
    async fn unavailable_translation_degrades_with_a_caveat() {
        let reply = engine().process_query("¿Qué es la diabetes?", "es").await;

        assert!(reply.error.is_none());
        assert_eq!(reply.language, "es");
        // Ingress translation is down, so the query passes through untouched.
        assert_eq!(reply.processed_query, "¿Qué es la diabetes?");
        assert!(!reply.citations.is_empty());
        assert!(reply.answer.ends_with(TRANSLATION_CAVEAT));
    }

    #[test]
    fn citation_scores_are_rounded_to_three_decimals() {
        let passages = vec![ScoredPassage {
            text: "text".to_string(),
            source: "source".to_string(),
            url: String::new(),
            category: String::new(),
            score: 0.123_456,
        }];

        let citations = build_citations(&passages);

        assert_eq!(citations[0].relevance_score, 0.123);
    }
}
