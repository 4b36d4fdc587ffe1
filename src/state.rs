use std::sync::Arc;

use thiserror::Error;

use crate::core::config::{AppPaths, RetrievalStrategy, Settings};
use crate::engine::HealthEngine;
use crate::generate::HfGenerator;
use crate::knowledge::corpus;
use crate::retrieval::{LexicalRetriever, Retriever, WikiRetriever};
use crate::translate::TranslationClient;

/// Shared application state: built once at startup, handed to request
/// handlers and the Telegram poller behind an `Arc`, immutable after.
pub struct AppState {
    pub paths: Arc<AppPaths>,
    pub settings: Settings,
    pub engine: HealthEngine,
}

#[derive(Debug, Error)]
pub enum InitializationError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl AppState {
    pub fn new(paths: Arc<AppPaths>, settings: Settings) -> Result<Arc<Self>, InitializationError> {
        let retriever: Arc<dyn Retriever> = match settings.retrieval_strategy {
            RetrievalStrategy::KnowledgeBase => {
                Arc::new(LexicalRetriever::new(corpus::seed_documents()))
            }
            RetrievalStrategy::Encyclopedia => Arc::new(WikiRetriever::new()?),
        };
        tracing::info!("Retrieval strategy: {}", retriever.name());

        let translator = TranslationClient::new()?;

        let generator = match &settings.huggingface_api_key {
            Some(key) => Some(HfGenerator::new(key.clone())?),
            None => None,
        };
        if generator.is_none() {
            tracing::info!("No generation API key configured; using templated answers only");
        }

        let engine = HealthEngine::new(retriever, translator, generator);

        Ok(Arc::new(AppState {
            paths,
            settings,
            engine,
        }))
    }
}
