use std::sync::Arc;

use axum::extract::State;
use axum::response::{Html, IntoResponse};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::state::AppState;

const INDEX_PAGE: &str = include_str!("../../../static/index.html");

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String {
    "en".to_string()
}

/// Serves the embedded chat widget page.
pub async fn home() -> impl IntoResponse {
    Html(INDEX_PAGE)
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ChatRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if payload.message.trim().is_empty() {
        return Err(ApiError::BadRequest("Message is required".to_string()));
    }

    let reply = state
        .engine
        .process_query(&payload.message, &payload.language)
        .await;

    Ok(Json(json!({
        "response": reply.answer,
        "citations": reply.citations,
        "language": reply.language,
        "timestamp": reply.timestamp
    })))
}

pub async fn languages(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({ "languages": state.settings.languages }))
}
