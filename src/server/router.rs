use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::handlers::{chat, health};
use crate::state::AppState;

/// Builds the application router: embedded chat page, chat API, health
/// probe and language list, with permissive CORS for the web widget.
pub fn router(state: Arc<AppState>) -> Router {
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(chat::home))
        .route("/chat", post(chat::chat))
        .route("/health", get(health::health))
        .route("/languages", get(chat::languages))
        .with_state(state)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
}
