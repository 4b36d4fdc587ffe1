use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use arogya_backend::core::config::{AppPaths, Settings};
use arogya_backend::state::AppState;
use arogya_backend::{logging, server, telegram};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let paths = Arc::new(AppPaths::new());
    let (settings, config_warnings) = Settings::load(&paths);
    logging::init(&paths, settings.debug);
    for warning in config_warnings {
        tracing::warn!("{}", warning);
    }

    let state =
        AppState::new(paths, settings).context("Failed to initialize application state")?;

    if let Some(token) = state.settings.telegram_bot_token.clone() {
        tokio::spawn(telegram::run_poller(state.clone(), token));
    } else {
        tracing::info!("TELEGRAM_BOT_TOKEN not set; Telegram front end disabled");
    }

    let bind_addr = state.settings.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = server::router::router(state);

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
