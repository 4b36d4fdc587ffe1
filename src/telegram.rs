//! Telegram front end: a long-poll loop that forwards text messages to
//! the engine and sends the answer back. Runs as an independent task
//! next to the HTTP server; one update is handled at a time.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::core::errors::ApiError;
use crate::engine::ENGLISH;
use crate::state::AppState;

const API_BASE: &str = "https://api.telegram.org";
const POLL_TIMEOUT_SECS: u64 = 30;
const ERROR_PAUSE: Duration = Duration::from_secs(5);

const GREETING: &str =
    "Hello! I am your AI Health Assistant. Ask me anything about health and wellbeing!";

struct TelegramUpdate {
    update_id: i64,
    message: Option<IncomingMessage>,
}

struct IncomingMessage {
    chat_id: i64,
    text: String,
}

pub async fn run_poller(state: Arc<AppState>, token: String) {
    // Client timeout must outlast the long-poll window.
    let client = match Client::builder()
        .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            tracing::error!("Failed to build Telegram client: {}", err);
            return;
        }
    };

    let base_url = format!("{}/bot{}", API_BASE, token);
    let mut offset: i64 = 0;
    tracing::info!("Telegram poller started");

    loop {
        let updates = match fetch_updates(&client, &base_url, offset).await {
            Ok(updates) => updates,
            Err(err) => {
                tracing::warn!("Telegram getUpdates failed: {}", err);
                tokio::time::sleep(ERROR_PAUSE).await;
                continue;
            }
        };

        for update in updates {
            offset = offset.max(update.update_id + 1);
            let Some(message) = update.message else {
                continue;
            };

            let reply = match reply_text(&message.text) {
                ReplyKind::Greeting => GREETING.to_string(),
                ReplyKind::Ignore => continue,
                ReplyKind::Answer => {
                    state.engine.process_query(&message.text, ENGLISH).await.answer
                }
            };

            if let Err(err) = send_message(&client, &base_url, message.chat_id, &reply).await {
                tracing::warn!("Telegram sendMessage failed: {}", err);
            }
        }
    }
}

enum ReplyKind {
    Greeting,
    Ignore,
    Answer,
}

/// `/start` greets, other commands are ignored, plain text goes to the
/// engine.
fn reply_text(text: &str) -> ReplyKind {
    let trimmed = text.trim();
    if trimmed == "/start" {
        ReplyKind::Greeting
    } else if trimmed.starts_with('/') {
        ReplyKind::Ignore
    } else {
        ReplyKind::Answer
    }
}

async fn fetch_updates(
    client: &Client,
    base_url: &str,
    offset: i64,
) -> Result<Vec<TelegramUpdate>, ApiError> {
    let url = format!(
        "{}/getUpdates?timeout={}&offset={}",
        base_url, POLL_TIMEOUT_SECS, offset
    );

    let response = client.get(&url).send().await.map_err(ApiError::upstream)?;
    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "getUpdates returned {}",
            response.status()
        )));
    }

    let payload: Value = response.json().await.map_err(ApiError::upstream)?;
    Ok(parse_updates(&payload))
}

fn parse_updates(payload: &Value) -> Vec<TelegramUpdate> {
    let Some(items) = payload.get("result").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    let mut updates = Vec::new();
    for item in items {
        let Some(update_id) = item.get("update_id").and_then(|v| v.as_i64()) else {
            continue;
        };

        let message = item.get("message").and_then(|message| {
            let chat_id = message.get("chat")?.get("id")?.as_i64()?;
            let text = message.get("text")?.as_str()?;
            if text.is_empty() {
                return None;
            }
            Some(IncomingMessage {
                chat_id,
                text: text.to_string(),
            })
        });

        updates.push(TelegramUpdate { update_id, message });
    }

    updates
}

async fn send_message(
    client: &Client,
    base_url: &str,
    chat_id: i64,
    text: &str,
) -> Result<(), ApiError> {
    let url = format!("{}/sendMessage", base_url);
    let body = json!({ "chat_id": chat_id, "text": text });

    let response = client
        .post(&url)
        .json(&body)
        .send()
        .await
        .map_err(ApiError::upstream)?;

    if !response.status().is_success() {
        return Err(ApiError::Upstream(format!(
            "sendMessage returned {}",
            response.status()
        )));
    }

    Ok(())
}
