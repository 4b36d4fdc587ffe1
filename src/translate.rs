//! Thin client for the public translation endpoint.
//!
//! Failures never propagate out of [`TranslationClient::translate`]; the
//! caller always gets usable text back, tagged with whether translation
//! actually happened.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::core::errors::ApiError;

const DEFAULT_API_BASE: &str = "https://translate.googleapis.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of one translation attempt. `Unavailable` carries the input
/// text untouched so callers can decide how to present the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Translated(String),
    Unavailable(String),
}

impl Translation {
    pub fn text(&self) -> &str {
        match self {
            Translation::Translated(text) | Translation::Unavailable(text) => text,
        }
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Translation::Unavailable(_))
    }
}

#[derive(Clone)]
pub struct TranslationClient {
    base_url: String,
    client: Client,
}

impl TranslationClient {
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_API_BASE)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub async fn translate(&self, text: &str, from: &str, to: &str) -> Translation {
        if text.trim().is_empty() || from == to {
            return Translation::Translated(text.to_string());
        }

        match self.request(text, from, to).await {
            Ok(translated) => Translation::Translated(translated),
            Err(err) => {
                tracing::warn!("Translation {} -> {} failed: {}", from, to, err);
                Translation::Unavailable(text.to_string())
            }
        }
    }

    async fn request(&self, text: &str, from: &str, to: &str) -> Result<String, ApiError> {
        let url = format!(
            "{}/translate_a/single?client=gtx&sl={}&tl={}&dt=t&q={}",
            self.base_url,
            from,
            to,
            urlencoding::encode(text)
        );

        let response = self.client.get(&url).send().await.map_err(ApiError::upstream)?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "translation endpoint returned {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(ApiError::upstream)?;
        parse_translation(&payload)
            .ok_or_else(|| ApiError::Upstream("unexpected translation payload".to_string()))
    }
}

/// The endpoint answers with nested arrays; segment texts sit at
/// `[0][i][0]` and concatenate into the full translation.
fn parse_translation(payload: &Value) -> Option<String> {
    let segments = payload.get(0)?.as_array()?;

    let mut out = String::new();
    for segment in segments {
        if let Some(fragment) = segment.get(0).and_then(|v| v.as_str()) {
            out.push_str(fragment);
        }
    }

    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
