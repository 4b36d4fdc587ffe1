//! Optional answer enhancement through a hosted inference endpoint.

use std::time::Duration;

use reqwest::Client;
use serde_json::{json, Value};

use crate::core::errors::ApiError;

const DEFAULT_API_BASE: &str = "https://api-inference.huggingface.co";
const MODEL: &str = "gpt2";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Generated answers at or below this length are discarded as degenerate.
const MIN_USEFUL_LEN: usize = 50;

const EDUCATIONAL_NOTE: &str = "⚠️ Important: This information is for educational purposes \
     only. Always consult with qualified healthcare professionals for medical advice.";

/// Client for the text-generation endpoint. Only constructed when an API
/// key is configured; the pipeline works without it.
#[derive(Clone)]
pub struct HfGenerator {
    base_url: String,
    api_key: String,
    client: Client,
}

impl HfGenerator {
    pub fn new(api_key: String) -> Result<Self, reqwest::Error> {
        Self::with_base_url(DEFAULT_API_BASE, api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: String) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client,
        })
    }

    /// Asks the model to continue after "Answer:". Any failure or
    /// unusable output yields `None` and the caller keeps the templated
    /// answer.
    pub async fn enhance(&self, question: &str) -> Option<String> {
        match self.request(question).await {
            Ok(answer) => answer,
            Err(err) => {
                tracing::warn!("Generation enhancement failed: {}", err);
                None
            }
        }
    }

    async fn request(&self, question: &str) -> Result<Option<String>, ApiError> {
        let url = format!("{}/models/{}", self.base_url, MODEL);
        let body = json!({
            "inputs": format!("Health Question: {}\nAnswer:", question),
            "parameters": {
                "max_length": 300,
                "temperature": 0.7,
                "do_sample": true
            }
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(ApiError::upstream)?;

        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "inference endpoint returned {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(ApiError::upstream)?;
        Ok(extract_answer(&payload))
    }
}

fn extract_answer(payload: &Value) -> Option<String> {
    let generated = payload.get(0)?.get("generated_text")?.as_str()?;
    let answer = generated.split("Answer:").nth(1)?.trim();

    if answer.len() <= MIN_USEFUL_LEN {
        return None;
    }

    Some(format!("{}\n\n{}", answer, EDUCATIONAL_NOTE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_answer_keeps_substantial_completions_only() {
        let long_answer = "Diabetes management combines diet, exercise and regular blood \
                           sugar monitoring under medical supervision.";
        let payload = json!([{
            "generated_text": format!("Health Question: What is diabetes?\nAnswer: {long_answer}")
        }]);

        let enhanced = extract_answer(&payload).unwrap();
        assert!(enhanced.starts_with(long_answer));
        assert!(enhanced.ends_with(EDUCATIONAL_NOTE));
    }

    #[test]
    fn extract_answer_discards_short_or_malformed_output() {
        let short = json!([{ "generated_text": "Health Question: x\nAnswer: too short" }]);
        assert!(extract_answer(&short).is_none());

        let no_marker = json!([{ "generated_text": "no marker here" }]);
        assert!(extract_answer(&no_marker).is_none());

        let not_a_list = json!({ "error": "loading" });
        assert!(extract_answer(&not_a_list).is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_yields_none() {
        let generator =
            HfGenerator::with_base_url("http://127.0.0.1:9", "key".to_string()).unwrap();

        assert!(generator.enhance("What is diabetes?").await.is_none());
    }
}
