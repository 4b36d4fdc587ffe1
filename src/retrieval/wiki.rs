use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use super::{Retriever, ScoredPassage};
use crate::core::errors::ApiError;

const DEFAULT_API_BASE: &str = "https://en.wikipedia.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Question lead-ins stripped before the page lookup. Longer phrases
/// first so "tell me about" wins over "tell me".
const QUESTION_PREFIXES: [&str; 8] = [
    "what do you know about",
    "tell me about",
    "what is",
    "what are",
    "tell me",
    "explain",
    "define",
    "describe",
];

/// Encyclopedia lookup: resolve the topic to a page title through the
/// search API (first hit only), then fetch that page's summary. Upstream
/// failures and missing pages both come back as an empty result.
pub struct WikiRetriever {
    base_url: String,
    client: Client,
}

struct WikiSummary {
    extract: String,
    page_url: String,
}

impl WikiRetriever {
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

    async fn resolve_title(&self, topic: &str) -> Result<Option<String>, ApiError> {
        let url = format!(
            "{}/w/api.php?action=query&list=search&srsearch={}&format=json&srlimit=1",
            self.base_url,
            urlencoding::encode(topic)
        );

        let response = self.client.get(&url).send().await.map_err(ApiError::upstream)?;
        if !response.status().is_success() {
            return Err(ApiError::Upstream(format!(
                "title search returned {}",
                response.status()
            )));
        }

        let payload: Value = response.json().await.map_err(ApiError::upstream)?;
        Ok(parse_first_title(&payload))
    }

    async fn fetch_summary(&self, title: &str) -> Result<Option<WikiSummary>, ApiError> {
        let url = format!(
            "{}/api/rest_v1/page/summary/{}",
            self.base_url,
            urlencoding::encode(title)
        );

        let response = self.client.get(&url).send().await.map_err(ApiError::upstream)?;
        if !response.status().is_success() {
            return Ok(None);
        }

        let payload: Value = response.json().await.map_err(ApiError::upstream)?;
        Ok(parse_summary(&payload))
    }
}

#[async_trait]
impl Retriever for WikiRetriever {
    fn name(&self) -> &str {
        "encyclopedia"
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<ScoredPassage>, ApiError> {
        let topic = extract_topic(query);
        if topic.is_empty() {
            return Ok(Vec::new());
        }

        let title = match self.resolve_title(&topic).await {
            Ok(Some(title)) => title,
            Ok(None) => topic.clone(),
            Err(err) => {
                tracing::warn!("Title search for '{}' failed: {}", topic, err);
                topic.clone()
            }
        };

        match self.fetch_summary(&title).await {
            Ok(Some(summary)) => Ok(vec![ScoredPassage {
                text: summary.extract,
                source: "Wikipedia".to_string(),
                url: summary.page_url,
                category: "general".to_string(),
                score: 1.0,
            }]),
            Ok(None) => Ok(Vec::new()),
            Err(err) => {
                tracing::warn!("Summary fetch for '{}' failed: {}", title, err);
                Ok(Vec::new())
            }
        }
    }
}

/// Derives the lookup key from a question: case-fold, drop trailing
/// punctuation, strip one lead-in phrase at a word boundary, keep at
/// most three words.
pub fn extract_topic(question: &str) -> String {
    let cleaned = question.trim().to_lowercase();
    let mut rest = cleaned.trim_end_matches(['?', '!', '.']).trim();

    for prefix in QUESTION_PREFIXES {
        if let Some(stripped) = rest.strip_prefix(prefix) {
            if stripped.is_empty() || stripped.starts_with(char::is_whitespace) {
                rest = stripped.trim_start();
                break;
            }
        }
    }

    rest.split_whitespace().take(3).collect::<Vec<_>>().join(" ")
}

fn parse_first_title(payload: &Value) -> Option<String> {
    payload
        .get("query")?
        .get("search")?
        .get(0)?
        .get("title")?
        .as_str()
        .map(|title| title.to_string())
}

fn parse_summary(payload: &Value) -> Option<WikiSummary> {
    let extract = payload.get("extract").and_then(|v| v.as_str())?;
    if extract.is_empty() {
        return None;
    }

    let page_url = payload
        .get("content_urls")
        .and_then(|v| v.get("desktop"))
        .and_then(|v| v.get("page"))
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    Some(WikiSummary {
        extract: extract.to_string(),
        page_url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_topic_strips_prefixes_and_truncates() {
        assert_eq!(extract_topic("What is diabetes?"), "diabetes");
        assert_eq!(
            extract_topic("Tell me about high blood pressure please"),
            "high blood pressure"
        );
        assert_eq!(extract_topic("EXPLAIN Malaria!"), "malaria");
        assert_eq!(extract_topic("Dengue fever"), "dengue fever");
        assert_eq!(extract_topic("what is"), "");
        assert_eq!(extract_topic("   "), "");
    }

    #[test]
    fn extract_topic_strips_prefixes_only_at_word_boundaries() {
        assert_eq!(extract_topic("what island is largest"), "what island is");
        assert_eq!(extract_topic("describes symptoms"), "describes symptoms");
        assert_eq!(extract_topic("define malaria"), "malaria");
    }

    #[test]
    fn parse_first_title_takes_the_first_search_hit() {
        let payload = json!({
            "query": {
                "search": [
                    { "title": "Diabetes mellitus" },
                    { "title": "Diabetes insipidus" }
                ]
            }
        });
        assert_eq!(
            parse_first_title(&payload),
            Some("Diabetes mellitus".to_string())
        );

        let empty = json!({ "query": { "search": [] } });
        assert_eq!(parse_first_title(&empty), None);
    }

    #[test]
    fn parse_summary_requires_a_non_empty_extract() {
        let payload = json!({
            "extract": "Diabetes is a group of metabolic disorders.",
            "content_urls": {
                "desktop": { "page": "https://en.wikipedia.org/wiki/Diabetes" }
            }
        });
        let summary = parse_summary(&payload).unwrap();
        assert_eq!(summary.extract, "Diabetes is a group of metabolic disorders.");
        assert_eq!(summary.page_url, "https://en.wikipedia.org/wiki/Diabetes");

        assert!(parse_summary(&json!({ "extract": "" })).is_none());
        assert!(parse_summary(&json!({ "title": "Diabetes" })).is_none());
    }

    #[test]
    fn parse_summary_tolerates_missing_page_url() {
        let payload = json!({ "extract": "Some text." });
        let summary = parse_summary(&payload).unwrap();
        assert_eq!(summary.page_url, "");
    }

    #[tokio::test]
    async fn unreachable_endpoint_reads_as_not_found() {
        let retriever = WikiRetriever::with_base_url("http://127.0.0.1:9").unwrap();

        let passages = retriever.retrieve("What is diabetes?").await.unwrap();

        assert!(passages.is_empty());
    }
}
