use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::paths::AppPaths;

/// Placeholder key shipped in sample configs; treated as "no key".
const HF_PLACEHOLDER_KEY: &str = "hf_demo";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Which retrieval strategy the process runs with. Chosen once at startup;
/// there is no per-request switching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    KnowledgeBase,
    Encyclopedia,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub retrieval_strategy: RetrievalStrategy,
    pub telegram_bot_token: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub languages: Vec<Language>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            host: "0.0.0.0".to_string(),
            port: 8000,
            debug: false,
            retrieval_strategy: RetrievalStrategy::KnowledgeBase,
            telegram_bot_token: None,
            huggingface_api_key: None,
            languages: default_languages(),
        }
    }
}

impl Settings {
    /// Loads settings as a default < config file < environment overlay.
    /// Load runs before the logging subscriber exists, so problems come
    /// back as warning strings for the caller to log afterwards.
    pub fn load(paths: &AppPaths) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();
        let mut settings = match Settings::from_file(&config_path(paths)) {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(warning) => {
                warnings.push(warning);
                Settings::default()
            }
        };
        settings.apply_env_overrides(&mut warnings);
        settings.normalize();
        (settings, warnings)
    }

    fn from_file(path: &Path) -> Result<Option<Self>, String> {
        let Ok(contents) = fs::read_to_string(path) else {
            return Ok(None);
        };
        serde_yaml::from_str::<Settings>(&contents)
            .map(Some)
            .map_err(|err| format!("Ignoring invalid config file {}: {}", path.display(), err))
    }

    fn apply_env_overrides(&mut self, warnings: &mut Vec<String>) {
        if let Ok(host) = env::var("HOST") {
            if !host.trim().is_empty() {
                self.host = host;
            }
        }
        if let Some(port) = env::var("PORT").ok().and_then(|val| val.parse::<u16>().ok()) {
            self.port = port;
        }
        if let Ok(debug) = env::var("DEBUG") {
            self.debug = matches!(debug.to_lowercase().as_str(), "true" | "1");
        }
        if let Ok(strategy) = env::var("RETRIEVAL_STRATEGY") {
            match parse_strategy(&strategy) {
                Some(parsed) => self.retrieval_strategy = parsed,
                None => warnings.push(format!(
                    "Unknown RETRIEVAL_STRATEGY '{}'; keeping current",
                    strategy
                )),
            }
        }
        if let Ok(token) = env::var("TELEGRAM_BOT_TOKEN") {
            self.telegram_bot_token = Some(token);
        }
        if let Ok(key) = env::var("HUGGINGFACE_API_KEY") {
            self.huggingface_api_key = Some(key);
        }
    }

    fn normalize(&mut self) {
        if let Some(token) = &self.telegram_bot_token {
            if token.trim().is_empty() {
                self.telegram_bot_token = None;
            }
        }
        if let Some(key) = &self.huggingface_api_key {
            if key.trim().is_empty() || key == HF_PLACEHOLDER_KEY {
                self.huggingface_api_key = None;
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_strategy(value: &str) -> Option<RetrievalStrategy> {
    match value.trim().to_lowercase().as_str() {
        "knowledge_base" | "knowledge-base" => Some(RetrievalStrategy::KnowledgeBase),
        "encyclopedia" | "wikipedia" => Some(RetrievalStrategy::Encyclopedia),
        _ => None,
    }
}

fn config_path(paths: &AppPaths) -> PathBuf {
    if let Ok(path) = env::var("AROGYA_CONFIG_PATH") {
        return PathBuf::from(path);
    }
    paths.config_path.clone()
}

pub fn default_languages() -> Vec<Language> {
    [
        ("en", "English"),
        ("hi", "हिंदी"),
        ("es", "Español"),
        ("fr", "Français"),
    ]
    .into_iter()
    .map(|(code, name)| Language {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_four_supported_languages() {
        let settings = Settings::default();

        assert_eq!(settings.bind_addr(), "0.0.0.0:8000");
        assert_eq!(settings.retrieval_strategy, RetrievalStrategy::KnowledgeBase);
        let codes: Vec<&str> = settings.languages.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["en", "hi", "es", "fr"]);
    }

    #[test]
    fn from_file_overlays_partial_yaml_on_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "port: 9100\nretrieval_strategy: encyclopedia\n").unwrap();

        let settings = Settings::from_file(&path).unwrap().unwrap();

        assert_eq!(settings.port, 9100);
        assert_eq!(settings.retrieval_strategy, RetrievalStrategy::Encyclopedia);
        assert_eq!(settings.host, "0.0.0.0");
        assert_eq!(settings.languages.len(), 4);
    }

    #[test]
    fn from_file_rejects_malformed_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        std::fs::write(&path, "port: [not a number\n").unwrap();

        assert!(Settings::from_file(&path).is_err());
    }

    #[test]
    fn load_reports_a_malformed_config_for_later_logging() {
        let dir = tempfile::tempdir().unwrap();
        let paths = AppPaths::with_data_dir(dir.path().to_path_buf());

        let (_, warnings) = Settings::load(&paths);
        assert!(warnings.is_empty());

        std::fs::write(&paths.config_path, "port: [not a number\n").unwrap();
        let (settings, warnings) = Settings::load(&paths);

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("config.yml"));
        assert_eq!(settings.languages.len(), 4);
    }

    #[test]
    fn normalize_discards_placeholder_credentials() {
        let mut settings = Settings {
            telegram_bot_token: Some("  ".to_string()),
            huggingface_api_key: Some(HF_PLACEHOLDER_KEY.to_string()),
            ..Settings::default()
        };

        settings.normalize();

        assert!(settings.telegram_bot_token.is_none());
        assert!(settings.huggingface_api_key.is_none());
    }

    #[test]
    fn parse_strategy_accepts_known_aliases_only() {
        assert_eq!(
            parse_strategy("ENCYCLOPEDIA"),
            Some(RetrievalStrategy::Encyclopedia)
        );
        assert_eq!(
            parse_strategy("knowledge_base"),
            Some(RetrievalStrategy::KnowledgeBase)
        );
        assert_eq!(parse_strategy("vector"), None);
    }
}
