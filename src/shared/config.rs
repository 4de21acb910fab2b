//! Application configuration. API credentials, endpoints, model path, pipeline limits.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";
pub const DEFAULT_COMMENT_LIMIT: usize = 100;
pub const DEFAULT_TOP_LIKED_CAP: usize = 10;
/// Word budget of a typical word-cloud renderer.
pub const DEFAULT_MAX_TERMS: usize = 200;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// YouTube Data API key. Read from YT_SENTI_API_KEY or YOUTUBE_API_KEY.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the Data API. Read from YT_SENTI_API_BASE_URL.
    #[serde(default)]
    pub api_base_url: Option<String>,

    /// Directory holding `vectorizer.json` and `sentiment_model.json`. Read from YT_SENTI_MODEL_DIR.
    #[serde(default)]
    pub model_dir: Option<String>,

    /// Max comments fetched per analysis (default 100). Read from YT_SENTI_COMMENT_LIMIT.
    #[serde(default)]
    pub comment_limit: Option<usize>,

    /// Per-request timeout in seconds (default 15). Read from YT_SENTI_REQUEST_TIMEOUT_SECS.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    /// Extra attempts after a transient failure (default 3). Read from YT_SENTI_MAX_RETRIES.
    #[serde(default)]
    pub max_retries: Option<u32>,

    /// Base backoff between retries in ms, doubled per attempt (default 500). Read from YT_SENTI_RETRY_BACKOFF_MS.
    #[serde(default)]
    pub retry_backoff_ms: Option<u64>,

    /// Length of the top-liked list (default 10). Read from YT_SENTI_TOP_LIKED_CAP.
    #[serde(default)]
    pub top_liked_cap: Option<usize>,

    /// Max terms kept per term-frequency group (default 200). Read from YT_SENTI_MAX_TERMS.
    #[serde(default)]
    pub max_terms: Option<usize>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("YT_SENTI").try_parsing(true));
        if let Ok(path) = std::env::var("YT_SENTI_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // YOUTUBE_API_KEY is accepted without prefix so an existing .env can be reused
        if cfg.api_key.is_none() {
            cfg.api_key = std::env::var("YOUTUBE_API_KEY").ok();
        }
        Ok(cfg)
    }

    /// Returns the API key if configured and non-empty.
    pub fn api_key(&self) -> Option<String> {
        self.api_key.clone().filter(|k| !k.trim().is_empty())
    }

    pub fn api_base_url_or_default(&self) -> String {
        self.api_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
    }

    pub fn model_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.model_dir.as_deref().unwrap_or("./model"))
    }

    pub fn comment_limit_or_default(&self) -> usize {
        self.comment_limit.unwrap_or(DEFAULT_COMMENT_LIMIT)
    }

    /// Returns the per-request timeout. Defaults to 15s; zero is treated as unset.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|&s| s > 0)
                .unwrap_or(15),
        )
    }

    pub fn max_retries_or_default(&self) -> u32 {
        self.max_retries.unwrap_or(3)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms.unwrap_or(500))
    }

    pub fn top_liked_cap_or_default(&self) -> usize {
        self.top_liked_cap.unwrap_or(DEFAULT_TOP_LIKED_CAP)
    }

    pub fn max_terms_or_default(&self) -> usize {
        self.max_terms.unwrap_or(DEFAULT_MAX_TERMS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.api_base_url_or_default(), DEFAULT_API_BASE_URL);
        assert_eq!(cfg.model_dir_or_default(), PathBuf::from("./model"));
        assert_eq!(cfg.comment_limit_or_default(), 100);
        assert_eq!(cfg.request_timeout(), Duration::from_secs(15));
        assert_eq!(cfg.max_retries_or_default(), 3);
        assert_eq!(cfg.retry_backoff(), Duration::from_millis(500));
        assert_eq!(cfg.top_liked_cap_or_default(), 10);
        assert_eq!(cfg.max_terms_or_default(), 200);
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let cfg = AppConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(cfg.api_key().is_none());
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let cfg = AppConfig {
            request_timeout_secs: Some(0),
            ..Default::default()
        };
        assert_eq!(cfg.request_timeout(), Duration::from_secs(15));
    }

    #[test]
    fn deserializes_from_config_source() {
        let cfg: AppConfig = config::Config::builder()
            .set_override("api_key", "k")
            .unwrap()
            .set_override("comment_limit", 250)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(cfg.api_key().as_deref(), Some("k"));
        assert_eq!(cfg.comment_limit_or_default(), 250);
    }
}
