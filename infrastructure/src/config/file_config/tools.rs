//! Tool configuration (`[tools]` section)
//!
//! ```toml
//! [tools]
//! weather_api_key_env = "WEATHER_API_KEY"
//! search_results = 5
//! weather_retries = 3
//! geolocation = true
//! ```
//!
//! Missing API keys are not an error here; the affected tool fails when
//! it is called.

use super::resolve_setting;
use crate::config::ConfigError;
use crate::location::{DEFAULT_GEOLOCATION_TIMEOUT, DEFAULT_GEOLOCATION_URL};
use crate::tools::news::{DEFAULT_NEWS_TIMEOUT, DEFAULT_NEWS_URL};
use crate::tools::search::{DEFAULT_SEARCH_RESULTS, DEFAULT_SEARCH_TIMEOUT, DEFAULT_SEARCH_URL};
use crate::tools::weather::{DEFAULT_WEATHER_RETRIES, DEFAULT_WEATHER_TIMEOUT, DEFAULT_WEATHER_URL};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Google Custom Search returns at most 10 results per request.
const MAX_SEARCH_RESULTS: u32 = 10;
const MAX_WEATHER_RETRIES: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileToolsConfig {
    pub weather_api_key: Option<String>,
    pub weather_api_key_env: String,
    pub news_api_key: Option<String>,
    pub news_api_key_env: String,
    pub google_api_key: Option<String>,
    pub google_api_key_env: String,
    pub google_cse_id: Option<String>,
    pub google_cse_id_env: String,

    pub weather_url: String,
    pub news_url: String,
    pub search_url: String,
    pub geolocation_url: String,

    pub weather_timeout_seconds: u64,
    pub news_timeout_seconds: u64,
    pub search_timeout_seconds: u64,
    pub geolocation_timeout_seconds: u64,

    pub search_results: u32,
    pub weather_retries: u32,
    /// Look up the user's location by IP; when false the fallback is used
    pub geolocation: bool,
}

impl Default for FileToolsConfig {
    fn default() -> Self {
        Self {
            weather_api_key: None,
            weather_api_key_env: "WEATHER_API_KEY".to_string(),
            news_api_key: None,
            news_api_key_env: "NEWS_API_KEY".to_string(),
            google_api_key: None,
            google_api_key_env: "GOOGLE_API_KEY".to_string(),
            google_cse_id: None,
            google_cse_id_env: "GOOGLE_CSE_ID".to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
            news_url: DEFAULT_NEWS_URL.to_string(),
            search_url: DEFAULT_SEARCH_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            weather_timeout_seconds: DEFAULT_WEATHER_TIMEOUT.as_secs(),
            news_timeout_seconds: DEFAULT_NEWS_TIMEOUT.as_secs(),
            search_timeout_seconds: DEFAULT_SEARCH_TIMEOUT.as_secs(),
            geolocation_timeout_seconds: DEFAULT_GEOLOCATION_TIMEOUT.as_secs(),
            search_results: DEFAULT_SEARCH_RESULTS,
            weather_retries: DEFAULT_WEATHER_RETRIES,
            geolocation: true,
        }
    }
}

/// Tool credentials after environment fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolKeys {
    pub weather: Option<String>,
    pub news: Option<String>,
    pub google: Option<String>,
    pub google_cse_id: Option<String>,
}

impl FileToolsConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_results == 0 || self.search_results > MAX_SEARCH_RESULTS {
            return Err(ConfigError::Invalid(format!(
                "tools.search_results must be between 1 and {}, got {}",
                MAX_SEARCH_RESULTS, self.search_results
            )));
        }
        if self.weather_retries > MAX_WEATHER_RETRIES {
            return Err(ConfigError::Invalid(format!(
                "tools.weather_retries must be at most {}, got {}",
                MAX_WEATHER_RETRIES, self.weather_retries
            )));
        }
        for (name, value) in [
            ("weather_timeout_seconds", self.weather_timeout_seconds),
            ("news_timeout_seconds", self.news_timeout_seconds),
            ("search_timeout_seconds", self.search_timeout_seconds),
            ("geolocation_timeout_seconds", self.geolocation_timeout_seconds),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("tools.{} cannot be 0", name)));
            }
        }
        Ok(())
    }

    pub fn keys_with(&self, lookup: &dyn Fn(&str) -> Option<String>) -> ToolKeys {
        ToolKeys {
            weather: resolve_setting(self.weather_api_key.as_deref(), &self.weather_api_key_env, lookup),
            news: resolve_setting(self.news_api_key.as_deref(), &self.news_api_key_env, lookup),
            google: resolve_setting(self.google_api_key.as_deref(), &self.google_api_key_env, lookup),
            google_cse_id: resolve_setting(self.google_cse_id.as_deref(), &self.google_cse_id_env, lookup),
        }
    }

    pub fn weather_timeout(&self) -> Duration {
        Duration::from_secs(self.weather_timeout_seconds)
    }

    pub fn news_timeout(&self) -> Duration {
        Duration::from_secs(self.news_timeout_seconds)
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_seconds)
    }

    pub fn geolocation_timeout(&self) -> Duration {
        Duration::from_secs(self.geolocation_timeout_seconds)
    }
}
