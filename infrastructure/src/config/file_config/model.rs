//! Model endpoint configuration (`[model]` section)
//!
//! ```toml
//! [model]
//! provider = "mistral"
//! api_url = "https://api.mistral.ai/v1/chat/completions"
//! model = "mistral-small-latest"
//! api_key_env = "LLM_API_KEY"
//! requests_per_minute = 10
//! ```

use super::resolve_setting;
use crate::config::ConfigError;
use crate::llm::{ModelEndpoint, RateLimiter};
use concierge_domain::ProviderKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelConfig {
    pub provider: Option<String>,
    pub provider_env: String,
    pub api_url: Option<String>,
    pub api_url_env: String,
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub model: Option<String>,
    pub model_env: String,
    /// 0 disables rate limiting
    pub requests_per_minute: u32,
    pub timeout_seconds: u64,
}

impl Default for FileModelConfig {
    fn default() -> Self {
        Self {
            provider: None,
            provider_env: "LLM_PROVIDER".to_string(),
            api_url: None,
            api_url_env: "LLM_API_URL".to_string(),
            api_key: None,
            api_key_env: "LLM_API_KEY".to_string(),
            model: None,
            model_env: "LLM_MODEL".to_string(),
            requests_per_minute: 10,
            timeout_seconds: 30,
        }
    }
}

impl FileModelConfig {
    pub fn provider_with(&self, lookup: &dyn Fn(&str) -> Option<String>) -> ProviderKind {
        resolve_setting(self.provider.as_deref(), &self.provider_env, lookup)
            .map(|name| ProviderKind::from_name(&name))
            .unwrap_or_default()
    }

    /// Resolve the endpoint; a missing URL, key, or model name is fatal.
    pub fn endpoint_with(
        &self,
        lookup: &dyn Fn(&str) -> Option<String>,
    ) -> Result<ModelEndpoint, ConfigError> {
        let required = |value: &Option<String>, env: &String, field: &'static str| {
            resolve_setting(value.as_deref(), env, lookup).ok_or_else(|| ConfigError::Missing {
                field,
                env: env.clone(),
            })
        };

        let api_url = required(&self.api_url, &self.api_url_env, "model.api_url")?;
        let api_key = required(&self.api_key, &self.api_key_env, "model.api_key")?;
        let model = required(&self.model, &self.model_env, "model.model")?;

        Ok(
            ModelEndpoint::new(self.provider_with(lookup), api_url, api_key, model)
                .with_timeout(Duration::from_secs(self.timeout_seconds)),
        )
    }

    pub fn rate_limiter(&self) -> RateLimiter {
        RateLimiter::per_minute(self.requests_per_minute)
    }
}
