//! `news` tool: NewsAPI top headlines in English, optionally by topic.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use concierge_domain::tool::{Command, PARAM_TOPIC, ToolData, ToolError, ToolProvider};
use serde_json::Value;

use super::{require_key, send_error};

pub const DEFAULT_NEWS_URL: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_NEWS_TIMEOUT: Duration = Duration::from_secs(10);

pub struct NewsTool {
    client: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
    timeout: Duration,
}

impl NewsTool {
    pub fn new(client: reqwest::Client, api_key: Option<String>) -> Self {
        Self {
            client,
            api_key,
            base_url: DEFAULT_NEWS_URL.to_string(),
            timeout: DEFAULT_NEWS_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Accept a NewsAPI body, rejecting `status: "error"` payloads.
pub fn check_news(body: Value) -> Result<ToolData, ToolError> {
    let Value::Object(map) = body else {
        return Err(ToolError::execution_failed("News API returned a non-object body"));
    };
    if map.get("status").and_then(Value::as_str) == Some("error") {
        let message = map
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("Unknown error from news API");
        return Err(ToolError::execution_failed(message));
    }
    Ok(map)
}

#[async_trait]
impl ToolProvider for NewsTool {
    fn command(&self) -> Command {
        Command::News
    }

    async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
        let api_key = require_key(self.api_key.as_deref(), "NEWS_API_KEY")?;

        let mut query = vec![("apiKey", api_key), ("language", "en")];
        if let Some(topic) = params.get(PARAM_TOPIC).filter(|t| !t.trim().is_empty()) {
            query.push(("q", topic.as_str()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| send_error("news", e))?;

        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            ToolError::execution_failed(format!("News API returned HTTP {}: {}", status, e))
        })?;
        let data = check_news(body)?;
        if !status.is_success() {
            return Err(ToolError::execution_failed(format!(
                "News API returned HTTP {}",
                status
            )));
        }
        Ok(data)
    }
}
