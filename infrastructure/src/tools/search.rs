//! `search` tool: Google Custom Search.
//!
//! Only title, snippet, link, and `og:description` are requested. The
//! OpenGraph description, when present, replaces the snippet.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use concierge_domain::tool::{Command, PARAM_QUERY, ToolData, ToolError, ToolProvider};
use serde_json::{Value, json};

use super::{require_key, send_error};

pub const DEFAULT_SEARCH_URL: &str = "https://www.googleapis.com/customsearch/v1";
pub const DEFAULT_SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_SEARCH_RESULTS: u32 = 5;

const SEARCH_FIELDS: &str = "items(title,snippet,link,pagemap/metatags/og:description)";

pub struct SearchTool {
    client: reqwest::Client,
    api_key: Option<String>,
    engine_id: Option<String>,
    base_url: String,
    timeout: Duration,
    results: u32,
}

impl SearchTool {
    pub fn new(client: reqwest::Client, api_key: Option<String>, engine_id: Option<String>) -> Self {
        Self {
            client,
            api_key,
            engine_id,
            base_url: DEFAULT_SEARCH_URL.to_string(),
            timeout: DEFAULT_SEARCH_TIMEOUT,
            results: DEFAULT_SEARCH_RESULTS,
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

    pub fn with_results(mut self, results: u32) -> Self {
        self.results = results;
        self
    }
}

/// Map a Custom Search body to `{abstract, results, query}`.
pub fn format_search(query: &str, body: &Value) -> ToolData {
    let results: Vec<Value> = body
        .get("items")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(format_item).collect())
        .unwrap_or_default();

    let summary = results
        .first()
        .map(|first| {
            format!(
                "{}: {}",
                first["title"].as_str().unwrap_or_default(),
                first["description"].as_str().unwrap_or_default()
            )
        })
        .unwrap_or_default();

    let mut data = ToolData::new();
    data.insert("abstract".to_string(), Value::String(summary));
    data.insert("results".to_string(), Value::Array(results));
    data.insert("query".to_string(), Value::String(query.to_string()));
    data
}

fn format_item(item: &Value) -> Value {
    let og_description = item
        .pointer("/pagemap/metatags")
        .and_then(Value::as_array)
        .and_then(|tags| {
            tags.iter()
                .find_map(|tag| tag.get("og:description").and_then(Value::as_str))
        });
    let description = og_description
        .or_else(|| item.get("snippet").and_then(Value::as_str))
        .unwrap_or_default();

    json!({
        "title": item.get("title").and_then(Value::as_str).unwrap_or_default(),
        "description": description,
        "url": item.get("link").and_then(Value::as_str).unwrap_or_default(),
    })
}

#[async_trait]
impl ToolProvider for SearchTool {
    fn command(&self) -> Command {
        Command::Search
    }

    async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
        let api_key = require_key(self.api_key.as_deref(), "GOOGLE_API_KEY")?;
        let engine_id = require_key(self.engine_id.as_deref(), "GOOGLE_CSE_ID")?;
        let query = params
            .get(PARAM_QUERY)
            .map(String::as_str)
            .filter(|q| !q.trim().is_empty())
            .ok_or_else(|| ToolError::invalid_argument("search requires a query"))?;

        let num = self.results.to_string();
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("cx", engine_id),
                ("q", query),
                ("num", num.as_str()),
                ("fields", SEARCH_FIELDS),
            ])
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| send_error("search", e))?;

        if !response.status().is_success() {
            return Err(ToolError::execution_failed(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to parse search results: {}", e))
        })?;
        Ok(format_search(query, &body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockHttpServer;

    #[test]
    fn test_format_prefers_og_description() {
        let body = json!({
            "items": [
                {
                    "title": "Rust",
                    "snippet": "A language",
                    "link": "https://rust-lang.org",
                    "pagemap": {"metatags": [{"og:title": "Rust"}, {"og:description": "Reliable software"}]}
                },
                {"title": "Crates", "snippet": "Package registry", "link": "https://crates.io"}
            ]
        });

        let data = format_search("rust", &body);
        assert_eq!(data["query"], "rust");
        assert_eq!(data["abstract"], "Rust: Reliable software");
        assert_eq!(data["results"][0]["description"], "Reliable software");
        assert_eq!(data["results"][1]["description"], "Package registry");
        assert_eq!(data["results"][1]["url"], "https://crates.io");
    }

    #[test]
    fn test_format_without_items() {
        let data = format_search("nothing", &json!({}));
        assert_eq!(data["abstract"], "");
        assert!(data["results"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_request_parameters() {
        let server = MockHttpServer::start(vec![(
            200,
            r#"{"items": [{"title": "T", "snippet": "S", "link": "L"}]}"#.to_string(),
        )])
        .await;
        let tool = SearchTool::new(
            reqwest::Client::new(),
            Some("gkey".to_string()),
            Some("engine".to_string()),
        )
        .with_base_url(&server.url);

        let params = HashMap::from([(PARAM_QUERY.to_string(), "tokio".to_string())]);
        let data = tool.invoke(&params).await.unwrap();
        assert_eq!(data["abstract"], "T: S");

        let request = &server.requests()[0];
        assert!(request.contains("key=gkey"));
        assert!(request.contains("cx=engine"));
        assert!(request.contains("q=tokio"));
        assert!(request.contains("num=5"));
    }

    #[tokio::test]
    async fn test_error_status() {
        let server = MockHttpServer::start(vec![(403, "{}".to_string())]).await;
        let tool = SearchTool::new(
            reqwest::Client::new(),
            Some("gkey".to_string()),
            Some("engine".to_string()),
        )
        .with_base_url(&server.url);

        let params = HashMap::from([(PARAM_QUERY.to_string(), "x".to_string())]);
        let err = tool.invoke(&params).await.unwrap_err();
        assert!(err.message.contains("403"));
    }

    #[tokio::test]
    async fn test_missing_engine_id() {
        let tool = SearchTool::new(reqwest::Client::new(), Some("gkey".to_string()), None);
        let params = HashMap::from([(PARAM_QUERY.to_string(), "x".to_string())]);
        let err = tool.invoke(&params).await.unwrap_err();
        assert!(err.message.contains("GOOGLE_CSE_ID"));
    }
}
