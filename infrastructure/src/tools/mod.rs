//! Tool clients and the dispatcher
//!
//! - `weather`: OpenWeatherMap current conditions
//! - `news`: NewsAPI top headlines
//! - `search`: Google Custom Search
//! - `time`: local clock, no network
//! - `help`: command catalog with effective defaults
//!
//! [`build_registry`] wires every client into a [`ToolRegistry`] from the
//! loaded configuration.

pub mod help;
pub mod news;
pub mod search;
pub mod time;
pub mod weather;

mod registry;

pub use help::HelpTool;
pub use news::NewsTool;
pub use registry::ToolRegistry;
pub use search::SearchTool;
pub use time::TimeTool;
pub use weather::WeatherTool;

use std::sync::Arc;

use concierge_domain::tool::{ToolDefaults, ToolError};

use crate::config::{ConfigError, FileToolsConfig};
use crate::location::LocationResolver;

/// A configured credential, or a tool failure naming where to set it.
pub(crate) fn require_key<'a>(key: Option<&'a str>, env: &str) -> Result<&'a str, ToolError> {
    key.filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ToolError::execution_failed(format!("{} is not configured", env)))
}

pub(crate) fn send_error(operation: &str, error: reqwest::Error) -> ToolError {
    if error.is_timeout() {
        ToolError::timeout(format!("{} request", operation))
    } else {
        ToolError::execution_failed(format!("{} request failed: {}", operation, error))
    }
}

/// Shared HTTP client for tool calls. Timeouts are set per request.
pub fn http_client() -> Result<reqwest::Client, ConfigError> {
    reqwest::Client::builder()
        .user_agent(concat!("concierge/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ConfigError::HttpClient(e.to_string()))
}

/// Register every tool client. Missing API keys surface when the tool runs.
pub fn build_registry(
    config: &FileToolsConfig,
    defaults: ToolDefaults,
    location: Arc<LocationResolver>,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Result<ToolRegistry, ConfigError> {
    let client = http_client()?;
    let keys = config.keys_with(lookup);

    let weather = WeatherTool::new(client.clone(), keys.weather)
        .with_base_url(&config.weather_url)
        .with_timeout(config.weather_timeout())
        .with_retries(config.weather_retries);
    let news = NewsTool::new(client.clone(), keys.news)
        .with_base_url(&config.news_url)
        .with_timeout(config.news_timeout());
    let search = SearchTool::new(client, keys.google, keys.google_cse_id)
        .with_base_url(&config.search_url)
        .with_timeout(config.search_timeout())
        .with_results(config.search_results);

    Ok(ToolRegistry::new(defaults.clone())
        .register(weather)
        .register(news)
        .register(search)
        .register(TimeTool::new(location))
        .register(HelpTool::new(defaults)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::tool::Command;
    use concierge_domain::UserLocation;

    #[test]
    fn test_require_key() {
        assert_eq!(require_key(Some("abc"), "X_KEY").unwrap(), "abc");
        let err = require_key(Some("  "), "X_KEY").unwrap_err();
        assert_eq!(err.message, "X_KEY is not configured");
        assert!(require_key(None, "X_KEY").is_err());
    }

    #[test]
    fn test_build_registry_covers_every_command() {
        let location = UserLocation::fallback();
        let registry = build_registry(
            &FileToolsConfig::default(),
            ToolDefaults::for_location(&location),
            Arc::new(LocationResolver::fixed(location)),
            &|_| None,
        )
        .unwrap();

        for command in Command::ALL {
            assert!(registry.has_provider(command), "missing {}", command.as_str());
        }
    }
}
