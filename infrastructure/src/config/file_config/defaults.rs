//! Default parameters (`[defaults]` section)
//!
//! ```toml
//! [defaults]
//! search_query = "latest news"
//! news_topic = "technology"
//! fallback_city = "London"
//! fallback_country = "UK"
//! fallback_timezone = "Europe/London"
//! ```

use concierge_domain::tool::{
    Command, DEFAULT_NEWS_TOPIC, DEFAULT_SEARCH_QUERY, PARAM_QUERY, PARAM_TOPIC,
};
use concierge_domain::{ToolDefaults, UserLocation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDefaultsConfig {
    pub search_query: String,
    pub news_topic: String,
    /// Used when IP geolocation is disabled or fails
    pub fallback_city: String,
    pub fallback_country: String,
    pub fallback_timezone: String,
}

impl Default for FileDefaultsConfig {
    fn default() -> Self {
        let fallback = UserLocation::fallback();
        Self {
            search_query: DEFAULT_SEARCH_QUERY.to_string(),
            news_topic: DEFAULT_NEWS_TOPIC.to_string(),
            fallback_city: fallback.city,
            fallback_country: fallback.country,
            fallback_timezone: fallback.timezone,
        }
    }
}

impl FileDefaultsConfig {
    pub fn fallback_location(&self) -> UserLocation {
        UserLocation::new(
            &self.fallback_city,
            &self.fallback_country,
            &self.fallback_timezone,
        )
    }

    /// Location-derived defaults with the configured query and topic.
    pub fn tool_defaults(&self, location: &UserLocation) -> ToolDefaults {
        ToolDefaults::for_location(location)
            .with_default(Command::Search, PARAM_QUERY, &self.search_query)
            .with_default(Command::News, PARAM_TOPIC, &self.news_topic)
    }
}
