//! Per-command default parameters
//!
//! Defaults fill only the keys a caller left out; caller values always win.

use std::collections::HashMap;

use super::entities::{Command, PARAM_LOCATION, PARAM_QUERY, PARAM_TIMEZONE, PARAM_TOPIC};
use crate::core::location::UserLocation;

/// Default query for `search`
pub const DEFAULT_SEARCH_QUERY: &str = "latest news";
/// Default topic for `news`
pub const DEFAULT_NEWS_TOPIC: &str = "technology";

/// Registered defaults, keyed by command.
#[derive(Debug, Clone, Default)]
pub struct ToolDefaults {
    params: HashMap<Command, HashMap<String, String>>,
}

impl ToolDefaults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard defaults derived from the user's location.
    pub fn for_location(location: &UserLocation) -> Self {
        Self::new()
            .with_default(Command::Search, PARAM_QUERY, DEFAULT_SEARCH_QUERY)
            .with_default(Command::News, PARAM_TOPIC, DEFAULT_NEWS_TOPIC)
            .with_default(Command::Weather, PARAM_LOCATION, location.display_name())
            .with_default(Command::Time, PARAM_TIMEZONE, location.timezone.clone())
    }

    /// Register a single default (builder pattern)
    pub fn with_default(
        mut self,
        command: Command,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.params
            .entry(command)
            .or_default()
            .insert(key.into(), value.into());
        self
    }

    pub fn get(&self, command: Command, key: &str) -> Option<&str> {
        self.params
            .get(&command)
            .and_then(|p| p.get(key))
            .map(|s| s.as_str())
    }

    /// Default for the command's primary parameter, if one is registered.
    pub fn primary(&self, command: Command) -> Option<&str> {
        command.primary_param().and_then(|key| self.get(command, key))
    }

    /// Overlay caller params on top of the command's defaults.
    pub fn merge(
        &self,
        command: Command,
        params: &HashMap<String, String>,
    ) -> HashMap<String, String> {
        let mut merged = self.params.get(&command).cloned().unwrap_or_default();
        for (key, value) in params {
            merged.insert(key.clone(), value.clone());
        }
        merged
    }
}
