//! Tool domain entities

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

/// Parameter key for `search`
pub const PARAM_QUERY: &str = "query";
/// Parameter key for `news`
pub const PARAM_TOPIC: &str = "topic";
/// Parameter key for `weather`
pub const PARAM_LOCATION: &str = "location";
/// Parameter key for `time`
pub const PARAM_TIMEZONE: &str = "timezone";

/// The closed set of commands the dispatcher accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Search,
    News,
    Weather,
    Time,
    Help,
}

impl Command {
    /// Every allowed command, in catalog order.
    pub const ALL: [Command; 5] = [
        Command::Search,
        Command::News,
        Command::Weather,
        Command::Time,
        Command::Help,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Search => "search",
            Command::News => "news",
            Command::Weather => "weather",
            Command::Time => "time",
            Command::Help => "help",
        }
    }

    /// Short description used in the help output and the planner catalog.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Search => "Search for information",
            Command::News => "Get latest news",
            Command::Weather => "Get weather information",
            Command::Time => "Get current time",
            Command::Help => "Show available commands",
        }
    }

    /// The single parameter this command reads, if any.
    pub fn primary_param(&self) -> Option<&'static str> {
        match self {
            Command::Search => Some(PARAM_QUERY),
            Command::News => Some(PARAM_TOPIC),
            Command::Weather => Some(PARAM_LOCATION),
            Command::Time => Some(PARAM_TIMEZONE),
            Command::Help => None,
        }
    }

    /// Names of all allowed commands.
    pub fn allowed_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|c| c.as_str()).collect()
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Command {
    type Err = DomainError;

    /// Exact, case-sensitive match against the allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCommand(s.to_string()))
    }
}

/// A tool invocation proposed by the planner.
///
/// The name is kept as the raw string the model produced; it is only
/// checked against [`Command`] when dispatched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolCommand {
    #[serde(rename = "command")]
    pub name: String,
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl ToolCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Resolve the name against the allow-list.
    pub fn command(&self) -> Result<Command, DomainError> {
        self.name.parse()
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(|s| s.as_str())
    }
}

impl From<Command> for ToolCommand {
    fn from(command: Command) -> Self {
        Self::new(command.as_str())
    }
}

impl std::fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.params.is_empty() {
            return write!(f, "{} {{}}", self.name);
        }
        let mut pairs: Vec<_> = self.params.iter().collect();
        pairs.sort();
        let rendered: Vec<String> = pairs.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        write!(f, "{} {{{}}}", self.name, rendered.join(", "))
    }
}

/// Ordered list of tool commands for a single request.
///
/// All commands run concurrently; order is kept for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Plan {
    commands: Vec<ToolCommand>,
}

impl Plan {
    pub fn new(commands: Vec<ToolCommand>) -> Self {
        Self { commands }
    }

    pub fn push(&mut self, command: ToolCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[ToolCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolCommand> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl<'a> IntoIterator for &'a Plan {
    type Item = &'a ToolCommand;
    type IntoIter = std::slice::Iter<'a, ToolCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl FromIterator<ToolCommand> for Plan {
    fn from_iter<I: IntoIterator<Item = ToolCommand>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_round_trip_names() {
        for command in Command::ALL {
            assert_eq!(command.as_str().parse::<Command>().unwrap(), command);
        }
    }

    #[test]
    fn test_command_parse_is_case_sensitive() {
        assert!("Weather".parse::<Command>().is_err());
        assert!("shell".parse::<Command>().is_err());
        assert!("".parse::<Command>().is_err());
    }

    #[test]
    fn test_allowed_names() {
        assert_eq!(
            Command::allowed_names(),
            vec!["search", "news", "weather", "time", "help"]
        );
    }

    #[test]
    fn test_help_has_no_primary_param() {
        assert_eq!(Command::Help.primary_param(), None);
        assert_eq!(Command::Weather.primary_param(), Some(PARAM_LOCATION));
    }

    #[test]
    fn test_tool_command_serializes_as_command_key() {
        let command = ToolCommand::new("weather").with_param("location", "London");
        let json = serde_json::to_value(&command).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"command": "weather", "params": {"location": "London"}})
        );
    }

    #[test]
    fn test_tool_command_unknown_name() {
        let command = ToolCommand::new("delete_everything");
        assert_eq!(
            command.command(),
            Err(DomainError::UnknownCommand("delete_everything".to_string()))
        );
    }

    #[test]
    fn test_tool_command_display_sorted() {
        let command = ToolCommand::new("weather")
            .with_param("units", "metric")
            .with_param("location", "Oslo");
        assert_eq!(command.to_string(), "weather {location=Oslo, units=metric}");
        assert_eq!(ToolCommand::new("help").to_string(), "help {}");
    }

    #[test]
    fn test_plan_preserves_order() {
        let plan: Plan = vec![ToolCommand::new("time"), ToolCommand::new("weather")]
            .into_iter()
            .collect();
        let names: Vec<_> = plan.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["time", "weather"]);
        assert_eq!(plan.len(), 2);
    }
}
