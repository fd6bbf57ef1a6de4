//! `help` tool: static description of every command and its default.

use std::collections::HashMap;

use async_trait::async_trait;
use concierge_domain::tool::{Command, ToolData, ToolDefaults, ToolError, ToolProvider};
use serde_json::Value;

pub struct HelpTool {
    defaults: ToolDefaults,
}

impl HelpTool {
    pub fn new(defaults: ToolDefaults) -> Self {
        Self { defaults }
    }

    fn describe(&self) -> ToolData {
        let commands: serde_json::Map<String, Value> = Command::ALL
            .into_iter()
            .map(|command| {
                let text = match self.defaults.primary(command) {
                    Some(default) => format!("{} (default: {})", command.description(), default),
                    None => command.description().to_string(),
                };
                (command.as_str().to_string(), Value::String(text))
            })
            .collect();

        let mut data = ToolData::new();
        data.insert("available_commands".to_string(), Value::Object(commands));
        data
    }
}

#[async_trait]
impl ToolProvider for HelpTool {
    fn command(&self) -> Command {
        Command::Help
    }

    async fn invoke(&self, _params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
        Ok(self.describe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use concierge_domain::UserLocation;

    #[tokio::test]
    async fn test_lists_every_command_with_default() {
        let defaults = ToolDefaults::for_location(&UserLocation::fallback());
        let data = HelpTool::new(defaults).invoke(&HashMap::new()).await.unwrap();
        let commands = data["available_commands"].as_object().unwrap();

        assert_eq!(commands.len(), Command::ALL.len());
        assert_eq!(commands["search"], "Search for information (default: latest news)");
        assert_eq!(commands["news"], "Get latest news (default: technology)");
        assert_eq!(commands["weather"], "Get weather information (default: London, UK)");
        assert_eq!(commands["time"], "Get current time (default: Europe/London)");
        assert_eq!(commands["help"], "Show available commands");
    }

    #[tokio::test]
    async fn test_without_defaults() {
        let data = HelpTool::new(ToolDefaults::new()).invoke(&HashMap::new()).await.unwrap();
        assert_eq!(data["available_commands"]["news"], "Get latest news");
    }
}
