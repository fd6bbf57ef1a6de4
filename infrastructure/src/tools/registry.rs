//! Tool Registry
//!
//! The [`ToolRegistry`] is the dispatcher: it maps each allowed
//! [`Command`] to a [`ToolProvider`] and implements [`ToolExecutorPort`].
//!
//! # Usage
//!
//! ```ignore
//! use concierge_infrastructure::tools::{HelpTool, TimeTool, ToolRegistry};
//!
//! let registry = ToolRegistry::new(defaults.clone())
//!     .register(HelpTool::new(defaults))
//!     .register(TimeTool::new(location));
//!
//! let result = registry.execute(&ToolCommand::new("time")).await;
//! ```
//!
//! # Dispatch rules
//!
//! 1. Names outside the allow-list fail with `NOT_ALLOWED`; nothing is invoked
//! 2. Caller params are overlaid on the command's defaults
//! 3. Provider errors and panics become a failed [`ToolResult`]

use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use concierge_application::ports::tool_executor::ToolExecutorPort;
use concierge_domain::tool::{
    Command, ToolCommand, ToolDefaults, ToolError, ToolProvider, ToolResult,
};
use futures::FutureExt;

/// Dispatcher over one provider per command
pub struct ToolRegistry {
    providers: HashMap<Command, Arc<dyn ToolProvider>>,
    defaults: ToolDefaults,
}

impl ToolRegistry {
    /// Create a registry with no providers
    pub fn new(defaults: ToolDefaults) -> Self {
        Self {
            providers: HashMap::new(),
            defaults,
        }
    }

    /// Register a tool provider; a later provider for the same command wins
    pub fn register<P: ToolProvider + 'static>(self, provider: P) -> Self {
        self.register_arc(Arc::new(provider))
    }

    /// Register a tool provider (Arc version)
    pub fn register_arc(mut self, provider: Arc<dyn ToolProvider>) -> Self {
        tracing::debug!(command = %provider.command(), provider = provider.id(), "Registered tool");
        self.providers.insert(provider.command(), provider);
        self
    }

    pub fn defaults(&self) -> &ToolDefaults {
        &self.defaults
    }

    pub fn has_provider(&self, command: Command) -> bool {
        self.providers.contains_key(&command)
    }

    /// Commands with a registered provider, in catalog order
    pub fn commands(&self) -> Vec<Command> {
        Command::ALL
            .into_iter()
            .filter(|c| self.providers.contains_key(c))
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[async_trait]
impl ToolExecutorPort for ToolRegistry {
    async fn execute(&self, command: &ToolCommand) -> ToolResult {
        let parsed = match command.command() {
            Ok(parsed) => parsed,
            Err(_) => {
                tracing::warn!(command = %command.name, "Rejected command outside the allow-list");
                return ToolResult::failure(
                    &command.name,
                    ToolError::not_allowed(&command.name, &Command::allowed_names()),
                );
            }
        };

        let Some(provider) = self.providers.get(&parsed) else {
            return ToolResult::failure(
                &command.name,
                ToolError::execution_failed(format!("No tool registered for command {}", parsed)),
            );
        };

        let params = self.defaults.merge(parsed, &command.params);
        let started = Instant::now();

        let outcome = AssertUnwindSafe(provider.invoke(&params)).catch_unwind().await;
        let result = match outcome {
            Ok(Ok(data)) => ToolResult::success(&command.name, data),
            Ok(Err(e)) => {
                tracing::warn!(command = %parsed, error = %e, "Tool failed");
                ToolResult::failure(&command.name, e)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(command = %parsed, panic = %message, "Tool panicked");
                ToolResult::failure(
                    &command.name,
                    ToolError::execution_failed(format!("Tool {} panicked: {}", parsed, message)),
                )
            }
        };

        tracing::debug!(
            command = %parsed,
            success = result.is_success(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Tool finished"
        );
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::help::HelpTool;
    use concierge_domain::{ToolData, UserLocation};
    use futures::future::join_all;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Echoes its merged params back and counts invocations
    struct EchoTool {
        command: Command,
        calls: Arc<AtomicUsize>,
    }

    impl EchoTool {
        fn new(command: Command) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    command,
                    calls: Arc::clone(&calls),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl ToolProvider for EchoTool {
        fn command(&self) -> Command {
            self.command
        }

        async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(params
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().into()))
                .collect())
        }
    }

    struct FailingTool;

    #[async_trait]
    impl ToolProvider for FailingTool {
        fn command(&self) -> Command {
            Command::News
        }

        async fn invoke(&self, _params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
            Err(ToolError::execution_failed("News API key is invalid"))
        }
    }

    struct PanickingTool;

    #[async_trait]
    impl ToolProvider for PanickingTool {
        fn command(&self) -> Command {
            Command::Search
        }

        async fn invoke(&self, _params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
            panic!("index out of bounds")
        }
    }

    struct SlowTool(Command);

    #[async_trait]
    impl ToolProvider for SlowTool {
        fn command(&self) -> Command {
            self.0
        }

        async fn invoke(&self, _params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
            tokio::time::sleep(Duration::from_secs(1)).await;
            Ok(ToolData::new())
        }
    }

    fn defaults() -> ToolDefaults {
        ToolDefaults::for_location(&UserLocation::new("Paris", "France", "Europe/Paris"))
    }

    #[tokio::test]
    async fn test_disallowed_command_invokes_nothing() {
        let (weather, calls) = EchoTool::new(Command::Weather);
        let registry = ToolRegistry::new(defaults()).register(weather);

        for name in ["shell", "Weather", "", "rm -rf"] {
            let result = registry.execute(&ToolCommand::new(name)).await;
            assert!(!result.is_success());
            assert!(result.error().unwrap().contains("not allowed"));
            assert!(result.error().unwrap().contains("search, news, weather, time, help"));
        }
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_omitted_params_fall_back_to_defaults() {
        let (weather, calls) = EchoTool::new(Command::Weather);
        let registry = ToolRegistry::new(defaults()).register(weather);

        let result = registry.execute(&ToolCommand::new("weather")).await;
        assert!(result.is_success());
        assert_eq!(result.data["location"], "Paris, France");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_caller_params_override_defaults() {
        let (weather, _) = EchoTool::new(Command::Weather);
        let registry = ToolRegistry::new(defaults()).register(weather);

        let command = ToolCommand::new("weather")
            .with_param("location", "London")
            .with_param("units", "imperial");
        let result = registry.execute(&command).await;

        assert_eq!(result.data["location"], "London");
        assert_eq!(result.data["units"], "imperial");
    }

    #[tokio::test]
    async fn test_planned_empty_value_is_not_replaced_by_default() {
        let (weather, _) = EchoTool::new(Command::Weather);
        let registry = ToolRegistry::new(defaults()).register(weather);

        let plan = concierge_domain::parse_plan(&[serde_json::json!({
            "command": "weather",
            "params": {"location": ""}
        })])
        .unwrap();
        let result = registry.execute(&plan.commands()[0]).await;

        assert!(result.is_success());
        assert_eq!(result.data["location"], "");
    }

    #[tokio::test]
    async fn test_provider_error_becomes_failed_result() {
        let registry = ToolRegistry::new(defaults()).register(FailingTool);

        let result = registry.execute(&ToolCommand::new("news")).await;
        assert!(!result.is_success());
        assert_eq!(result.error(), Some("News API key is invalid"));
        assert_eq!(result.command, "news");
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let registry = ToolRegistry::new(defaults()).register(PanickingTool);

        let result = registry.execute(&ToolCommand::new("search")).await;
        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("index out of bounds"));
    }

    #[tokio::test]
    async fn test_missing_provider() {
        let registry = ToolRegistry::new(defaults());

        let result = registry.execute(&ToolCommand::new("time")).await;
        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("No tool registered"));
    }

    #[tokio::test]
    async fn test_help_reports_effective_defaults() {
        let registry = ToolRegistry::new(defaults()).register(HelpTool::new(defaults()));

        let result = registry.execute(&ToolCommand::new("help")).await;
        assert!(result.is_success());
        let commands = &result.data["available_commands"];
        assert_eq!(commands["weather"], "Get weather information (default: Paris, France)");
        assert_eq!(commands["help"], "Show available commands");
    }

    #[tokio::test(start_paused = true)]
    async fn test_batch_runs_concurrently() {
        let registry = ToolRegistry::new(defaults())
            .register(SlowTool(Command::Weather))
            .register(SlowTool(Command::News))
            .register(SlowTool(Command::Time));

        let commands = [
            ToolCommand::new("weather"),
            ToolCommand::new("news"),
            ToolCommand::new("time"),
        ];
        let start = tokio::time::Instant::now();
        let results = join_all(commands.iter().map(|c| registry.execute(c))).await;

        assert!(results.iter().all(|r| r.is_success()));
        assert!(start.elapsed() < Duration::from_secs(2));
    }

    #[test]
    fn test_commands_in_catalog_order() {
        let (time, _) = EchoTool::new(Command::Time);
        let (search, _) = EchoTool::new(Command::Search);
        let registry = ToolRegistry::new(defaults()).register(time).register(search);

        assert_eq!(registry.commands(), vec![Command::Search, Command::Time]);
        assert!(registry.has_provider(Command::Time));
        assert!(!registry.has_provider(Command::News));
    }
}
