//! Tool provider abstraction
//!
//! Each external tool client (weather, news, search, time) implements
//! [`ToolProvider`] and is registered with the dispatcher under the
//! [`Command`] it serves.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                ToolRegistry (dispatcher)                    │
//! │  (allow-list check, default merge, panic capture)           │
//! └─────────────────────────────────────────────────────────────┘
//!           │              │              │              │
//!           ▼              ▼              ▼              ▼
//!    ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!    │ Weather  │   │   News   │   │  Search  │   │   Time   │
//!    └──────────┘   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! Providers receive parameters that have already been merged with the
//! per-command defaults; they return their native JSON object or a
//! [`ToolError`]. Wrapping into a [`ToolResult`](super::ToolResult) is the
//! dispatcher's job.

use async_trait::async_trait;
use std::collections::HashMap;

use super::entities::Command;
use super::value_objects::{ToolData, ToolError};

/// An external tool reachable through one command.
#[async_trait]
pub trait ToolProvider: Send + Sync {
    /// The command this provider serves
    fn command(&self) -> Command;

    /// Identifier for logs
    fn id(&self) -> &str {
        self.command().as_str()
    }

    /// Invoke the tool with merged parameters.
    async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoProvider;

    #[async_trait]
    impl ToolProvider for EchoProvider {
        fn command(&self) -> Command {
            Command::Search
        }

        async fn invoke(&self, params: &HashMap<String, String>) -> Result<ToolData, ToolError> {
            let query = params
                .get("query")
                .ok_or_else(|| ToolError::invalid_argument("query is required"))?;
            let mut data = ToolData::new();
            data.insert("query".to_string(), serde_json::json!(query));
            Ok(data)
        }
    }

    #[tokio::test]
    async fn test_provider_invoke() {
        let provider = EchoProvider;
        let params = HashMap::from([("query".to_string(), "rust".to_string())]);

        let data = provider.invoke(&params).await.unwrap();
        assert_eq!(data["query"], "rust");
    }

    #[tokio::test]
    async fn test_provider_missing_param() {
        let err = EchoProvider.invoke(&HashMap::new()).await.unwrap_err();
        assert_eq!(err.code, "INVALID_ARGUMENT");
    }

    #[test]
    fn test_provider_default_id() {
        assert_eq!(EchoProvider.id(), "search");
    }
}
