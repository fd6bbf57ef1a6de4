//! Tool domain value objects (immutable result and error types)
//!
//! Every dispatched command produces exactly one [`ToolResult`], including
//! commands that were rejected, timed out, or panicked. Aggregation logic
//! therefore always has a uniform item to inspect.

use serde::{Deserialize, Serialize};

/// Native output of a tool: a JSON object.
pub type ToolData = serde_json::Map<String, serde_json::Value>;

/// Error raised by a tool client.
///
/// | Code | Description |
/// |------|-------------|
/// | `NOT_ALLOWED` | Command name outside the allow-list |
/// | `INVALID_ARGUMENT` | Missing or unusable parameter |
/// | `EXECUTION_FAILED` | HTTP error, bad payload, missing credentials |
/// | `TIMEOUT` | The call exceeded its own timeout |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_ALLOWED", "TIMEOUT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ToolError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn not_allowed(command: &str, allowed: &[&str]) -> Self {
        Self::new(
            "NOT_ALLOWED",
            format!(
                "Command {} not allowed. Allowed commands: {}",
                command,
                allowed.join(", ")
            ),
        )
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new("INVALID_ARGUMENT", message)
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new("EXECUTION_FAILED", message)
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            "TIMEOUT",
            format!("Operation timed out: {}", operation.into()),
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ToolError {}

/// Result of one tool invocation.
///
/// `data` is meaningful when `success` is true, `error` when it is false.
/// Both are always present structurally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Command name as it was requested
    pub command: String,
    pub success: bool,
    #[serde(default)]
    pub data: ToolData,
    #[serde(default)]
    pub error: Option<String>,
}

impl ToolResult {
    pub fn success(command: impl Into<String>, data: ToolData) -> Self {
        Self {
            command: command.into(),
            success: true,
            data,
            error: None,
        }
    }

    pub fn failure(command: impl Into<String>, error: ToolError) -> Self {
        Self {
            command: command.into(),
            success: false,
            data: ToolData::new(),
            error: Some(error.message),
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Consume the result, keeping the data only on success.
    pub fn into_data(self) -> Option<ToolData> {
        self.success.then_some(self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_allowed_lists_commands() {
        let err = ToolError::not_allowed("shell", &["search", "help"]);
        assert_eq!(err.code, "NOT_ALLOWED");
        assert!(err.message.contains("shell"));
        assert!(err.message.contains("search, help"));
    }

    #[test]
    fn test_tool_result_success() {
        let mut data = ToolData::new();
        data.insert("temperature".to_string(), serde_json::json!(12.5));
        let result = ToolResult::success("weather", data);

        assert!(result.is_success());
        assert!(result.error().is_none());
        assert_eq!(result.data["temperature"], 12.5);
    }

    #[test]
    fn test_tool_result_failure_keeps_message_only() {
        let result = ToolResult::failure("news", ToolError::timeout("news request"));

        assert!(!result.is_success());
        assert!(result.data.is_empty());
        assert_eq!(result.error(), Some("Operation timed out: news request"));
        assert!(result.into_data().is_none());
    }

    #[test]
    fn test_tool_result_serializes_all_fields() {
        let json = serde_json::to_value(ToolResult::failure(
            "time",
            ToolError::invalid_argument("Unknown timezone: Mars/Base"),
        ))
        .unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["data"], serde_json::json!({}));
        assert_eq!(json["error"], "Unknown timezone: Mars/Base");
    }
}
