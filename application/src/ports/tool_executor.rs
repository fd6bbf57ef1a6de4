//! Tool Executor port
//!
//! Defines the interface for dispatching tool commands.

use async_trait::async_trait;
use concierge_domain::{ToolCommand, ToolResult};

/// Port for tool execution
///
/// Implementations must never fail: disallowed commands, transport errors,
/// and tool panics all come back as a failed [`ToolResult`].
#[async_trait]
pub trait ToolExecutorPort: Send + Sync {
    /// Execute one command
    async fn execute(&self, command: &ToolCommand) -> ToolResult;
}
