//! Console output formatter for agent replies

use crate::cli::commands::OutputFormat;
use colored::Colorize;
use concierge_domain::AgentReply;

/// Formats replies for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    pub fn format(reply: &AgentReply, format: OutputFormat) -> String {
        match format {
            OutputFormat::Text => Self::format_text(reply),
            OutputFormat::Json => Self::format_json(reply),
        }
    }

    /// The answer, or `Error(s) occurred: ...` for an aborted request.
    pub fn format_text(reply: &AgentReply) -> String {
        if reply.is_aborted() {
            reply.message().red().to_string()
        } else {
            reply.message()
        }
    }

    pub fn format_json(reply: &AgentReply) -> String {
        serde_json::to_string_pretty(reply)
            .unwrap_or_else(|e| format!(r#"{{"error": "Failed to serialize reply: {}"}}"#, e))
    }

    /// Request-level failure line
    pub fn format_error(error: &dyn std::fmt::Display) -> String {
        format!("{} {}", "Error:".red().bold(), error)
    }
}
