//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Command {0} not allowed")]
    UnknownCommand(String),

    #[error("Invalid plan: {0}")]
    InvalidPlan(String),

    #[error("Invalid draft analysis: {0}")]
    InvalidDraft(String),
}
