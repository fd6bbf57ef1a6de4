//! LLM Gateway port
//!
//! Defines the interface for communicating with the model endpoint.

use async_trait::async_trait;
use concierge_domain::{ChatRequest, ResponseFormatError};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// Missing or unusable endpoint settings; fatal at startup
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("API request failed: {0}")]
    Transport(String),

    #[error("API request timed out after {0:?}")]
    Timeout(Duration),

    #[error("API request failed with status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error(transparent)]
    ResponseFormat(#[from] ResponseFormatError),
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to the model.
/// Implementations (adapters) live in the infrastructure layer and own
/// rate limiting, timeouts, and provider-specific response handling.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one chat request and return the reply text
    async fn chat(&self, request: &ChatRequest) -> Result<String, GatewayError>;
}
