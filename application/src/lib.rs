//! Application layer for concierge
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    tool_executor::ToolExecutorPort,
};
pub use use_cases::answer_request::{AnswerRequestError, AnswerRequestInput, AnswerRequestUseCase};
pub use use_cases::structured_output::{StructuredOutputParser, StructuredRequestError};
