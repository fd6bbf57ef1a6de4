//! Domain layer for concierge
//!
//! This crate contains the core types and pure logic of the request
//! pipeline. It performs no I/O.
//!
//! # Core Concepts
//!
//! ## Plan
//!
//! The model is asked which tools a request needs. Its reply is recovered
//! into JSON ([`structured`]) and validated into a [`Plan`] of
//! [`ToolCommand`]s drawn from the closed [`Command`] set.
//!
//! ## Draft and enrichment
//!
//! After the plan runs, the model drafts an answer ([`DraftAnalysis`]) and
//! may request follow-up searches, whose successful results become
//! [`EnrichmentItem`]s for the final answer.

pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod providers;
pub mod session;
pub mod structured;
pub mod tool;

// Re-export commonly used types
pub use core::{error::DomainError, location::UserLocation};
pub use orchestration::{
    entities::Phase,
    value_objects::{AgentReply, DraftAnalysis, EnrichmentItem, ToolOutput},
};
pub use prompt::PromptTemplate;
pub use providers::{ProviderKind, ResponseFormatError};
pub use session::{ChatMessage, ChatRequest, Role};
pub use structured::{
    StructuredOutputError, draft_schema, parse_draft, parse_plan, plan_schema, recover_json_values,
};
pub use tool::{
    Command, Plan, ToolCommand, ToolData, ToolDefaults, ToolError, ToolProvider, ToolResult,
    entities::{PARAM_LOCATION, PARAM_QUERY, PARAM_TIMEZONE, PARAM_TOPIC},
};
