//! Tool domain module
//!
//! Defines the closed command surface the planner may propose and the
//! dispatcher will execute.
//!
//! # Overview
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ Command      │───▶│ ToolCommand  │───▶│ ToolResult   │
//! │ (allow-list) │    │ (invocation) │    │ (output)     │
//! └──────────────┘    └──────┬───────┘    └──────────────┘
//!                            │
//!                            └─ params merged over ToolDefaults
//! ```
//!
//! The same [`Command`] enumeration renders the planner's tool catalog and
//! validates names at dispatch time, so a name the model invents can never
//! reach a tool.
//!
//! # Key Types
//!
//! - [`Command`] — the allow-list (`search`, `news`, `weather`, `time`, `help`)
//! - [`ToolCommand`] — a raw `{command, params}` pair produced by the planner
//! - [`Plan`] — ordered list of tool commands for one request
//! - [`ToolResult`] — uniform success/failure value, never an error type
//! - [`ToolDefaults`] — per-command default parameters
//! - [`ToolProvider`] — async trait implemented by each external tool client

pub mod defaults;
pub mod entities;
pub mod provider;
pub mod value_objects;

pub use defaults::{DEFAULT_NEWS_TOPIC, DEFAULT_SEARCH_QUERY, ToolDefaults};
pub use entities::{
    Command, PARAM_LOCATION, PARAM_QUERY, PARAM_TIMEZONE, PARAM_TOPIC, Plan, ToolCommand,
};
pub use provider::ToolProvider;
pub use value_objects::{ToolData, ToolError, ToolResult};
