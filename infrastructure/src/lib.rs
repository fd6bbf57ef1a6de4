//! Infrastructure layer for concierge
//!
//! Adapters behind the application ports: the HTTP model gateway with its
//! rate limiter, the tool dispatcher and tool API clients, IP geolocation,
//! and configuration file loading.

pub mod config;
pub mod llm;
pub mod location;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{ConfigError, ConfigLoader, FileConfig, env_lookup};
pub use llm::{HttpLlmGateway, ModelEndpoint, RateLimiter};
pub use location::LocationResolver;
pub use tools::{ToolRegistry, build_registry, http_client};
