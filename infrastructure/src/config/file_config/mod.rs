//! Raw TOML configuration data types
//!
//! These structs mirror the config file. Conversion into runtime types
//! (endpoints, execution parameters, defaults) happens here so the binary
//! only wires results together.

mod behavior;
mod defaults;
mod model;
mod tools;

pub use behavior::FileBehaviorConfig;
pub use defaults::FileDefaultsConfig;
pub use model::FileModelConfig;
pub use tools::{FileToolsConfig, ToolKeys};

use super::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Model endpoint and rate limit
    pub model: FileModelConfig,
    /// Tool API credentials, endpoints and timeouts
    pub tools: FileToolsConfig,
    /// Per-command default parameters and fallback location
    pub defaults: FileDefaultsConfig,
    /// Temperatures and presentation
    pub behavior: FileBehaviorConfig,
}

impl FileConfig {
    /// Check value ranges. Credentials are checked when they are resolved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.behavior.validate()?;
        self.tools.validate()?;
        if self.model.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "model.timeout_seconds cannot be 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Read a process environment variable.
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Direct value if non-empty, otherwise the named environment variable.
pub(crate) fn resolve_setting(
    value: Option<&str>,
    env: &str,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> Option<String> {
    let non_empty = |s: &str| !s.trim().is_empty();
    match value {
        Some(v) if non_empty(v) => Some(v.trim().to_string()),
        _ => lookup(env)
            .filter(|v| non_empty(v))
            .map(|v| v.trim().to_string()),
    }
}
