//! Configuration loading for concierge
//!
//! Sources are merged lowest to highest priority:
//!
//! 1. Built-in defaults
//! 2. Global: `$XDG_CONFIG_HOME/concierge/config.toml`
//! 3. Project root: `./concierge.toml` or `./.concierge.toml`
//! 4. `--config <path>`
//! 5. `CONCIERGE_` environment variables (`CONCIERGE_MODEL__API_URL`)
//!
//! Credentials may also come from the plain variable each setting names in
//! its `*_env` field (`LLM_API_KEY`, `WEATHER_API_KEY`, ...).

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    FileBehaviorConfig, FileConfig, FileDefaultsConfig, FileModelConfig, FileToolsConfig,
    ToolKeys, env_lookup,
};
pub use loader::ConfigLoader;
