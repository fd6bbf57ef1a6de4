use thiserror::Error;

/// Configuration errors, reported at startup before any request is made.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    #[error("{field} is not configured (set it in the config file or the {env} environment variable)")]
    Missing { field: &'static str, env: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}
