use thiserror::Error;

/// Errors raised while resolving configuration at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API key not found: set the {0} environment variable")]
    MissingApiKey(String),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
