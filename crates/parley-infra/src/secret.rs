//! API key resolution from the environment.
//!
//! Keys are never read from source or the config file: the config names an
//! environment variable and the value is wrapped in a [`SecretString`] as
//! soon as it is read.

use secrecy::SecretString;

use parley_types::config::ProviderConfig;
use parley_types::error::ConfigError;

/// Read `var` from the environment. Missing, empty or non-Unicode values
/// resolve to `None`.
pub fn api_key_from_env(var: &str) -> Option<SecretString> {
    match std::env::var(var) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        _ => None,
    }
}

/// Resolve the API key for a provider, failing with the variable name to set.
pub fn require_api_key(config: &ProviderConfig) -> Result<SecretString, ConfigError> {
    api_key_from_env(&config.api_key_env)
        .ok_or_else(|| ConfigError::MissingApiKey(config.api_key_env.clone()))
}
