//! Configuration loader for Parley.
//!
//! Reads `parley.toml` and deserializes it into [`ParleyConfig`]. Falls back
//! to defaults when the file is missing or malformed.

use std::path::Path;

use parley_types::config::ParleyConfig;
use parley_types::error::ConfigError;

/// File name used when neither `--config` nor `PARLEY_CONFIG` is given.
pub const DEFAULT_CONFIG_FILE: &str = "parley.toml";

/// Load configuration from `path`.
///
/// - If the file does not exist, returns [`ParleyConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(path: &Path) -> ParleyConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config found at {}, using defaults", path.display());
            return ParleyConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ParleyConfig::default();
        }
    };

    match toml::from_str::<ParleyConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ParleyConfig::default()
        }
    }
}

/// Reject values that would make the server unusable.
pub fn validate_config(config: &ParleyConfig) -> Result<(), ConfigError> {
    if config.provider.model.trim().is_empty() {
        return Err(ConfigError::Invalid("provider.model must not be empty".to_string()));
    }
    if config.provider.timeout_secs == 0 {
        return Err(ConfigError::Invalid(
            "provider.timeout_secs must be greater than zero".to_string(),
        ));
    }
    if let Some(t) = config.provider.temperature {
        if !(0.0..=2.0).contains(&t) {
            return Err(ConfigError::Invalid(format!(
                "provider.temperature must be between 0.0 and 2.0, got {t}"
            )));
        }
    }
    if config.sessions.idle_ttl_secs == Some(0) {
        return Err(ConfigError::Invalid(
            "sessions.idle_ttl_secs must be greater than zero when set".to_string(),
        ));
    }
    if config.sessions.sweep_interval_secs == 0 {
        return Err(ConfigError::Invalid(
            "sessions.sweep_interval_secs must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
