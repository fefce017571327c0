//! LLM provider implementations.
//!
//! Contains the concrete [`LlmProvider`](parley_core::llm::provider::LlmProvider)
//! implementations plus a factory ([`create_provider`]) that builds the right
//! one from a [`ProviderConfig`], and a connectivity probe
//! ([`test_provider_connection`]) used by `parley check`.

pub mod gemini;
pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;

use parley_core::llm::box_provider::BoxLlmProvider;
use parley_types::config::ProviderConfig;
use parley_types::llm::{CompletionRequest, LlmError, ProviderType};

use self::gemini::GeminiProvider;
use self::openai_compat::{OPENAI_BASE_URL, OpenAiCompatibleProvider};

/// Create a [`BoxLlmProvider`] from a [`ProviderConfig`].
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] if no API key is supplied.
pub fn create_provider(
    config: &ProviderConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;
    let timeout = Duration::from_secs(config.timeout_secs);

    let provider = match config.provider_type {
        ProviderType::Gemini => {
            let mut provider = GeminiProvider::new(key, config.model.clone(), timeout)?
                .with_name(config.name.clone());
            if let Some(base_url) = config.base_url.as_deref() {
                provider = provider.with_base_url(base_url);
            }
            BoxLlmProvider::new(provider)
        }
        ProviderType::OpenAiCompatible => {
            let base_url = config.base_url.as_deref().unwrap_or(OPENAI_BASE_URL);
            BoxLlmProvider::new(OpenAiCompatibleProvider::new(
                config.name.clone(),
                base_url,
                &key,
                config.model.clone(),
                timeout,
            ))
        }
    };

    tracing::debug!(
        provider = provider.name(),
        model = provider.model(),
        "created LLM provider"
    );

    Ok(provider)
}

/// Test provider connectivity with a minimal prompt.
pub async fn test_provider_connection(provider: &BoxLlmProvider) -> Result<String, LlmError> {
    let request = CompletionRequest {
        model: String::new(),
        prompt: "Reply with the single word: ready".to_string(),
        max_tokens: Some(10),
        temperature: Some(0.0),
    };
    let response = provider.complete(&request).await?;
    Ok(response.content.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> Option<SecretString> {
        Some(SecretString::from("test-key".to_string()))
    }

    #[test]
    fn test_create_provider_gemini_default() {
        let config = ProviderConfig::default();
        let provider = create_provider(&config, key()).unwrap();
        assert_eq!(provider.name(), "gemini");
        assert_eq!(provider.model(), "gemini-1.5-flash");
    }

    #[test]
    fn test_create_provider_openai_compatible() {
        let config = ProviderConfig {
            name: "mistral".to_string(),
            provider_type: ProviderType::OpenAiCompatible,
            model: "mistral-small-latest".to_string(),
            base_url: Some("https://api.mistral.ai/v1".to_string()),
            api_key_env: "MISTRAL_API_KEY".to_string(),
            ..ProviderConfig::default()
        };
        let provider = create_provider(&config, key()).unwrap();
        assert_eq!(provider.name(), "mistral");
        assert_eq!(provider.model(), "mistral-small-latest");
    }

    #[test]
    fn test_create_provider_missing_key() {
        let result = create_provider(&ProviderConfig::default(), None);
        match result {
            Err(LlmError::AuthenticationFailed) => {}
            Err(other) => panic!("Expected AuthenticationFailed, got: {other}"),
            Ok(_) => panic!("Expected error but got Ok"),
        }
    }
}
