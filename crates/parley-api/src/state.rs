//! Application state wiring the conversation service together.
//!
//! AppState is constructed once per process and handed to the router; the
//! conversation store lives exactly as long as the state does.

use std::path::Path;
use std::sync::Arc;

use parley_core::conversation::service::{ConversationService, Sampling};
use parley_core::conversation::store::ConversationStore;
use parley_core::llm::box_provider::BoxLlmProvider;
use parley_infra::config::{load_config, validate_config};
use parley_infra::llm::create_provider;
use parley_infra::secret::require_api_key;
use parley_types::config::ParleyConfig;

/// Shared application state used by HTTP handlers and CLI commands.
#[derive(Clone)]
pub struct AppState {
    pub conversations: Arc<ConversationService>,
    pub config: Arc<ParleyConfig>,
}

impl AppState {
    /// Wire a fresh store and the given provider under `config`.
    pub fn new(config: ParleyConfig, provider: BoxLlmProvider) -> Self {
        let sampling = Sampling {
            temperature: config.provider.temperature,
            max_tokens: config.provider.max_output_tokens,
        };
        let service = ConversationService::new(Arc::new(ConversationStore::new()), provider)
            .with_sampling(sampling);

        Self {
            conversations: Arc::new(service),
            config: Arc::new(config),
        }
    }

    /// Load config from disk, resolve the API key, and build the provider.
    pub async fn init(config_path: &Path) -> anyhow::Result<Self> {
        let config = load_resolved_config(config_path).await?;
        let provider = build_provider(&config)?;
        Ok(Self::new(config, provider))
    }

    pub fn store(&self) -> &Arc<ConversationStore> {
        self.conversations.store()
    }
}

/// Load and validate configuration.
pub async fn load_resolved_config(config_path: &Path) -> anyhow::Result<ParleyConfig> {
    let config = load_config(config_path).await;
    validate_config(&config)?;
    Ok(config)
}

/// Build the configured provider with its API key from the environment.
pub fn build_provider(config: &ParleyConfig) -> anyhow::Result<BoxLlmProvider> {
    let api_key = require_api_key(&config.provider)?;
    let provider = create_provider(&config.provider, Some(api_key))?;
    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        "LLM provider ready"
    );
    Ok(provider)
}
