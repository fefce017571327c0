//! `parley check`: validate configuration and probe the model provider.

use std::path::Path;

use anyhow::Result;
use console::style;

use parley_infra::llm::test_provider_connection;
use parley_types::llm::LlmError;

use crate::state::{build_provider, load_resolved_config};

/// Load config, resolve the API key, and send a one-word test prompt.
pub async fn check(config_path: &Path, json: bool) -> Result<()> {
    let config = load_resolved_config(config_path).await?;
    let provider = build_provider(&config)?;

    if !json {
        print!(
            "  Testing connection to {} ({})... ",
            style(provider.name()).cyan(),
            provider.model()
        );
    }

    match test_provider_connection(&provider).await {
        Ok(reply) => {
            if json {
                let ok = serde_json::json!({
                    "status": "connected",
                    "provider": provider.name(),
                    "model": provider.model(),
                    "reply": reply,
                });
                println!("{}", serde_json::to_string_pretty(&ok)?);
            } else {
                println!("{}", style("connected").green().bold());
                println!("  {} {}", style("Reply:").dim(), reply);
            }
            Ok(())
        }
        Err(e) => {
            if json {
                let err = serde_json::json!({
                    "status": "failed",
                    "provider": provider.name(),
                    "model": provider.model(),
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                println!("{}", style("FAILED").red().bold());
            }
            Err(connection_error(provider.name(), e))
        }
    }
}

/// The single error reported once `main` returns.
fn connection_error(provider: &str, error: LlmError) -> anyhow::Error {
    anyhow::Error::new(error).context(format!("connection check failed for provider '{provider}'"))
}
