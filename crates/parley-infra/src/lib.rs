//! Infrastructure layer for Parley.
//!
//! Contains the concrete [`LlmProvider`](parley_core::llm::provider::LlmProvider)
//! implementations, configuration file loading, and API key resolution.

pub mod config;
pub mod llm;
pub mod secret;
