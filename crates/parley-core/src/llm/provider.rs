//! LlmProvider trait definition.
//!
//! This is the core abstraction that all text-generation backends implement.
//! Uses RPITIT for `complete`; `BoxLlmProvider` supplies dynamic dispatch.

use parley_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Gemini, OpenAI-compatible, etc.).
///
/// Treated as an opaque collaborator: a rendered prompt goes in, generated
/// text or a typed [`LlmError`] comes out. Implementations live in
/// `parley-infra`.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "gemini", "openai").
    fn name(&self) -> &str;

    /// Model used when a request leaves `model` empty.
    fn model(&self) -> &str;

    /// Send a completion request and receive the full response.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}
