//! Business logic for Parley.
//!
//! Owns the in-memory conversation store, the prompt renderers, and the
//! `LlmProvider` port that infrastructure crates implement. Depends only on
//! `parley-types` -- never on `parley-infra` or any HTTP client crate.

pub mod conversation;
pub mod llm;
pub mod prompt;
