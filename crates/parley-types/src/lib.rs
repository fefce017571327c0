//! Shared domain types for Parley.
//!
//! This crate contains the types used across the Parley workspace:
//! conversation turns, LLM request/response shapes, configuration,
//! and their associated error types.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod conversation;
pub mod error;
pub mod llm;
