//! Per-session conversation history and the chat/report orchestration
//! built on top of it.

pub mod retention;
pub mod service;
pub mod store;
