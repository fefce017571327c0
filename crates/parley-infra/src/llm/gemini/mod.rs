//! Google Gemini provider using the native `generateContent` REST API.

pub mod client;
pub mod types;

pub use client::GeminiProvider;
