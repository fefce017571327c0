//! HTTP layer for Parley.
//!
//! JSON endpoints under `/api/`, a `/health` probe, and the static landing
//! page served from the configured web directory.

pub mod error;
pub mod handlers;
pub mod router;
