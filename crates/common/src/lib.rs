//! Shared building blocks for the poly-data workspace.
//!
//! - `types`: small response payloads reused by the HTTP layer
//! - `utils::logging`: tracing subscriber initialisation

pub mod types;
pub mod utils;
