//! Service layer for the poly-data API.
//! - Keeps business rules independent of the HTTP framework.
//! - `auth`: credential checks and bearer token issuance/verification.
//! - `poly`: the in-memory poly-data collection.

pub mod errors;
pub mod auth;
pub mod poly;
