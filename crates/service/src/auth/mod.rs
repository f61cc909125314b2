//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Accounts are provisioned from configuration; there is no self-registration.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;

pub use service::AuthService;
