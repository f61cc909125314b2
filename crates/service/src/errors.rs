use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Resource with id {0} was not found")]
    NotFound(String),
}

impl ServiceError {
    pub fn not_found(id: impl Into<String>) -> Self { Self::NotFound(id.into()) }
}
