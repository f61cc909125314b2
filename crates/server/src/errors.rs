use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{MessageBody, ReasonsBody};
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// HTTP-facing error. Authentication failures render `{"reasons": [...]}`,
/// everything else renders `{"message": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Service(#[from] ServiceError),
    /// Reported as 500, not 405, for compatibility with existing clients.
    #[error("Method {method} not allowed for URL {url}")]
    MethodNotAllowed { method: Method, url: String },
    #[error("Requested URL {0} not found")]
    UrlNotFound(String),
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn method_not_allowed(method: Method, url: impl Into<String>) -> Self {
        Self::MethodNotAllowed { method, url: url.into() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Auth(e) if e.reason().is_some() => StatusCode::UNAUTHORIZED,
            ApiError::Auth(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Service(ServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::UrlNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::Auth(e) => match e.reason() {
                Some(reason) => {
                    warn!(code = e.code(), %reason, "authentication rejected");
                    (status, Json(ReasonsBody::single(reason))).into_response()
                }
                None => {
                    error!(code = e.code(), error = %e, "auth internal failure");
                    (status, Json(MessageBody::new(e.to_string()))).into_response()
                }
            },
            _ => (status, Json(MessageBody::new(self.to_string()))).into_response(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("credential provisioning failed: {0}")]
    Credentials(#[from] AuthError),
}
