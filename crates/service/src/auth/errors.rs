use thiserror::Error;

/// Business errors for auth workflows
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing username or password")]
    MissingCredentials,
    #[error("user not found")]
    UserNotFound,
    #[error("password is incorrect")]
    IncorrectPassword,
    #[error("authorization header not present")]
    MissingHeader,
    #[error("authorization header is invalid")]
    InvalidHeader,
    #[error("token expired")]
    Expired,
    #[error("token invalid")]
    InvalidToken,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenError(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::MissingCredentials => 1001,
            AuthError::UserNotFound => 1003,
            AuthError::IncorrectPassword => 1004,
            AuthError::MissingHeader => 1005,
            AuthError::InvalidHeader => 1006,
            AuthError::Expired => 1007,
            AuthError::InvalidToken => 1008,
            AuthError::HashError(_) => 1101,
            AuthError::TokenError(_) => 1102,
        }
    }

    /// Client-facing reason text; `None` for internal failures.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            AuthError::MissingCredentials => Some("Missing username or password."),
            AuthError::UserNotFound => Some("User not found."),
            AuthError::IncorrectPassword => Some("Password is incorrect."),
            AuthError::MissingHeader => Some("Authorization header not present."),
            AuthError::InvalidHeader => Some("Authorization header is invalid."),
            AuthError::Expired => Some("Signature has expired."),
            AuthError::InvalidToken => Some("Auth required."),
            AuthError::HashError(_) | AuthError::TokenError(_) => None,
        }
    }
}
