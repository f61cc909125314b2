use std::sync::Arc;

use argon2::{password_hash::PasswordVerifier, Argon2, PasswordHash};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header as JwtHeader, Validation,
};
use tracing::{debug, info, instrument};

use super::domain::{AuthSession, Claims, LoginInput};
use super::errors::AuthError;
use super::repository::CredentialRepository;

const BEARER_PREFIX: &str = "Bearer ";

/// Auth service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl_secs: u64,
}

/// Auth business service independent of web framework
pub struct AuthService<R: CredentialRepository> {
    repo: Arc<R>,
    cfg: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl<R: CredentialRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(cfg.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(cfg.jwt_secret.as_bytes());
        Self { repo, cfg, encoding_key, decoding_key }
    }

    /// Authenticate a user and issue an access token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{service::{AuthService, AuthConfig}, repository::memory::InMemoryCredentialRepository};
    /// use service::auth::domain::LoginInput;
    /// use std::sync::Arc;
    /// let repo = Arc::new(InMemoryCredentialRepository::new());
    /// tokio_test::block_on(repo.insert_password("test", "1234")).unwrap();
    /// let svc = AuthService::new(repo, AuthConfig { jwt_secret: "secret".into(), token_ttl_secs: 60 });
    /// let session = tokio_test::block_on(svc.login(LoginInput::new("test", "1234"))).unwrap();
    /// assert_eq!(session.username, "test");
    /// assert!(!session.access_token.is_empty());
    /// ```
    #[instrument(skip(self, input), fields(username = input.username.as_deref().unwrap_or("")))]
    pub async fn login(&self, input: LoginInput) -> Result<AuthSession, AuthError> {
        let (username, password) = match (input.username, input.password) {
            (Some(u), Some(p)) if !u.is_empty() && !p.is_empty() => (u, p),
            _ => return Err(AuthError::MissingCredentials),
        };

        let cred = self.repo
            .find_credentials(&username)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let parsed = PasswordHash::new(&cred.password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
        if Argon2::default().verify_password(password.as_bytes(), &parsed).is_err() {
            debug!(%username, "password mismatch");
            return Err(AuthError::IncorrectPassword);
        }

        let access_token = self.issue_token(&cred.username)?;
        info!(username = %cred.username, "user_login");
        Ok(AuthSession { username: cred.username, access_token })
    }

    /// Sign a token for `username` valid for the configured TTL.
    pub fn issue_token(&self, username: &str) -> Result<String, AuthError> {
        let now = chrono::Utc::now();
        let ttl = i64::try_from(self.cfg.token_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| AuthError::TokenError("token ttl out of range".into()))?;
        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp() as usize,
            exp: (now + ttl).timestamp() as usize,
        };
        encode(&JwtHeader::default(), &claims, &self.encoding_key).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Decode and validate a raw token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AuthError::Expired),
                _ => {
                    debug!(err = %e, "token decode failed");
                    Err(AuthError::InvalidToken)
                }
            },
        }
    }

    /// Validate the raw value of an `Authorization` header (`Bearer <token>`).
    pub fn verify_header(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let header = header.ok_or(AuthError::MissingHeader)?;
        let token = header
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::InvalidHeader)?;
        self.verify_token(token)
    }
}
