use async_trait::async_trait;

use super::domain::Credentials;
use super::errors::AuthError;

/// Repository abstraction for credential lookup.
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError>;
}

/// In-memory credential repository, provisioned once at startup.
pub mod memory {
    use super::*;
    use std::collections::HashMap;

    use argon2::{
        password_hash::{PasswordHasher, SaltString},
        Argon2, PasswordHash,
    };
    use rand::rngs::OsRng;
    use tokio::sync::RwLock;
    use tracing::debug;

    /// Hash a plaintext password into an Argon2 PHC string.
    pub fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::HashError(e.to_string()))
    }

    #[derive(Default)]
    pub struct InMemoryCredentialRepository {
        creds: RwLock<HashMap<String, Credentials>>, // key: username
    }

    impl InMemoryCredentialRepository {
        pub fn new() -> Self { Self::default() }

        /// Register an account from a plaintext password.
        pub async fn insert_password(&self, username: &str, password: &str) -> Result<(), AuthError> {
            let password_hash = hash_password(password)?;
            self.insert_hash(username, &password_hash).await
        }

        /// Register an account from an existing Argon2 PHC string.
        pub async fn insert_hash(&self, username: &str, password_hash: &str) -> Result<(), AuthError> {
            PasswordHash::new(password_hash).map_err(|e| AuthError::HashError(e.to_string()))?;
            let mut creds = self.creds.write().await;
            creds.insert(
                username.to_string(),
                Credentials { username: username.to_string(), password_hash: password_hash.to_string() },
            );
            debug!(%username, "credentials provisioned");
            Ok(())
        }

        pub async fn len(&self) -> usize {
            self.creds.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.creds.read().await.is_empty()
        }
    }

    #[async_trait]
    impl CredentialRepository for InMemoryCredentialRepository {
        async fn find_credentials(&self, username: &str) -> Result<Option<Credentials>, AuthError> {
            let creds = self.creds.read().await;
            Ok(creds.get(username).cloned())
        }
    }

}
