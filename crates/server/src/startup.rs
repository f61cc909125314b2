use std::sync::Arc;

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes::{self, auth::ServerState};
use service::auth::{
    repository::memory::InMemoryCredentialRepository,
    service::{AuthConfig, AuthService},
};
use service::poly::InMemoryPolyStore;

/// Provision credentials from config and create an empty poly-data store.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let repo = Arc::new(InMemoryCredentialRepository::new());
    for user in &cfg.auth.users {
        match (&user.password, &user.password_hash) {
            (Some(password), None) => repo.insert_password(&user.username, password).await?,
            (None, Some(hash)) => repo.insert_hash(&user.username, hash).await?,
            _ => {
                return Err(StartupError::InvalidConfig(format!(
                    "user '{}' must set exactly one of password or password_hash",
                    user.username
                )))
            }
        }
    }
    info!(accounts = repo.len().await, "credentials loaded");

    let auth = AuthService::new(
        repo,
        AuthConfig {
            jwt_secret: cfg.auth.jwt_secret.clone(),
            token_ttl_secs: cfg.auth.token_ttl_secs,
        },
    );

    Ok(ServerState {
        auth: Arc::new(auth),
        poly_store: InMemoryPolyStore::new(),
    })
}

/// Build the application router for the given state.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("received Ctrl+C, shutting down");
}

/// Serve `app` on an already bound listener until Ctrl+C.
pub async fn serve(listener: TcpListener, app: Router) -> anyhow::Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Run with an explicit configuration.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let bind_addr = cfg.server.bind_addr();
    let listener = TcpListener::bind(bind_addr.as_str())
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {bind_addr}: {e}")))?;
    let addr = listener.local_addr()?;
    info!(%addr, "poly-data server listening");
    serve(listener, app).await
}

/// Public entry: load config, build the app and run the HTTP server
pub async fn run() -> anyhow::Result<()> {
    let cfg = AppConfig::load_and_validate()?;
    run_with_config(cfg).await
}
