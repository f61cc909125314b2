use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::openapi::{LoginRequest, TokenResponse};

use service::auth::{
    domain::{Claims, LoginInput},
    errors::AuthError,
    repository::memory::InMemoryCredentialRepository,
    AuthService,
};
use service::poly::PolyRepository;

use crate::errors::ApiError;

#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService<InMemoryCredentialRepository>>,
    pub poly_store: Arc<dyn PolyRepository>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LoginOutput {
    pub access_token: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct VerifyOutput {
    pub valid: bool,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeUser {
    pub username: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MeOutput {
    pub me: MeUser,
}

#[utoipa::path(post, path = "/api/auth", tag = "auth", request_body = LoginRequest, responses((status = 200, description = "Token issued", body = TokenResponse), (status = 401, description = "Unknown user or wrong password")))]
pub async fn login(
    State(state): State<ServerState>,
    payload: Result<Json<LoginInput>, JsonRejection>,
) -> Result<Json<LoginOutput>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { access_token: session.access_token }))
}

#[utoipa::path(get, path = "/api/auth/verify", tag = "auth", responses((status = 200, description = "Token is valid"), (status = 401, description = "Token missing or invalid")))]
pub async fn verify() -> Json<VerifyOutput> {
    Json(VerifyOutput { valid: true })
}

#[utoipa::path(get, path = "/api/auth/me", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Token missing or invalid")))]
pub async fn me(Extension(claims): Extension<Claims>) -> Json<MeOutput> {
    Json(MeOutput { me: MeUser { username: claims.sub } })
}

/// Route middleware: require a valid `Authorization: Bearer <token>` header.
/// Verified claims are stored in request extensions.
pub async fn require_bearer_token(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match req.headers().get(AUTHORIZATION) {
        Some(v) => Some(v.to_str().map_err(|_| AuthError::InvalidHeader)?),
        None => None,
    };

    let claims = state.auth.verify_header(header)?;

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
