use axum::{
    extract::OriginalUri,
    http::Method,
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use crate::openapi::HealthResponse;

use crate::errors::ApiError;
use crate::openapi::ApiDoc;

pub mod auth;
pub mod poly;

pub const AUTH_URL: &str = "/api/auth";
/// The collection is reported with a trailing slash in method errors.
pub const POLY_COLLECTION_URL: &str = "/api/poly/";

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn auth_method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method, AUTH_URL)
}

async fn poly_collection_method_not_allowed(method: Method) -> ApiError {
    ApiError::method_not_allowed(method, POLY_COLLECTION_URL)
}

async fn method_not_allowed(method: Method, OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::method_not_allowed(method, uri.path())
}

async fn url_not_found(OriginalUri(uri): OriginalUri) -> ApiError {
    ApiError::UrlNotFound(uri.path().to_string())
}

/// Build the full application router: public auth/health routes plus the
/// bearer-protected poly-data API.
pub fn build_router(state: auth::ServerState) -> Router {
    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(AUTH_URL, post(auth::login).fallback(auth_method_not_allowed));

    let protected = Router::new()
        .route("/api/auth/verify", get(auth::verify).fallback(method_not_allowed))
        .route("/api/auth/me", get(auth::me).fallback(method_not_allowed))
        .route(
            "/api/poly",
            get(poly::list_poly)
                .post(poly::create_poly)
                .fallback(poly_collection_method_not_allowed),
        )
        .route(
            "/api/poly/:id",
            get(poly::get_poly)
                .delete(poly::delete_poly)
                .fallback(method_not_allowed),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_bearer_token,
        ));

    public
        .merge(protected)
        .fallback(url_not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
