use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use service::poly::domain::{CreatedPolyObject, NewPolyObject, PolyObject};
use service::poly::PolyRepository;

use crate::errors::ApiError;
use crate::openapi::{CreatedPolyObjectDoc, NewPolyObjectDoc, PolyObjectDoc};
use crate::routes::auth::ServerState;

/// List every stored object, oldest first
#[utoipa::path(get, path = "/api/poly", tag = "poly", responses((status = 200, description = "All objects", body = [PolyObjectDoc]), (status = 401, description = "Token missing or invalid")))]
pub async fn list_poly(State(state): State<ServerState>) -> Json<Vec<PolyObject>> {
    Json(state.poly_store.list().await)
}

#[utoipa::path(post, path = "/api/poly", tag = "poly", request_body = NewPolyObjectDoc, responses((status = 200, description = "Created", body = CreatedPolyObjectDoc), (status = 401, description = "Token missing or invalid")))]
pub async fn create_poly(
    State(state): State<ServerState>,
    payload: Result<Json<NewPolyObject>, JsonRejection>,
) -> Result<Json<CreatedPolyObject>, ApiError> {
    let Json(input) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let created = state.poly_store.create(input).await;
    Ok(Json(created.into()))
}

#[utoipa::path(get, path = "/api/poly/{id}", tag = "poly", params(("id" = String, Path, description = "Object id")), responses((status = 200, description = "Found", body = PolyObjectDoc), (status = 404, description = "Not found")))]
pub async fn get_poly(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Json<PolyObject>, ApiError> {
    let obj = state.poly_store.get(&id).await?;
    Ok(Json(obj))
}

/// Always answers `""`; deleting an unknown id is not an error.
#[utoipa::path(delete, path = "/api/poly/{id}", tag = "poly", params(("id" = String, Path, description = "Object id")), responses((status = 200, description = "Deleted (or already absent)")))]
pub async fn delete_poly(State(state): State<ServerState>, Path(id): Path<String>) -> Json<&'static str> {
    state.poly_store.delete(&id).await;
    Json("")
}
