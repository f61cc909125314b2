#![allow(non_snake_case)]

use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct LoginRequest { pub username: String, pub password: String }

#[derive(ToSchema)]
pub struct TokenResponse { pub access_token: String }

#[derive(ToSchema)]
pub struct PolyEntryDoc { pub key: String, pub val: String, pub valType: String }

#[derive(ToSchema)]
pub struct NewPolyObjectDoc { pub data: Vec<PolyEntryDoc> }

#[derive(ToSchema)]
pub struct PolyObjectDoc { pub id: String, pub data: Vec<PolyEntryDoc> }

#[derive(ToSchema)]
pub struct CreatedPolyObjectDoc { pub id: String, pub values: Vec<PolyEntryDoc> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::auth::login,
        crate::routes::auth::verify,
        crate::routes::auth::me,
        crate::routes::poly::list_poly,
        crate::routes::poly::create_poly,
        crate::routes::poly::get_poly,
        crate::routes::poly::delete_poly,
    ),
    components(
        schemas(
            HealthResponse,
            LoginRequest,
            TokenResponse,
            PolyEntryDoc,
            NewPolyObjectDoc,
            PolyObjectDoc,
            CreatedPolyObjectDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "auth"),
        (name = "poly")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_api_paths() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let paths = doc["paths"].as_object().unwrap();
        for p in ["/health", "/api/auth", "/api/auth/verify", "/api/auth/me", "/api/poly", "/api/poly/{id}"] {
            assert!(paths.contains_key(p), "missing path {p}");
        }
        assert!(doc["components"]["schemas"]["PolyEntryDoc"]["properties"]["valType"].is_object());
        assert_eq!(
            doc["paths"]["/health"]["get"]["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/HealthResponse"
        );
    }
}
