//! # OpenAPI Specification Assembly
//!
//! Assembles the utoipa-documented routes into one OpenAPI document served
//! at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the verification API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Certificate Verification API",
        version = "0.1.0",
        description = "Read-only lookup of student certificate verification records.",
        license(name = "MIT")
    ),
    paths(
        crate::routes::verify::verify_certificate,
        crate::routes::verify::list_verifications,
    ),
    components(schemas(
        certverify_core::VerificationRecord,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "verification", description = "Certificate lookup")
    )
)]
pub struct ApiDoc;

/// Router serving the OpenAPI JSON document.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_lists_both_routes() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_value(&spec).unwrap();
        let paths = json["paths"].as_object().unwrap();
        assert!(paths.contains_key("/api/verify/{certificate_number}"));
        assert!(paths.contains_key("/api/verifications"));
        assert_eq!(paths.len(), 2, "no write routes are documented");
    }

    #[test]
    fn spec_includes_record_schema() {
        let json = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let record = &json["components"]["schemas"]["VerificationRecord"];
        assert!(record["properties"]["certificateNumber"].is_object());
    }
}
