//! # Verification Routes
//!
//! | Method | Path | Outcome |
//! |--------|------|---------|
//! | GET | `/api/verify/{certificateNumber}` | 200 record, 400 empty, 404 no match, 500 store failure |
//! | GET | `/api/verify` | 400 (certificate number missing) |
//! | GET | `/api/verifications` | 200 all records, 500 store failure |
//!
//! Handlers only translate between HTTP and the [`VerificationStore`]
//! capability; matching rules live in the store.
//!
//! [`VerificationStore`]: certverify_store::VerificationStore

use axum::extract::rejection::PathRejection;
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use certverify_core::{CertificateNumber, ValidationError, VerificationRecord};

use crate::error::{AppError, ErrorBody};
use crate::extractors::extract_path;
use crate::state::AppState;

/// Build the verification router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/verify/:certificate_number", get(verify_certificate))
        .route("/api/verify", get(missing_certificate_number))
        .route("/api/verify/", get(missing_certificate_number))
        .route("/api/verifications", get(list_verifications))
}

/// GET /api/verify/{certificateNumber}: look up one certificate.
#[utoipa::path(
    get,
    path = "/api/verify/{certificate_number}",
    params(
        ("certificate_number" = String, Path, description = "Certificate number, matched case-insensitively")
    ),
    responses(
        (status = 200, description = "Matching record", body = VerificationRecord),
        (status = 400, description = "Certificate number missing or blank", body = ErrorBody),
        (status = 404, description = "No matching record", body = ErrorBody),
        (status = 500, description = "Record store failure", body = ErrorBody),
    ),
    tag = "verification"
)]
pub async fn verify_certificate(
    State(state): State<AppState>,
    certificate_number: Result<Path<String>, PathRejection>,
) -> Result<Json<VerificationRecord>, AppError> {
    let certificate_number: String = extract_path(certificate_number)?;
    let code = CertificateNumber::parse(&certificate_number)?;

    let found = state.store.find_by_certificate_number(&code).await?;
    state.metrics.record_lookup(found.is_some());

    match found {
        Some(record) => {
            tracing::debug!(certificate_number = %code, "certificate verified");
            Ok(Json(record))
        }
        None => {
            tracing::debug!(certificate_number = %code, "certificate not found");
            Err(AppError::certificate_not_found())
        }
    }
}

/// GET /api/verify: the path parameter is absent.
async fn missing_certificate_number() -> AppError {
    ValidationError::EmptyCertificateNumber.into()
}

/// GET /api/verifications: every stored record.
#[utoipa::path(
    get,
    path = "/api/verifications",
    responses(
        (status = 200, description = "All records", body = [VerificationRecord]),
        (status = 500, description = "Record store failure", body = ErrorBody),
    ),
    tag = "verification"
)]
pub async fn list_verifications(
    State(state): State<AppState>,
) -> Result<Json<Vec<VerificationRecord>>, AppError> {
    let records = state.store.list_all().await?;
    Ok(Json(records))
}
