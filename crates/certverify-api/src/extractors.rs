//! # Extractor Rejections
//!
//! Handlers take `Result<Extractor, Rejection>` and pass it through these
//! helpers so malformed requests get the same JSON error body as every
//! other failure.

use axum::extract::rejection::PathRejection;
use axum::extract::Path;

use crate::error::AppError;

/// Unwrap a path parameter, mapping rejections (e.g. invalid UTF-8 after
/// percent-decoding) to [`AppError::Validation`].
pub fn extract_path<T>(result: Result<Path<T>, PathRejection>) -> Result<T, AppError> {
    result
        .map(|Path(v)| v)
        .map_err(|err| AppError::Validation(err.body_text()))
}
