//! Record store error types.

use certverify_core::ValidationError;
use thiserror::Error;

/// Errors from record store operations.
///
/// "Not found" is not an error: lookups return `Ok(None)`.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing database could not be reached.
    #[error("failed to connect to record store: {0}")]
    Connection(String),

    /// Embedded schema migrations failed on first connect.
    #[error("record store migration failed: {0}")]
    Migration(String),

    /// A query failed after the connection was established.
    #[error("record store query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// A record with exactly this certificate number already exists.
    #[error("certificate number already exists: {0}")]
    Duplicate(String),

    /// The record failed insert-boundary validation.
    #[error("invalid record: {0}")]
    Validation(#[from] ValidationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_converts() {
        let err = StoreError::from(ValidationError::EmptyField("college"));
        assert!(matches!(err, StoreError::Validation(_)));
        assert!(err.to_string().contains("college"));
    }

    #[test]
    fn duplicate_names_the_certificate() {
        let err = StoreError::Duplicate("VLG2024001".into());
        assert!(err.to_string().contains("VLG2024001"));
    }
}
