//! # Validation Errors
//!
//! Raised when input fails the non-empty checks applied to certificate
//! numbers and to new records.

use thiserror::Error;

/// Domain primitive validation failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The certificate number was empty or whitespace-only.
    #[error("Certificate number is required")]
    EmptyCertificateNumber,

    /// A required record field was empty or whitespace-only.
    #[error("field `{0}` must not be empty")]
    EmptyField(&'static str),
}
