//! Client error types.

use crate::config::ConfigError;

/// Message shown to users for any failed lookup.
///
/// Not-found and server or transport failures are deliberately presented the
/// same way; callers needing the distinction match on [`ClientError`].
pub const LOOKUP_FAILED_MESSAGE: &str =
    "Certificate not found. Please check the number and try again.";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The service has no record for the certificate number.
    #[error("certificate {certificate_number:?} not found")]
    NotFound { certificate_number: String },
    /// The service returned any other non-2xx status.
    #[error("verification API {endpoint} returned {status}: {body}")]
    Api {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// The text to present to an end user.
    pub fn user_message(&self) -> &'static str {
        LOOKUP_FAILED_MESSAGE
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
