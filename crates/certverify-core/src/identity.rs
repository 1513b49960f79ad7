//! # Identity Newtypes
//!
//! [`RecordId`] is the opaque identifier a store assigns to each record.
//! [`CertificateNumber`] is the natural key users look records up by.
//!
//! ## Matching
//!
//! A certificate number is a literal. Matching is exact and anchored at both
//! ends, with case folded on both sides: `abc123`, `ABC123` and `aBc123` all
//! match a stored `ABC123`, while `ABC12` and `ABC.*` match nothing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Store-assigned identifier for a verification record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a new random record identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (e.g. one read back from the database).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed, non-empty certificate number used as a lookup key.
///
/// The original spelling is kept for logging and for the database query;
/// `folded` is the [`fold_case`] form every backend compares on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CertificateNumber {
    raw: String,
    folded: String,
}

impl CertificateNumber {
    /// Parse a user-supplied certificate number.
    ///
    /// Leading and trailing whitespace is removed. Empty input is rejected
    /// with [`ValidationError::EmptyCertificateNumber`].
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyCertificateNumber);
        }
        Ok(Self {
            raw: trimmed.to_string(),
            folded: fold_case(trimmed),
        })
    }

    /// The certificate number as supplied (trimmed).
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The case-folded key.
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Case-insensitive exact comparison against a stored certificate number.
    pub fn matches(&self, stored: &str) -> bool {
        fold_case(stored) == self.folded
    }
}

impl std::fmt::Display for CertificateNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Case folding shared by all stores: Unicode lower-casing.
///
/// Stores persist this form next to the certificate number and compare on
/// it, so matching never depends on database collation.
pub fn fold_case(certificate_number: &str) -> String {
    certificate_number.to_lowercase()
}

/// Normalize free-form input into the client's query key.
///
/// Returns `None` for empty or whitespace-only input; otherwise the trimmed,
/// upper-cased certificate number.
pub fn normalized_query(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
