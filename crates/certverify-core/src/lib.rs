//! # certverify-core: Foundational Types for Certificate Verification
//!
//! Defines the one entity the verification system knows about, the
//! [`VerificationRecord`], together with the key it is looked up by and the
//! validation applied when records are created.
//!
//! ## Key Design Principles
//!
//! 1. **Newtypes for keys.** Lookups take a [`CertificateNumber`], not a bare
//!    string. Parsing trims the input and rejects empty values, so an empty
//!    key can never reach a store.
//!
//! 2. **Validation at the insert boundary only.** [`NewVerificationRecord`]
//!    checks that all nine fields are non-empty. Records read back from a
//!    store are returned as-is.
//!
//! 3. **One wire shape.** Records serialize as camelCase JSON with an
//!    optional `_id`, shared by the service, the client and the seed files.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `certverify-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod identity;
pub mod record;

pub use error::ValidationError;
pub use identity::{fold_case, normalized_query, CertificateNumber, RecordId};
pub use record::{NewVerificationRecord, VerificationRecord};
