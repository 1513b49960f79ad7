//! # certverify-client: Verification Service Client
//!
//! - [`VerificationClient`]: typed reqwest client for the two read routes.
//! - [`VerificationQuery`]: the lookup state machine (idle, pending, settled)
//!   with its per-key result cache, generic over any [`RecordSource`].
//! - [`render`]: terminal view and the PDF verification report.
//!
//! Lookups are never retried. Not-found and server failures are presented
//! to users with the same message ([`LOOKUP_FAILED_MESSAGE`]).

pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod render;

pub use config::{ClientConfig, ConfigError};
pub use error::{ClientError, LOOKUP_FAILED_MESSAGE};
pub use http::VerificationClient;
pub use query::{
    Lookup, LookupFailure, QueryNotice, QueryState, RecordSource, VerificationQuery,
    EMPTY_INPUT_NOTICE,
};
pub use render::pdf::{ExportError, ExportedReport, Institution, ReportExporter};
