//! # certverify-cli: Operator Command-Line Interface
//!
//! ## Subcommands
//!
//! - `lookup`: verify one certificate through the service, optionally
//!   exporting the PDF report
//! - `list`: print every record held by the service
//! - `seed`: insert records from a JSON file straight into the record store
//!
//! Handlers return the process exit code: `0` success, `2` when a lookup
//! settled with a failure. Errors surface as `anyhow::Error` and exit `1`.

pub mod api;
pub mod list;
pub mod lookup;
pub mod seed;

/// Exit code for a lookup that completed without a record.
pub const EXIT_LOOKUP_FAILED: u8 = 2;
