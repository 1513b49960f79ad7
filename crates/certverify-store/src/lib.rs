//! # certverify-store: Record Store
//!
//! The [`VerificationStore`] capability wraps the one persisted collection of
//! verification records. It exposes exactly three record operations:
//!
//! | Operation | Used by |
//! |-----------|---------|
//! | [`find_by_certificate_number`](VerificationStore::find_by_certificate_number) | `GET /api/verify/{certificateNumber}` |
//! | [`list_all`](VerificationStore::list_all) | `GET /api/verifications` |
//! | [`insert`](VerificationStore::insert) | out-of-band seeding only; no HTTP route |
//!
//! ## Backends
//!
//! - [`PgVerificationStore`]: PostgreSQL via SQLx. Connects lazily on first
//!   use, runs embedded migrations once, then reuses the pool.
//! - [`MemoryVerificationStore`]: insertion-ordered in-process store for
//!   development and tests. Data is lost on restart.
//!
//! Both backends compare on [`certverify_core::fold_case`]. PostgreSQL
//! stores the folded form in `certificate_number_folded` at insert time, so
//! results never depend on the database collation.
//!
//! [`open_store`] picks a backend from [`StoreConfig`]. Stores are explicitly
//! constructed and injected; nothing is created at module load.

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use certverify_core::{CertificateNumber, NewVerificationRecord, VerificationRecord};

pub use config::StoreConfig;
pub use error::StoreError;
pub use memory::MemoryVerificationStore;
pub use postgres::PgVerificationStore;

/// Access to the persisted verification records.
#[async_trait]
pub trait VerificationStore: Send + Sync {
    /// Case-insensitive exact match on `certificateNumber`.
    ///
    /// Returns the first match in natural storage order, or `None`.
    async fn find_by_certificate_number(
        &self,
        code: &CertificateNumber,
    ) -> Result<Option<VerificationRecord>, StoreError>;

    /// Validate and persist a new record, returning it with its assigned id.
    async fn insert(&self, record: NewVerificationRecord)
        -> Result<VerificationRecord, StoreError>;

    /// Every record, in natural storage order.
    async fn list_all(&self) -> Result<Vec<VerificationRecord>, StoreError>;

    /// Cheap health check used by the readiness endpoint.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Build the store selected by `config`.
///
/// With a `database_url` this returns a [`PgVerificationStore`] that has not
/// connected yet; otherwise an empty [`MemoryVerificationStore`].
pub fn open_store(config: &StoreConfig) -> Arc<dyn VerificationStore> {
    match &config.database_url {
        Some(url) => {
            tracing::info!(
                max_connections = config.max_connections,
                "using PostgreSQL record store (connects on first use)"
            );
            Arc::new(PgVerificationStore::new(
                url.clone(),
                config.max_connections,
                config.acquire_timeout(),
            ))
        }
        None => {
            tracing::warn!(
                "DATABASE_URL not set, using in-memory record store. \
                 Records will not survive restarts."
            );
            Arc::new(MemoryVerificationStore::new())
        }
    }
}
