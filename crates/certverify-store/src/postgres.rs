//! PostgreSQL record store.
//!
//! All queries run against the `student_verifications` table created by the
//! embedded migrations in `migrations/`. The pool is opened lazily: the first
//! operation connects and migrates, later operations reuse the same pool. A
//! failed connect is not remembered, so the next call dials again.

use std::time::Duration;

use async_trait::async_trait;
use certverify_core::{
    fold_case, CertificateNumber, NewVerificationRecord, RecordId, VerificationRecord,
};
use sqlx::postgres::{PgPool, PgPoolOptions};
use tokio::sync::OnceCell;
use uuid::Uuid;

use crate::{StoreError, VerificationStore};

const SELECT_COLUMNS: &str = "SELECT id, certificate_number, student_name, registration_number, \
     college, date_of_joining, date_of_issue, domain, status, grade \
     FROM student_verifications";

/// Lazily connected PostgreSQL store.
pub struct PgVerificationStore {
    url: String,
    max_connections: u32,
    acquire_timeout: Duration,
    pool: OnceCell<PgPool>,
}

impl std::fmt::Debug for PgVerificationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgVerificationStore")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout", &self.acquire_timeout)
            .field("connected", &self.pool.initialized())
            .finish()
    }
}

impl PgVerificationStore {
    /// Construct the store. No connection is made until the first operation.
    pub fn new(url: impl Into<String>, max_connections: u32, acquire_timeout: Duration) -> Self {
        Self {
            url: url.into(),
            max_connections,
            acquire_timeout,
            pool: OnceCell::new(),
        }
    }

    /// Whether the pool has been established.
    pub fn is_connected(&self) -> bool {
        self.pool.initialized()
    }

    /// Return the shared pool, connecting and migrating on first use.
    async fn pool(&self) -> Result<&PgPool, StoreError> {
        self.pool
            .get_or_try_init(|| async {
                let pool = PgPoolOptions::new()
                    .max_connections(self.max_connections)
                    .acquire_timeout(self.acquire_timeout)
                    .connect(&self.url)
                    .await
                    .map_err(|e| {
                        tracing::error!(error = %e, "record store connection failed");
                        StoreError::Connection(e.to_string())
                    })?;
                tracing::info!("Connected to PostgreSQL record store");

                sqlx::migrate!("./migrations")
                    .run(&pool)
                    .await
                    .map_err(|e| StoreError::Migration(e.to_string()))?;
                tracing::info!("Record store migrations applied");

                Ok::<_, StoreError>(pool)
            })
            .await
    }
}

#[async_trait]
impl VerificationStore for PgVerificationStore {
    async fn find_by_certificate_number(
        &self,
        code: &CertificateNumber,
    ) -> Result<Option<VerificationRecord>, StoreError> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, VerificationRow>(&format!(
            "{SELECT_COLUMNS} WHERE certificate_number_folded = $1 ORDER BY seq LIMIT 1"
        ))
        .bind(code.folded())
        .fetch_optional(pool)
        .await?;

        Ok(row.map(VerificationRow::into_record))
    }

    async fn insert(
        &self,
        record: NewVerificationRecord,
    ) -> Result<VerificationRecord, StoreError> {
        record.validate()?;
        let pool = self.pool().await?;
        let id = RecordId::new();

        sqlx::query(
            "INSERT INTO student_verifications (id, certificate_number, certificate_number_folded, \
             student_name, registration_number, college, date_of_joining, date_of_issue, domain, \
             status, grade)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(*id.as_uuid())
        .bind(&record.certificate_number)
        .bind(fold_case(&record.certificate_number))
        .bind(&record.student_name)
        .bind(&record.registration_number)
        .bind(&record.college)
        .bind(&record.date_of_joining)
        .bind(&record.date_of_issue)
        .bind(&record.domain)
        .bind(&record.status)
        .bind(&record.grade)
        .execute(pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db) = &e {
                if db.is_unique_violation() {
                    return StoreError::Duplicate(record.certificate_number.clone());
                }
            }
            StoreError::Query(e)
        })?;

        tracing::debug!(
            certificate_number = %record.certificate_number,
            %id,
            "inserted verification record"
        );
        Ok(record.into_record(id))
    }

    async fn list_all(&self) -> Result<Vec<VerificationRecord>, StoreError> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, VerificationRow>(&format!("{SELECT_COLUMNS} ORDER BY seq"))
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(VerificationRow::into_record).collect())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let pool = self.pool().await?;
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }
}

/// Internal row type for SQLx mapping.
#[derive(sqlx::FromRow)]
struct VerificationRow {
    id: Uuid,
    certificate_number: String,
    student_name: String,
    registration_number: String,
    college: String,
    date_of_joining: String,
    date_of_issue: String,
    domain: String,
    status: String,
    grade: String,
}

impl VerificationRow {
    fn into_record(self) -> VerificationRecord {
        VerificationRecord {
            id: Some(RecordId::from_uuid(self.id)),
            certificate_number: self.certificate_number,
            student_name: self.student_name,
            registration_number: self.registration_number,
            college: self.college,
            date_of_joining: self.date_of_joining,
            date_of_issue: self.date_of_issue,
            domain: self.domain,
            status: self.status,
            grade: self.grade,
        }
    }
}
