//! # Lookup State Machine
//!
//! ```text
//! Idle ──submit──▶ Pending(key) ──fetch ok──▶ Settled(key, record)
//!                       │        └─fetch err─▶ Settled(key, failure)
//!                       └──submit(new key)──▶ Pending(new key)
//! ```
//!
//! Submitting blank input leaves the state untouched and returns a
//! [`QueryNotice`]; no request is made. Re-submission while a lookup is in
//! flight is allowed: nothing is cancelled or de-duplicated. Every completed
//! lookup lands in a per-key cache, but the visible state only settles for
//! the most recently submitted key. Cached successes are served without a
//! network call.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use certverify_core::{normalized_query, VerificationRecord};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::error::{ClientError, LOOKUP_FAILED_MESSAGE};
use crate::render::pdf::{ExportError, ExportedReport, ReportExporter};

/// Notice shown when the user submits blank input.
pub const EMPTY_INPUT_NOTICE: &str = "Please enter a certificate number";

/// Where the state machine fetches records from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, certificate_number: &str) -> Result<VerificationRecord, ClientError>;
}

/// Why a lookup did not produce a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    NotFound,
    /// Transport, server or decoding failure. Holds the diagnostic detail.
    Unavailable(String),
}

impl LookupFailure {
    /// User-facing text. Both kinds read the same.
    pub fn message(&self) -> &'static str {
        LOOKUP_FAILED_MESSAGE
    }
}

impl From<ClientError> for LookupFailure {
    fn from(err: ClientError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Unavailable(err.to_string())
        }
    }
}

pub type LookupOutcome = Result<VerificationRecord, LookupFailure>;

/// Visible state of the lookup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum QueryState {
    #[default]
    Idle,
    Pending { query: String },
    Settled { query: String, outcome: LookupOutcome },
}

impl QueryState {
    /// The settled record, if any.
    pub fn record(&self) -> Option<&VerificationRecord> {
        match self {
            Self::Settled {
                outcome: Ok(record),
                ..
            } => Some(record),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Submission rejected before any request was made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryNotice {
    #[error("Please enter a certificate number")]
    EmptyInput,
}

/// Result of one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    /// Normalized query key (trimmed, upper-cased).
    pub query: String,
    pub outcome: LookupOutcome,
    /// Served from the cache without a request.
    pub cached: bool,
    /// Whether this lookup is the one the visible state settled on.
    pub current: bool,
}

#[derive(Debug, Default)]
struct Inner {
    state: QueryState,
    latest: Option<String>,
    cache: HashMap<String, VerificationRecord>,
}

/// The client-side lookup. Cheap to clone; clones share state and cache.
pub struct VerificationQuery<S> {
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
}

impl<S> Clone for VerificationQuery<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: RecordSource> VerificationQuery<S> {
    pub fn new(source: S) -> Self {
        Self::with_shared_source(Arc::new(source))
    }

    pub fn with_shared_source(source: Arc<S>) -> Self {
        Self {
            source,
            inner: Arc::new(Mutex::new(Inner::default())),
        }
    }

    pub fn state(&self) -> QueryState {
        self.inner.lock().state.clone()
    }

    /// Submit user input and drive the lookup to completion.
    pub async fn submit(&self, input: &str) -> Result<Lookup, QueryNotice> {
        let query = normalized_query(input).ok_or(QueryNotice::EmptyInput)?;

        {
            let mut inner = self.inner.lock();
            inner.latest = Some(query.clone());
            if let Some(record) = inner.cache.get(&query).cloned() {
                tracing::debug!(%query, "serving cached lookup");
                inner.state = QueryState::Settled {
                    query: query.clone(),
                    outcome: Ok(record.clone()),
                };
                return Ok(Lookup {
                    query,
                    outcome: Ok(record),
                    cached: true,
                    current: true,
                });
            }
            inner.state = QueryState::Pending {
                query: query.clone(),
            };
        }

        let outcome: LookupOutcome = self.source.fetch(&query).await.map_err(LookupFailure::from);
        if let Err(LookupFailure::Unavailable(detail)) = &outcome {
            tracing::warn!(%query, %detail, "lookup failed");
        }

        let mut inner = self.inner.lock();
        if let Ok(record) = &outcome {
            inner.cache.insert(query.clone(), record.clone());
        }
        let current = inner.latest.as_deref() == Some(query.as_str());
        if current {
            inner.state = QueryState::Settled {
                query: query.clone(),
                outcome: outcome.clone(),
            };
        } else {
            tracing::debug!(%query, "superseded lookup completed");
        }

        Ok(Lookup {
            query,
            outcome,
            cached: false,
            current,
        })
    }

    /// Render the settled record as a PDF report.
    ///
    /// Returns `Ok(None)` when no record is settled. Uses only the record
    /// already held; never touches the network.
    pub fn export_current(
        &self,
        exporter: &ReportExporter,
        generated_at: DateTime<Utc>,
    ) -> Result<Option<ExportedReport>, ExportError> {
        let state = self.state();
        match state.record() {
            Some(record) => exporter.export(record, generated_at).map(Some),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certverify_core::{NewVerificationRecord, RecordId};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    fn record(cert: &str) -> VerificationRecord {
        NewVerificationRecord {
            certificate_number: cert.into(),
            student_name: "A. Kumar".into(),
            registration_number: "REG-1".into(),
            college: "Government Arts College".into(),
            date_of_joining: "01-06-2024".into(),
            date_of_issue: "31-07-2024".into(),
            domain: "Data Science".into(),
            status: "Verified".into(),
            grade: "A".into(),
        }
        .into_record(RecordId::new())
    }

    /// Answers from a fixed record set and counts calls.
    #[derive(Default)]
    struct FakeSource {
        known: Vec<VerificationRecord>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl RecordSource for FakeSource {
        async fn fetch(&self, cert: &str) -> Result<VerificationRecord, ClientError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.known
                .iter()
                .find(|r| r.certificate_number.eq_ignore_ascii_case(cert))
                .cloned()
                .ok_or_else(|| ClientError::NotFound {
                    certificate_number: cert.into(),
                })
        }
    }

    /// Holds the first request until released.
    struct GatedSource {
        gate: Notify,
        slow_key: String,
    }

    #[async_trait]
    impl RecordSource for GatedSource {
        async fn fetch(&self, cert: &str) -> Result<VerificationRecord, ClientError> {
            if cert == self.slow_key {
                self.gate.notified().await;
            }
            Ok(record(cert))
        }
    }

    #[tokio::test]
    async fn blank_input_is_rejected_without_a_request() {
        let query = VerificationQuery::new(FakeSource::default());
        for input in ["", "   ", "\t\n"] {
            assert_eq!(query.submit(input).await, Err(QueryNotice::EmptyInput));
        }
        assert_eq!(query.state(), QueryState::Idle);
        assert_eq!(query.source.calls.load(Ordering::SeqCst), 0);
        assert_eq!(QueryNotice::EmptyInput.to_string(), EMPTY_INPUT_NOTICE);
    }

    #[tokio::test]
    async fn blank_input_keeps_previous_settled_state() {
        let query = VerificationQuery::new(FakeSource {
            known: vec![record("VLG2024001")],
            ..Default::default()
        });
        query.submit("vlg2024001").await.unwrap();
        let before = query.state();
        assert!(query.submit("  ").await.is_err());
        assert_eq!(query.state(), before);
    }

    #[tokio::test]
    async fn input_is_trimmed_and_upper_cased() {
        let query = VerificationQuery::new(FakeSource {
            known: vec![record("VLG2024001")],
            ..Default::default()
        });
        let lookup = query.submit("  vlg2024001 ").await.unwrap();
        assert_eq!(lookup.query, "VLG2024001");
        assert!(lookup.outcome.is_ok());
        assert_eq!(
            query.state().record().map(|r| r.certificate_number.as_str()),
            Some("VLG2024001")
        );
    }

    #[tokio::test]
    async fn not_found_settles_as_failure() {
        let query = VerificationQuery::new(FakeSource::default());
        let lookup = query.submit("VLG2024999").await.unwrap();
        assert_eq!(lookup.outcome, Err(LookupFailure::NotFound));
        assert_eq!(
            query.state(),
            QueryState::Settled {
                query: "VLG2024999".into(),
                outcome: Err(LookupFailure::NotFound),
            }
        );
    }

    #[tokio::test]
    async fn success_is_cached_per_key() {
        let query = VerificationQuery::new(FakeSource {
            known: vec![record("VLG2024001")],
            ..Default::default()
        });
        assert!(!query.submit("VLG2024001").await.unwrap().cached);
        assert!(query.submit("vlg2024001").await.unwrap().cached);
        assert_eq!(query.source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let query = VerificationQuery::new(FakeSource::default());
        query.submit("VLG2024999").await.unwrap();
        query.submit("VLG2024999").await.unwrap();
        assert_eq!(query.source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn stale_completion_does_not_overwrite_latest_query() {
        let query = VerificationQuery::new(GatedSource {
            gate: Notify::new(),
            slow_key: "SLOW1".into(),
        });

        let slow = tokio::spawn({
            let query = query.clone();
            async move { query.submit("slow1").await }
        });
        while !query.state().is_pending() {
            tokio::task::yield_now().await;
        }

        let fast = query.submit("FAST2").await.unwrap();
        assert!(fast.current);

        query.source.gate.notify_one();
        let slow = slow.await.unwrap().unwrap();
        assert!(!slow.current);
        assert!(slow.outcome.is_ok());

        assert_eq!(
            query.state().record().map(|r| r.certificate_number.as_str()),
            Some("FAST2")
        );
        // The superseded result still reached the cache.
        assert!(query.submit("SLOW1").await.unwrap().cached);
    }

    #[test]
    fn failure_kinds_share_one_message() {
        assert_eq!(
            LookupFailure::NotFound.message(),
            LookupFailure::Unavailable("503".into()).message()
        );
    }
}
