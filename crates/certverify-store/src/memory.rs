//! In-memory record store.
//!
//! Records live in an insertion-ordered `Vec` behind a `parking_lot::RwLock`,
//! so "first match" and "natural storage order" mean insertion order, the
//! same as the PostgreSQL backend.

use std::sync::Arc;

use async_trait::async_trait;
use certverify_core::{CertificateNumber, NewVerificationRecord, RecordId, VerificationRecord};
use parking_lot::RwLock;

use crate::{StoreError, VerificationStore};

/// Shared in-memory store. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryVerificationStore {
    records: Arc<RwLock<Vec<VerificationRecord>>>,
}

impl MemoryVerificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `records`, in order.
    pub fn with_records(
        records: impl IntoIterator<Item = NewVerificationRecord>,
    ) -> Result<Self, StoreError> {
        let store = Self::new();
        for record in records {
            store.insert_sync(record)?;
        }
        Ok(store)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn insert_sync(&self, record: NewVerificationRecord) -> Result<VerificationRecord, StoreError> {
        record.validate()?;
        let mut records = self.records.write();
        if records
            .iter()
            .any(|r| r.certificate_number == record.certificate_number)
        {
            return Err(StoreError::Duplicate(record.certificate_number));
        }
        let stored = record.into_record(RecordId::new());
        records.push(stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl VerificationStore for MemoryVerificationStore {
    async fn find_by_certificate_number(
        &self,
        code: &CertificateNumber,
    ) -> Result<Option<VerificationRecord>, StoreError> {
        Ok(self
            .records
            .read()
            .iter()
            .find(|r| code.matches(&r.certificate_number))
            .cloned())
    }

    async fn insert(
        &self,
        record: NewVerificationRecord,
    ) -> Result<VerificationRecord, StoreError> {
        let stored = self.insert_sync(record)?;
        tracing::debug!(
            certificate_number = %stored.certificate_number,
            "inserted verification record"
        );
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<VerificationRecord>, StoreError> {
        Ok(self.records.read().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use certverify_core::ValidationError;

    fn record(cert: &str, name: &str) -> NewVerificationRecord {
        NewVerificationRecord {
            certificate_number: cert.into(),
            student_name: name.into(),
            registration_number: "REG-1".into(),
            college: "Government Arts College".into(),
            date_of_joining: "01-06-2024".into(),
            date_of_issue: "31-07-2024".into(),
            domain: "Data Science".into(),
            status: "Verified".into(),
            grade: "A".into(),
        }
    }

    fn code(s: &str) -> CertificateNumber {
        CertificateNumber::parse(s).unwrap()
    }

    #[tokio::test]
    async fn lookup_ignores_case() {
        let store = MemoryVerificationStore::with_records([record("VLG2024001", "A. Kumar")])
            .unwrap();
        for variant in ["vlg2024001", "VLG2024001", "vLg2024001"] {
            let found = store.find_by_certificate_number(&code(variant)).await.unwrap();
            assert_eq!(found.unwrap().student_name, "A. Kumar", "variant {variant}");
        }
    }

    #[tokio::test]
    async fn lookup_of_unknown_number_is_none() {
        let store = MemoryVerificationStore::with_records([record("VLG2024001", "A. Kumar")])
            .unwrap();
        let found = store
            .find_by_certificate_number(&code("VLG2024999"))
            .await
            .unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn lookup_is_not_a_substring_or_pattern_search() {
        let store = MemoryVerificationStore::with_records([record("VLG2024001", "A. Kumar")])
            .unwrap();
        for query in ["VLG", "2024001", "VLG.*", "^VLG2024001$", "VLG2024001 X"] {
            let found = store.find_by_certificate_number(&code(query)).await.unwrap();
            assert!(found.is_none(), "{query} must not match");
        }
    }

    #[tokio::test]
    async fn lookup_folds_non_ascii_letters() {
        let store = MemoryVerificationStore::with_records([record("ÑANDÚ-2024", "A. Kumar")])
            .unwrap();
        let found = store.find_by_certificate_number(&code("ñandú-2024")).await.unwrap();
        assert_eq!(found.map(|r| r.certificate_number), Some("ÑANDÚ-2024".to_string()));
    }

    #[tokio::test]
    async fn first_match_wins_across_case_variants() {
        let store = MemoryVerificationStore::with_records([
            record("abc123", "First"),
            record("ABC123", "Second"),
        ])
        .unwrap();
        let found = store
            .find_by_certificate_number(&code("Abc123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.student_name, "First");
    }

    #[tokio::test]
    async fn insert_assigns_id_and_round_trips() {
        let store = MemoryVerificationStore::new();
        let input = record("VLG2024002", "B. Priya");
        let stored = store.insert(input.clone()).await.unwrap();
        assert!(stored.id.is_some());

        let found = store
            .find_by_certificate_number(&code("vlg2024002"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.fields(), input);
        assert_eq!(found.id, stored.id);
    }

    #[tokio::test]
    async fn insert_rejects_empty_fields() {
        let store = MemoryVerificationStore::new();
        let mut input = record("VLG2024003", "C. Ravi");
        input.domain = " ".into();
        let err = store.insert(input).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Validation(ValidationError::EmptyField("domain"))
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn insert_rejects_exact_duplicate() {
        let store = MemoryVerificationStore::new();
        store.insert(record("VLG2024004", "D")).await.unwrap();
        let err = store.insert(record("VLG2024004", "E")).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(_)));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn list_returns_every_record_in_insertion_order() {
        let store = MemoryVerificationStore::new();
        let certs = ["C-1", "C-2", "C-3"];
        for cert in certs {
            store.insert(record(cert, "Student")).await.unwrap();
        }
        let listed: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.certificate_number)
            .collect();
        assert_eq!(listed, certs);
    }

    #[tokio::test]
    async fn clones_share_records() {
        let store = MemoryVerificationStore::new();
        let clone = store.clone();
        clone.insert(record("SHARED-1", "S")).await.unwrap();
        assert_eq!(store.len(), 1);
    }

    proptest::proptest! {
        #[test]
        fn any_casing_variant_finds_the_record(
            key in "[A-Za-z0-9-]{1,16}",
            flips in proptest::collection::vec(proptest::bool::ANY, 16),
        ) {
            let variant: String = key
                .chars()
                .zip(flips.iter().cycle())
                .map(|(c, &upper)| {
                    if upper {
                        c.to_ascii_uppercase()
                    } else {
                        c.to_ascii_lowercase()
                    }
                })
                .collect();

            let store = MemoryVerificationStore::with_records([record(&key, "A. Kumar")]).unwrap();
            let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
            let found = rt
                .block_on(store.find_by_certificate_number(&code(&variant)))
                .unwrap();
            proptest::prop_assert_eq!(found.map(|r| r.certificate_number), Some(key));
        }
    }
}
