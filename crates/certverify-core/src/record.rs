//! # Verification Records
//!
//! [`NewVerificationRecord`] is what gets inserted; [`VerificationRecord`]
//! is what a store hands back, carrying its assigned [`RecordId`].

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::ValidationError;
use crate::identity::RecordId;

/// The nine caller-supplied fields of a verification record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewVerificationRecord {
    pub certificate_number: String,
    pub student_name: String,
    pub registration_number: String,
    pub college: String,
    /// Free-form date text, stored as given.
    pub date_of_joining: String,
    /// Free-form date text, stored as given.
    pub date_of_issue: String,
    pub domain: String,
    /// e.g. "Verified".
    pub status: String,
    pub grade: String,
}

impl NewVerificationRecord {
    /// Check that every field is non-empty after trimming.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields: [(&'static str, &str); 9] = [
            ("certificateNumber", &self.certificate_number),
            ("studentName", &self.student_name),
            ("registrationNumber", &self.registration_number),
            ("college", &self.college),
            ("dateOfJoining", &self.date_of_joining),
            ("dateOfIssue", &self.date_of_issue),
            ("domain", &self.domain),
            ("status", &self.status),
            ("grade", &self.grade),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::EmptyField(name));
            }
        }
        Ok(())
    }

    /// Attach a store-assigned identifier.
    pub fn into_record(self, id: RecordId) -> VerificationRecord {
        VerificationRecord {
            id: Some(id),
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

/// A persisted verification record.
///
/// `id` is always set by the stores in this workspace but is optional on the
/// wire, so clients accept bodies that omit it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VerificationRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = Uuid)]
    pub id: Option<RecordId>,
    pub certificate_number: String,
    pub student_name: String,
    pub registration_number: String,
    pub college: String,
    pub date_of_joining: String,
    pub date_of_issue: String,
    pub domain: String,
    pub status: String,
    pub grade: String,
}

impl VerificationRecord {
    /// The nine record fields without the identifier.
    pub fn fields(&self) -> NewVerificationRecord {
        NewVerificationRecord {
            certificate_number: self.certificate_number.clone(),
            student_name: self.student_name.clone(),
            registration_number: self.registration_number.clone(),
            college: self.college.clone(),
            date_of_joining: self.date_of_joining.clone(),
            date_of_issue: self.date_of_issue.clone(),
            domain: self.domain.clone(),
            status: self.status.clone(),
            grade: self.grade.clone(),
        }
    }

    /// Labeled field values in display order.
    pub fn labeled_fields(&self) -> [(&'static str, &str); 9] {
        [
            ("Certificate Number", &self.certificate_number),
            ("Student Name", &self.student_name),
            ("Registration Number", &self.registration_number),
            ("College", &self.college),
            ("Date of Joining", &self.date_of_joining),
            ("Date of Issue", &self.date_of_issue),
            ("Domain", &self.domain),
            ("Grade", &self.grade),
            ("Status", &self.status),
        ]
    }
}
