//! Plain-text rendering for terminals.

use std::fmt::Write;

use certverify_core::VerificationRecord;

use crate::query::{LookupFailure, QueryState};

/// Header shown above a found record.
pub const VERIFIED_HEADER: &str = "Certificate Verified";

/// Labeled view of all nine fields under the verified header and status badge.
pub fn render_record(record: &VerificationRecord) -> String {
    let fields = record.labeled_fields();
    let width = fields.iter().map(|(label, _)| label.len()).max().unwrap_or(0);

    let mut out = String::new();
    let _ = writeln!(out, "{VERIFIED_HEADER}  [{}]", record.status.to_uppercase());
    let _ = writeln!(out, "{}", "-".repeat(VERIFIED_HEADER.len() + record.status.len() + 4));
    for (label, value) in fields {
        let _ = writeln!(out, "{label:<width$}  {value}");
    }
    out
}

pub fn render_failure(failure: &LookupFailure) -> String {
    format!("{}\n", failure.message())
}

/// Render whatever the lookup currently shows.
pub fn render_state(state: &QueryState) -> String {
    match state {
        QueryState::Idle => String::new(),
        QueryState::Pending { query } => format!("Verifying {query}...\n"),
        QueryState::Settled {
            outcome: Ok(record),
            ..
        } => render_record(record),
        QueryState::Settled {
            outcome: Err(failure),
            ..
        } => render_failure(failure),
    }
}

/// One row per record: certificate number, student, domain, grade, status.
pub fn render_table(records: &[VerificationRecord]) -> String {
    const HEADERS: [&str; 5] = ["CERTIFICATE", "STUDENT", "DOMAIN", "GRADE", "STATUS"];

    let rows: Vec<[&str; 5]> = records
        .iter()
        .map(|r| {
            [
                r.certificate_number.as_str(),
                r.student_name.as_str(),
                r.domain.as_str(),
                r.grade.as_str(),
                r.status.as_str(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(HEADERS).chain(rows) {
        let line: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }
    out
}
