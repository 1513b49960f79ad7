//! # Seed Subcommand
//!
//! `certverify seed <FILE.json> [--database-url URL]`
//!
//! Out-of-band population of the record store. The file holds a JSON array
//! of records in the wire shape (camelCase, no `_id`). Each record is
//! validated and inserted in file order; records whose certificate number
//! already exists are skipped and reported.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use certverify_core::NewVerificationRecord;
use certverify_store::{open_store, StoreConfig, StoreError, VerificationStore};
use clap::Args;

#[derive(Args, Debug)]
pub struct SeedArgs {
    /// JSON file containing an array of records.
    #[arg(value_name = "FILE.json")]
    pub file: PathBuf,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,
}

/// Outcome of a seeding run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SeedSummary {
    pub inserted: usize,
    /// Certificate numbers skipped as duplicates.
    pub skipped: Vec<String>,
}

pub async fn run_seed(args: &SeedArgs) -> Result<u8> {
    let Some(url) = args.database_url.clone() else {
        bail!("seeding needs a database: pass --database-url or set DATABASE_URL");
    };

    let records = load_seed_file(&args.file)?;
    let config = StoreConfig {
        database_url: Some(url),
        ..StoreConfig::from_env()
    };
    let store = open_store(&config);

    let summary = seed_store(store.as_ref(), records).await?;
    println!(
        "Inserted {} record(s), skipped {} duplicate(s).",
        summary.inserted,
        summary.skipped.len()
    );
    for cert in &summary.skipped {
        println!("  skipped {cert}");
    }
    Ok(0)
}

pub fn load_seed_file(path: &Path) -> Result<Vec<NewVerificationRecord>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    let records: Vec<NewVerificationRecord> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing seed file {}", path.display()))?;
    for (i, record) in records.iter().enumerate() {
        record
            .validate()
            .with_context(|| format!("record #{} in {}", i + 1, path.display()))?;
    }
    Ok(records)
}

/// Insert `records` in order, skipping duplicates. Any other failure stops
/// the run; records inserted before it stay.
pub async fn seed_store(
    store: &dyn VerificationStore,
    records: Vec<NewVerificationRecord>,
) -> Result<SeedSummary> {
    let mut summary = SeedSummary::default();
    for record in records {
        let cert = record.certificate_number.clone();
        match store.insert(record).await {
            Ok(saved) => {
                tracing::debug!(certificate_number = %saved.certificate_number, "record inserted");
                summary.inserted += 1;
            }
            Err(StoreError::Duplicate(_)) => {
                tracing::warn!(certificate_number = %cert, "duplicate certificate number skipped");
                summary.skipped.push(cert);
            }
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("inserting {cert} after {} successful insert(s)", summary.inserted)
                })
            }
        }
    }
    Ok(summary)
}
