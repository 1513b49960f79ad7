//! # Lookup Subcommand
//!
//! `certverify lookup <CERT> [--api-url URL] [--export DIR] [--prefix P]`
//!
//! Runs one lookup through the client state machine, prints the result view
//! and, when a record was found and `--export` is given, writes the PDF
//! report into the directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use certverify_client::render::view::render_state;
use certverify_client::{Institution, ReportExporter, VerificationQuery};
use chrono::Utc;
use clap::Args;

use crate::api::ApiArgs;
use crate::EXIT_LOOKUP_FAILED;

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Certificate number to verify. Matched case-insensitively.
    pub certificate_number: String,

    #[command(flatten)]
    pub api: ApiArgs,

    /// Write the verification report PDF into this directory.
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,

    /// Report file name prefix.
    #[arg(long, default_value = certverify_client::render::pdf::DEFAULT_FILE_PREFIX)]
    pub prefix: String,
}

pub async fn run_lookup(args: &LookupArgs) -> Result<u8> {
    let query = VerificationQuery::new(args.api.client()?);

    let lookup = query.submit(&args.certificate_number).await?;
    print!("{}", render_state(&query.state()));

    if lookup.outcome.is_err() {
        return Ok(EXIT_LOOKUP_FAILED);
    }

    if let Some(dir) = &args.export {
        let exporter = ReportExporter::new(Institution::default(), args.prefix.clone());
        if let Some(report) = query.export_current(&exporter, Utc::now())? {
            let path = report
                .write_to(dir)
                .with_context(|| format!("exporting report to {}", dir.display()))?;
            println!("Report saved to {}", path.display());
        }
    }

    Ok(0)
}
