//! # List Subcommand
//!
//! `certverify list [--api-url URL]` prints every record as a table.

use anyhow::Result;
use certverify_client::render::view::render_table;
use clap::Args;

use crate::api::ApiArgs;

#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub api: ApiArgs,
}

pub async fn run_list(args: &ListArgs) -> Result<u8> {
    let records = args.api.client()?.list_records().await?;
    if records.is_empty() {
        println!("No records.");
    } else {
        print!("{}", render_table(&records));
    }
    tracing::info!(count = records.len(), "listed verification records");
    Ok(0)
}
