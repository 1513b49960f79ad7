//! Service connection flags shared by the client subcommands.

use anyhow::{Context, Result};
use certverify_client::{ClientConfig, VerificationClient};
use clap::Args;

#[derive(Args, Debug, Clone, Default)]
pub struct ApiArgs {
    /// Base URL of the verification service. Overrides CERTVERIFY_API_URL.
    #[arg(long)]
    pub api_url: Option<String>,
}

impl ApiArgs {
    /// Environment configuration with command-line overrides applied.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let mut config = ClientConfig::from_env().context("reading client configuration")?;
        if let Some(url) = &self.api_url {
            config.api_url = ClientConfig::new(url)
                .context("parsing --api-url")?
                .api_url;
        }
        Ok(config)
    }

    pub fn client(&self) -> Result<VerificationClient> {
        let config = self.client_config()?;
        tracing::debug!(api_url = %config.api_url, timeout = ?config.timeout, "verification client configured");
        Ok(VerificationClient::new(config)?)
    }
}
