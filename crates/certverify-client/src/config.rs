//! Client configuration.

use std::time::Duration;

use url::Url;

/// Default base URL of the verification service.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";

/// Configuration for [`VerificationClient`](crate::VerificationClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the verification service.
    pub api_url: Url,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    /// Configuration targeting `api_url` with no timeout.
    pub fn new(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_url("api_url", api_url)?,
            timeout: None,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `CERTVERIFY_API_URL` (default: `http://127.0.0.1:8080`)
    /// - `CERTVERIFY_API_TIMEOUT_SECS` (default: unset, no timeout)
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var("CERTVERIFY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let api_url = parse_url("CERTVERIFY_API_URL", &raw)?;

        let timeout = match std::env::var("CERTVERIFY_API_TIMEOUT_SECS") {
            Ok(secs) => Some(parse_timeout(&secs)?),
            Err(_) => None,
        };

        Ok(Self { api_url, timeout })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn parse_url(var: &str, raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(
            var.to_string(),
            "URL cannot be used as a base".into(),
        ));
    }
    Ok(url)
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::InvalidTimeout(raw.to_string()))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid CERTVERIFY_API_TIMEOUT_SECS value: {0:?}")]
    InvalidTimeout(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_localhost() {
        let cfg = ClientConfig::new(DEFAULT_API_URL).unwrap();
        assert_eq!(cfg.api_url.as_str(), "http://127.0.0.1:8080/");
        assert!(cfg.timeout.is_none());
    }

    #[test]
    fn new_rejects_garbage() {
        assert!(matches!(
            ClientConfig::new("not a url"),
            Err(ConfigError::InvalidUrl(..))
        ));
        assert!(ClientConfig::new("mailto:ops@example.com").is_err());
    }

    #[test]
    fn timeout_parsing() {
        assert_eq!(parse_timeout("15").unwrap(), Duration::from_secs(15));
        assert!(matches!(
            parse_timeout("soon"),
            Err(ConfigError::InvalidTimeout(_))
        ));
    }
}
