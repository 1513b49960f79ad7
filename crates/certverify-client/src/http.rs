//! Typed client for the verification service.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/api/verify/{certificateNumber}` | [`VerificationClient::fetch_record`] |
//! | GET | `/api/verifications` | [`VerificationClient::list_records`] |
//!
//! No retries: every call issues exactly one request.

use async_trait::async_trait;
use certverify_core::VerificationRecord;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::{ClientConfig, ConfigError};
use crate::error::ClientError;
use crate::query::RecordSource;

#[derive(Debug, Clone)]
pub struct VerificationClient {
    http: reqwest::Client,
    base_url: Url,
}

impl VerificationClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ClientError::Http {
            endpoint: "client_init".into(),
            source: e,
        })?;

        Ok(Self {
            http,
            base_url: config.api_url,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the record for `certificate_number`.
    ///
    /// Calls `GET {base_url}/api/verify/{certificateNumber}` with the number
    /// percent-encoded as a single path segment. A 404 maps to
    /// [`ClientError::NotFound`].
    pub async fn fetch_record(
        &self,
        certificate_number: &str,
    ) -> Result<VerificationRecord, ClientError> {
        let url = self.endpoint(&["api", "verify", certificate_number])?;
        let endpoint = format!("GET {}", url.path());

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            tracing::debug!(certificate_number, "certificate not found");
            return Err(ClientError::NotFound {
                certificate_number: certificate_number.to_string(),
            });
        }

        read_json(resp, endpoint).await
    }

    /// Fetch every record.
    ///
    /// Calls `GET {base_url}/api/verifications`.
    pub async fn list_records(&self) -> Result<Vec<VerificationRecord>, ClientError> {
        let url = self.endpoint(&["api", "verifications"])?;
        let endpoint = format!("GET {}", url.path());

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ClientError::Http {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        read_json(resp, endpoint).await
    }

    /// Append `segments` to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                ConfigError::InvalidUrl(self.base_url.to_string(), "URL cannot be used as a base".into())
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn read_json<T: DeserializeOwned>(
    resp: reqwest::Response,
    endpoint: String,
) -> Result<T, ClientError> {
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        tracing::warn!(%endpoint, status, "verification API returned an error");
        return Err(ClientError::Api {
            endpoint,
            status,
            body,
        });
    }

    resp.json().await.map_err(|e| ClientError::Deserialization {
        endpoint,
        source: e,
    })
}

#[async_trait]
impl RecordSource for VerificationClient {
    async fn fetch(&self, certificate_number: &str) -> Result<VerificationRecord, ClientError> {
        self.fetch_record(certificate_number).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> VerificationClient {
        VerificationClient::new(ClientConfig::new(base).unwrap()).unwrap()
    }

    #[test]
    fn endpoint_encodes_reserved_characters_in_one_segment() {
        let url = client("http://127.0.0.1:8080")
            .endpoint(&["api", "verify", "VLG/2024 003?x"])
            .unwrap();
        assert_eq!(url.path(), "/api/verify/VLG%2F2024%20003%3Fx");
        assert!(url.query().is_none());
    }

    #[test]
    fn endpoint_keeps_base_path_prefix() {
        let url = client("https://verify.example.org/portal/")
            .endpoint(&["api", "verifications"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://verify.example.org/portal/api/verifications"
        );
    }
}
