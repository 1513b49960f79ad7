//! Record store configuration.
//!
//! The connection target is always supplied from the environment or the
//! command line, never compiled in.

use std::time::Duration;

/// Default pool size for the PostgreSQL backend.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Default time to wait for a pooled connection.
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Configuration for opening a record store.
///
/// Custom `Debug` redacts `database_url`, which usually embeds credentials.
#[derive(Clone)]
pub struct StoreConfig {
    /// PostgreSQL connection URL. `None` selects the in-memory backend.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub max_connections: u32,
    /// Seconds to wait when acquiring (or first opening) a connection.
    pub acquire_timeout_secs: u64,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            acquire_timeout_secs: DEFAULT_ACQUIRE_TIMEOUT_SECS,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `DATABASE_URL` (optional; absent means in-memory)
    /// - `CERTVERIFY_DB_MAX_CONNECTIONS` (default: 10)
    /// - `CERTVERIFY_DB_ACQUIRE_TIMEOUT_SECS` (default: 5)
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            max_connections: std::env::var("CERTVERIFY_DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout_secs: std::env::var("CERTVERIFY_DB_ACQUIRE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_ACQUIRE_TIMEOUT_SECS),
        }
    }

    /// Acquire timeout as a [`Duration`].
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_database_url() {
        let cfg = StoreConfig {
            database_url: Some("postgres://admin:hunter2@db/certs".into()),
            ..StoreConfig::default()
        };
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("hunter2"), "credentials leaked: {dbg}");
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn defaults_select_memory_backend() {
        let cfg = StoreConfig::default();
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.max_connections, DEFAULT_MAX_CONNECTIONS);
        assert_eq!(cfg.acquire_timeout(), Duration::from_secs(5));
    }
}
