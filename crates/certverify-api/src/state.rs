//! # Application State
//!
//! Shared state for the Axum application: the injected record store, request
//! metrics, and configuration.

use std::sync::Arc;

use certverify_store::{StoreConfig, VerificationStore};

use crate::middleware::metrics::ApiMetrics;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Record store selection and pool settings.
    pub store: StoreConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            store: StoreConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// - `PORT` (default: 8080)
    /// - store variables, see [`StoreConfig::from_env`]
    pub fn from_env() -> Self {
        Self {
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(DEFAULT_PORT),
            store: StoreConfig::from_env(),
        }
    }
}

/// Shared application state passed to all route handlers.
///
/// Cheap to clone: the store and counters are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn VerificationStore>,
    pub metrics: ApiMetrics,
    pub config: AppConfig,
}

impl AppState {
    /// State over `store` with default configuration.
    pub fn new(store: Arc<dyn VerificationStore>) -> Self {
        Self::with_config(AppConfig::default(), store)
    }

    pub fn with_config(config: AppConfig, store: Arc<dyn VerificationStore>) -> Self {
        Self {
            store,
            metrics: ApiMetrics::new(),
            config,
        }
    }
}
