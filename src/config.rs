//! App Configuration
//!
//! Fixed at build time. `LIBRARY_API_BASE_URL` overrides the backend address.

use catalog_client::{ClientConfig, DEFAULT_BASE_URL};

use crate::sync::RetryPolicy;

/// How long a toast stays on screen
const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub client: ClientConfig,
    /// Listing retry policy (initial load and post-mutation refetch)
    pub list_retry: RetryPolicy,
    pub toast_duration_ms: u32,
}

impl AppConfig {
    pub fn from_build_env() -> Self {
        let base_url = option_env!("LIBRARY_API_BASE_URL").unwrap_or(DEFAULT_BASE_URL);
        Self {
            client: ClientConfig::new(base_url),
            ..Self::default()
        }
    }

    /// Server origin shown on the connection-error page
    pub fn server_origin(&self) -> &str {
        self.client
            .base_url
            .strip_suffix("/api")
            .unwrap_or(&self.client.base_url)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            client: ClientConfig::default(),
            list_retry: RetryPolicy::default(),
            toast_duration_ms: TOAST_DURATION_MS,
        }
    }
}
