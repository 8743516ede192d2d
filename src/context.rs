//! Application Context
//!
//! Shared state provided via Leptos Context API.

use leptos::prelude::*;

use catalog_client::HttpCatalogClient;

use crate::config::AppConfig;
use crate::store::AppStore;
use crate::sync::{CatalogSync, RetryPolicy};

/// Orchestrator as wired in the running app
pub type AppSync = CatalogSync<HttpCatalogClient, AppStore>;

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Catalog view state
    pub store: AppStore,
    /// HTTP client (not Send on wasm, so held in local storage)
    client: StoredValue<HttpCatalogClient, LocalStorage>,
    retry: RetryPolicy,
    /// Toast lifetime
    pub toast_duration_ms: u32,
    /// Backend origin for the connection-error page
    pub server_origin: StoredValue<String>,
}

impl AppContext {
    pub fn new(store: AppStore, config: &AppConfig) -> Self {
        Self {
            store,
            client: StoredValue::new_local(HttpCatalogClient::new(&config.client)),
            retry: config.list_retry,
            toast_duration_ms: config.toast_duration_ms,
            server_origin: StoredValue::new(config.server_origin().to_string()),
        }
    }

    /// Orchestrator bound to this app's store and client
    pub fn sync(&self) -> AppSync {
        CatalogSync::new(self.client.get_value(), self.store, self.retry)
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    use_context::<AppContext>().expect("AppContext should be provided")
}
