//! Library Catalog Client
//!
//! Typed bindings to the catalog REST backend:
//! - models: wire records (`Book`, create/update inputs)
//! - api: the `CatalogApi` trait the UI programs against
//! - http: `reqwest` implementation of the trait
//! - error: failure taxonomy shared by every operation

mod api;
mod config;
mod error;
mod http;
mod models;

pub use api::CatalogApi;
pub use config::{ClientConfig, DEFAULT_BASE_URL};
pub use error::{CatalogError, CatalogResult, Operation};
pub use http::HttpCatalogClient;
pub use models::{Book, CreateBookInput, UpdateBookInput};
