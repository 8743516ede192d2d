//! Catalog API Trait
//!
//! The abstract interface the UI talks to. `HttpCatalogClient` is the real
//! implementation; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::CatalogResult;
use crate::models::{Book, CreateBookInput, UpdateBookInput};

/// CRUD operations over the remote book catalog
///
/// Futures are not `Send`: on wasm32 they wrap browser promises.
#[async_trait(?Send)]
pub trait CatalogApi {
    /// List every book, in backend order
    async fn list_all(&self) -> CatalogResult<Vec<Book>>;

    /// Fetch one book by ID
    async fn get_by_id(&self, id: &str) -> CatalogResult<Book>;

    /// Create a book; the backend assigns id and timestamps
    async fn create(&self, input: &CreateBookInput) -> CatalogResult<Book>;

    /// Apply a partial patch to a book
    async fn update(&self, id: &str, input: &UpdateBookInput) -> CatalogResult<Book>;

    /// Delete a book by ID
    async fn delete(&self, id: &str) -> CatalogResult<()>;
}
