//! HTTP Catalog Client
//!
//! `CatalogApi` over the REST backend. One request per call: no retry,
//! no caching, no request deduplication.

use async_trait::async_trait;
use log::{debug, warn};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::api::CatalogApi;
use crate::config::ClientConfig;
use crate::error::{CatalogError, CatalogResult, Operation};
use crate::models::{Book, CreateBookInput, UpdateBookInput};

/// Characters escaped when a book ID is placed in a path segment
const ID_SEGMENT_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone)]
pub struct HttpCatalogClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.clone(),
        }
    }

    fn books_url(&self) -> String {
        format!("{}/books", self.base_url)
    }

    fn book_url(&self, id: &str) -> String {
        format!("{}/books/{}", self.base_url, utf8_percent_encode(id, ID_SEGMENT_SET))
    }

    /// Send the request and turn any non-2xx status into an error
    async fn send(
        &self,
        operation: Operation,
        request: RequestBuilder,
    ) -> CatalogResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!("{:?} request did not complete: {}", operation, e);
            CatalogError::Transport {
                operation,
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        debug!("{:?} {} -> {}", operation, response.url(), status);
        if status.is_success() {
            Ok(response)
        } else {
            warn!("{:?} failed with status {}", operation, status);
            Err(CatalogError::from_status(operation, status.as_u16()))
        }
    }

    async fn decode<T: DeserializeOwned>(
        operation: Operation,
        response: Response,
    ) -> CatalogResult<T> {
        response.json::<T>().await.map_err(|e| {
            warn!("{:?} returned an unreadable body: {}", operation, e);
            CatalogError::Decode {
                operation,
                reason: e.to_string(),
            }
        })
    }
}

#[async_trait(?Send)]
impl CatalogApi for HttpCatalogClient {
    async fn list_all(&self) -> CatalogResult<Vec<Book>> {
        let op = Operation::List;
        let response = self.send(op, self.http.get(self.books_url())).await?;
        Self::decode(op, response).await
    }

    async fn get_by_id(&self, id: &str) -> CatalogResult<Book> {
        let op = Operation::Get;
        let response = self.send(op, self.http.get(self.book_url(id))).await?;
        Self::decode(op, response).await
    }

    async fn create(&self, input: &CreateBookInput) -> CatalogResult<Book> {
        let op = Operation::Create;
        let response = self.send(op, self.http.post(self.books_url()).json(input)).await?;
        Self::decode(op, response).await
    }

    async fn update(&self, id: &str, input: &UpdateBookInput) -> CatalogResult<Book> {
        let op = Operation::Update;
        let response = self.send(op, self.http.put(self.book_url(id)).json(input)).await?;
        Self::decode(op, response).await
    }

    async fn delete(&self, id: &str) -> CatalogResult<()> {
        self.send(Operation::Delete, self.http.delete(self.book_url(id))).await?;
        Ok(())
    }
}
