//! Client Errors
//!
//! Every catalog operation fails with a `CatalogError`. Not-found is only
//! reported by operations addressing a single book.

use thiserror::Error;

/// Common result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// The five backend operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// Generic message shown when the operation fails
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch books",
            Operation::Get => "Failed to fetch book",
            Operation::Create => "Failed to create book",
            Operation::Update => "Failed to update book",
            Operation::Delete => "Failed to delete book",
        }
    }

    /// Whether a 404 from this operation means the addressed book is gone
    pub fn reports_not_found(&self) -> bool {
        matches!(self, Operation::Get | Operation::Update | Operation::Delete)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Book not found")]
    NotFound,

    #[error("{}", .operation.failure_message())]
    RequestFailed { operation: Operation, status: u16 },

    #[error("{}: {reason}", .operation.failure_message())]
    Transport { operation: Operation, reason: String },

    #[error("{}: unexpected response body ({reason})", .operation.failure_message())]
    Decode { operation: Operation, reason: String },
}

impl CatalogError {
    /// Map a non-success HTTP status to the error for `operation`
    pub fn from_status(operation: Operation, status: u16) -> Self {
        if status == 404 && operation.reports_not_found() {
            CatalogError::NotFound
        } else {
            CatalogError::RequestFailed { operation, status }
        }
    }
}
