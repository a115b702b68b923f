//! Persistence backend abstraction.
//!
//! This module defines the common interface remote item backends implement,
//! along with the error type shared by backend operations.

use async_trait::async_trait;

use crate::entities::item::{CreateItemArgs, TodoItem, UpdateItemArgs};

pub mod rest;

/// Common error types for backend operations.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Backend trait that all remote item backends must implement.
///
/// This trait defines the common interface for dispatching item mutations
/// to a remote service, so the sync service and tests are written against
/// the seam rather than a concrete HTTP client.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Returns the backend type identifier (e.g., "rest").
    fn backend_type(&self) -> &str;

    /// Fetch the full item collection.
    async fn fetch_items(&self) -> Result<Vec<TodoItem>, BackendError>;

    /// Create an item; the returned item carries the server-assigned id.
    async fn create_item(&self, args: CreateItemArgs) -> Result<TodoItem, BackendError>;

    /// Apply a partial update to the item with the given id.
    async fn update_item(&self, id: i64, args: UpdateItemArgs) -> Result<TodoItem, BackendError>;

    /// Delete the item with the given id.
    async fn delete_item(&self, id: i64) -> Result<(), BackendError>;
}
