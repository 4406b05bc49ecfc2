//! Store trait for order persistence
//!
//! The framework is agnostic to the underlying key-value store. Backends
//! live in [`crate::storage`].

use crate::core::expression::CompiledUpdate;
use crate::core::order::{Order, OrderId};
use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record exists for the requested key
    #[error("order not found")]
    NotFound,

    /// Timeout, throttling, rejected expression, connectivity...
    #[error("{backend} error: {message}")]
    Backend {
        backend: &'static str,
        message: String,
    },

    /// A record could not be converted to or from the store format
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl StoreError {
    pub fn backend(backend: &'static str, message: impl Into<String>) -> Self {
        StoreError::Backend {
            backend,
            message: message.into(),
        }
    }
}

/// Key-value store holding orders keyed by id
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Write a new order
    async fn put(&self, order: &Order) -> Result<(), StoreError>;

    /// Read an order, `None` when absent
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError>;

    /// Apply every assignment of `update` to an existing order in one atomic write
    ///
    /// Returns the full record after the write. Fails with
    /// [`StoreError::NotFound`] when no record exists for `id`; nothing is
    /// written in that case, nor when any other error is returned.
    async fn update(&self, id: &OrderId, update: &CompiledUpdate) -> Result<Order, StoreError>;
}
