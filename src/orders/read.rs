//! Reading a single order

use crate::core::order::{Order, OrderId};
use crate::core::store::OrderStore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReadOrderFailure {
    #[error("order not found")]
    NotFound,

    #[error("unknown failure while reading order")]
    Unknown,
}

pub struct ReadOrderDependencies {
    pub store: Arc<dyn OrderStore>,
}

#[derive(Clone)]
pub struct OrderReadService {
    store: Arc<dyn OrderStore>,
}

impl OrderReadService {
    pub fn new(ReadOrderDependencies { store }: ReadOrderDependencies) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &OrderId) -> Result<Order, ReadOrderFailure> {
        match self.store.get(id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(ReadOrderFailure::NotFound),
            Err(err) => {
                tracing::error!(order_id = %id, error = %err, "Failed to read order");
                Err(ReadOrderFailure::Unknown)
            }
        }
    }
}
