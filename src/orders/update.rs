//! Patch-based order updates

use crate::core::expression::compile;
use crate::core::order::{Order, OrderId};
use crate::core::store::{OrderStore, StoreError};
use crate::core::update::OrderUpdate;
use std::sync::Arc;
use thiserror::Error;

/// Why an update did not produce a new order state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UpdateOrderFailure {
    #[error("order not found")]
    ItemNotFound,

    #[error("unknown failure while updating order")]
    UnknownFailure,
}

pub struct UpdateOrderDependencies {
    pub store: Arc<dyn OrderStore>,
}

/// Applies a list of validated updates to one order in a single store write
///
/// Holds no state besides the store handle; concurrent calls are
/// independent and the store decides the winner for a given id.
#[derive(Clone)]
pub struct OrderUpdateService {
    store: Arc<dyn OrderStore>,
}

impl OrderUpdateService {
    pub fn new(UpdateOrderDependencies { store }: UpdateOrderDependencies) -> Self {
        Self { store }
    }

    /// Update an existing order
    ///
    /// `updates` must be non-empty with distinct fields. Exactly one
    /// conditional write is issued and it is never retried.
    pub async fn update(
        &self,
        id: &OrderId,
        updates: &[OrderUpdate],
    ) -> Result<Order, UpdateOrderFailure> {
        let compiled = compile(updates);

        tracing::debug!(
            order_id = %id,
            expression = %compiled.expression(),
            assignments = compiled.len(),
            "Updating order"
        );

        match self.store.update(id, &compiled).await {
            Ok(order) => Ok(order),
            Err(StoreError::NotFound) => {
                tracing::debug!(order_id = %id, "Order to update does not exist");
                Err(UpdateOrderFailure::ItemNotFound)
            }
            Err(err) => {
                tracing::error!(order_id = %id, error = %err, "Failed to update order");
                Err(UpdateOrderFailure::UnknownFailure)
            }
        }
    }
}
