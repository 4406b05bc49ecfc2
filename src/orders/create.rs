//! Creating orders

use crate::core::order::{Order, OrderFactory};
use crate::core::store::OrderStore;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CreateOrderFailure {
    #[error("unknown failure while storing order")]
    Unknown,
}

pub struct CreateOrderDependencies {
    pub store: Arc<dyn OrderStore>,
    pub factory: OrderFactory,
}

/// Builds a new order in the `Created` state and stores it
#[derive(Clone)]
pub struct OrderCreateService {
    store: Arc<dyn OrderStore>,
    factory: OrderFactory,
}

impl OrderCreateService {
    pub fn new(CreateOrderDependencies { store, factory }: CreateOrderDependencies) -> Self {
        Self { store, factory }
    }

    pub async fn create(&self, items: Vec<serde_json::Value>) -> Result<Order, CreateOrderFailure> {
        let order = self.factory.build(items);

        match self.store.put(&order).await {
            Ok(()) => {
                tracing::info!(order_id = %order.id, "Order created");
                Ok(order)
            }
            Err(err) => {
                tracing::error!(order_id = %order.id, error = %err, "Failed to store order");
                Err(CreateOrderFailure::Unknown)
            }
        }
    }
}
