//! In-memory implementation of OrderStore for testing and development

use crate::core::expression::CompiledUpdate;
use crate::core::order::{Order, OrderId};
use crate::core::store::{OrderStore, StoreError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

const BACKEND: &str = "in-memory";

/// In-memory order store
///
/// Uses RwLock for thread-safe access. An update is computed on a copy of
/// the record and written back only once every assignment has applied.
#[derive(Clone, Default)]
pub struct InMemoryOrderStore {
    orders: Arc<RwLock<HashMap<OrderId, Order>>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        let mut orders = self.orders.write().map_err(|e| {
            StoreError::backend(BACKEND, format!("Failed to acquire write lock: {}", e))
        })?;

        orders.insert(order.id, order.clone());

        Ok(())
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let orders = self.orders.read().map_err(|e| {
            StoreError::backend(BACKEND, format!("Failed to acquire read lock: {}", e))
        })?;

        Ok(orders.get(id).cloned())
    }

    async fn update(&self, id: &OrderId, update: &CompiledUpdate) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().map_err(|e| {
            StoreError::backend(BACKEND, format!("Failed to acquire write lock: {}", e))
        })?;

        let current = orders.get(id).ok_or(StoreError::NotFound)?;
        let updated = apply(current, update)?;

        orders.insert(*id, updated.clone());

        Ok(updated)
    }
}

fn apply(order: &Order, update: &CompiledUpdate) -> Result<Order, StoreError> {
    if update.is_empty() {
        return Err(StoreError::backend(BACKEND, "update expression has no assignments"));
    }

    let mut record = serde_json::to_value(order)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    let Value::Object(attributes) = &mut record else {
        return Err(StoreError::Serialization("order is not an object".to_string()));
    };

    for assignment in update.assignments() {
        attributes.insert(
            assignment.field.attribute().to_string(),
            assignment.value.clone(),
        );
    }

    serde_json::from_value(record).map_err(|e| StoreError::Serialization(e.to_string()))
}
