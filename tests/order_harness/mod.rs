//! Shared test harness for the order pipeline
//!
//! Provides stub `OrderStore` implementations that record or fail calls, and
//! helpers for seeding orders.
//!
//! # Usage
//!
//! ```rust,ignore
//! mod order_harness;
//! use order_harness::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use serde_json::json;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use orders::core::{CompiledUpdate, Order, OrderId, OrderStatus, OrderStore, StoreError};
use orders::storage::InMemoryOrderStore;

/// An order in the `Created` state with two opaque items
pub fn sample_order() -> Order {
    Order {
        id: OrderId::new(Uuid::new_v4()),
        created_when: Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 0).unwrap(),
        status: OrderStatus::Created,
        items: vec![
            json!({"sku": "A-1", "qty": 2}),
            json!({"sku": "B-7", "qty": 1, "gift": true}),
        ],
    }
}

/// In-memory store with `order` already stored
pub async fn seeded_store(order: &Order) -> InMemoryOrderStore {
    let store = InMemoryOrderStore::new();
    store.put(order).await.unwrap();
    store
}

/// Wraps a store and records every compiled update it receives
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: InMemoryOrderStore,
    updates: Arc<Mutex<Vec<(OrderId, String)>>>,
}

impl RecordingStore {
    pub fn new(inner: InMemoryOrderStore) -> Self {
        Self {
            inner,
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// (id, expression) pairs in call order
    pub fn updates(&self) -> Vec<(OrderId, String)> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderStore for RecordingStore {
    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        self.inner.put(order).await
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &OrderId, update: &CompiledUpdate) -> Result<Order, StoreError> {
        self.updates
            .lock()
            .unwrap()
            .push((*id, update.expression()));
        self.inner.update(id, update).await
    }
}

/// Store whose every call fails with an error built by `make_error`
#[derive(Clone)]
pub struct FailingStore {
    make_error: fn() -> StoreError,
    calls: Arc<Mutex<usize>>,
}

impl FailingStore {
    pub fn new(make_error: fn() -> StoreError) -> Self {
        Self {
            make_error,
            calls: Arc::new(Mutex::new(0)),
        }
    }

    pub fn timeout() -> Self {
        Self::new(|| StoreError::backend("stub", "request timed out after 3000ms"))
    }

    pub fn not_found() -> Self {
        Self::new(|| StoreError::NotFound)
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }

    fn fail(&self) -> StoreError {
        *self.calls.lock().unwrap() += 1;
        (self.make_error)()
    }
}

#[async_trait]
impl OrderStore for FailingStore {
    async fn put(&self, _order: &Order) -> Result<(), StoreError> {
        Err(self.fail())
    }

    async fn get(&self, _id: &OrderId) -> Result<Option<Order>, StoreError> {
        Err(self.fail())
    }

    async fn update(&self, _id: &OrderId, _update: &CompiledUpdate) -> Result<Order, StoreError> {
        Err(self.fail())
    }
}

/// Store that cannot complete updates with more than one assignment
///
/// Mimics a backend that applies the first assignment, hits a fault on the
/// next one and rolls back: it reports an error and leaves the record as it
/// was.
#[derive(Clone)]
pub struct PartialFailureStore {
    inner: InMemoryOrderStore,
}

impl PartialFailureStore {
    pub fn new(inner: InMemoryOrderStore) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl OrderStore for PartialFailureStore {
    async fn put(&self, order: &Order) -> Result<(), StoreError> {
        self.inner.put(order).await
    }

    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        self.inner.get(id).await
    }

    async fn update(&self, id: &OrderId, update: &CompiledUpdate) -> Result<Order, StoreError> {
        if update.len() > 1 {
            let failed = &update.assignments()[1];
            return Err(StoreError::backend(
                "stub",
                format!("transaction cancelled at assignment '{}'", failed.fragment),
            ));
        }
        self.inner.update(id, update).await
    }
}
