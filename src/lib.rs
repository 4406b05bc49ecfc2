//! # Orders
//!
//! An order resource served over HTTP and backed by a key-value store, with
//! atomic partial updates.
//!
//! ## Features
//!
//! - **Patch Documents**: `PATCH /orders/{id}` accepts `replace` operations on supported fields
//! - **Single Atomic Write**: every patch becomes one conditional `SET` expression
//! - **Typed Outcomes**: services return `Result<Order, Failure>`; nothing is thrown past them
//! - **Pluggable Stores**: in-memory for tests and development, DynamoDB behind a feature
//! - **Status Events**: status changes are published on an in-process event bus
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use orders::prelude::*;
//!
//! let store: Arc<dyn OrderStore> = Arc::new(InMemoryOrderStore::new());
//! let updates = OrderUpdateService::new(UpdateOrderDependencies { store });
//!
//! match updates.update(&id, &[OrderUpdate::Status(OrderStatus::Shipped)]).await {
//!     Ok(order) => println!("now {}", order.status),
//!     Err(UpdateOrderFailure::ItemNotFound) => println!("no such order"),
//!     Err(UpdateOrderFailure::UnknownFailure) => println!("try again later"),
//! }
//! ```

pub mod config;
pub mod core;
pub mod orders;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, CompiledUpdate, EventBus, EventEnvelope, Order, OrderEvent, OrderFactory,
        OrderField, OrderId, OrderStatus, OrderStore, OrderUpdate, StoreError, compile,
    };

    // === Services ===
    pub use crate::orders::{
        CreateOrderDependencies, CreateOrderFailure, OrderCreateService, OrderReadService,
        OrderUpdateService, OrdersState, ReadOrderDependencies, ReadOrderFailure,
        UpdateOrderDependencies, UpdateOrderFailure,
    };

    // === Storage ===
    #[cfg(feature = "dynamodb")]
    pub use crate::storage::DynamoDBOrderStore;
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryOrderStore;

    // === Config & Server ===
    pub use crate::config::ServiceConfig;
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
