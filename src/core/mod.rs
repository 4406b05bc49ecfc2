//! Core module containing the order model, the update compiler and the store seam

pub mod error;
pub mod events;
pub mod expression;
pub mod order;
pub mod store;
pub mod update;
pub mod validation;

pub use error::{ApiError, ErrorResponse, OrderError, RequestError, ValidationError};
pub use events::{EventBus, EventEnvelope, OrderEvent};
pub use expression::{Assignment, CompiledUpdate, compile, placeholder_key};
pub use order::{Order, OrderFactory, OrderId, OrderStatus};
pub use store::{OrderStore, StoreError};
pub use update::{OrderField, OrderUpdate};
