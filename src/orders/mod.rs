//! Order services and their HTTP handlers
//!
//! Each service is built from an explicit dependencies struct and returns a
//! typed failure instead of an error chain; the handlers turn those into
//! responses.

pub mod create;
pub mod handlers;
pub mod read;
pub mod update;

pub use create::{CreateOrderDependencies, CreateOrderFailure, OrderCreateService};
pub use handlers::{OrdersState, create_order, get_order, patch_order};
pub use read::{OrderReadService, ReadOrderDependencies, ReadOrderFailure};
pub use update::{OrderUpdateService, UpdateOrderDependencies, UpdateOrderFailure};
