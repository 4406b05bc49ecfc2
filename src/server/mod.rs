//! Server module for building the HTTP surface of the order service
//!
//! The `ServerBuilder` wires a store, the order services and the event bus
//! into an Axum router with:
//! - Order routes (`POST /orders`, `GET /orders/{id}`, `PATCH /orders/{id}`)
//! - Health routes (`/health`, `/healthz`)

pub mod builder;
pub mod router;

pub use builder::ServerBuilder;
pub use router::build_order_routes;
