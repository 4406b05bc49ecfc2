//! Router builder utilities for order routes

use crate::orders::handlers::{OrdersState, create_order, get_order, patch_order};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build order routes
///
/// - POST /orders - Create an order
/// - GET /orders/{id} - Get an order
/// - PATCH /orders/{id} - Apply a patch document to an order
/// - GET /health, GET /healthz - Liveness
pub fn build_order_routes(state: OrdersState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
        .route("/orders", post(create_order))
        .route("/orders/{id}", get(get_order).patch(patch_order))
        .with_state(state)
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "orders-rs"
    }))
}
