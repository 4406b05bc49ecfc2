//! HTTP handlers for order operations
//!
//! Handlers only translate: extractors validate the request, services do the
//! work, and service failures are mapped to [`ApiError`] here. Internal error
//! detail never reaches the response body.

use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use serde_json::Value;
use validator::Validate;

use crate::core::error::{ApiError, FieldValidationError, OrderError, ValidationError};
use crate::core::events::{EventBus, OrderEvent};
use crate::core::order::Order;
use crate::core::update::OrderField;
use crate::core::validation::{OrderIdPath, ValidatedPatch};
use crate::orders::{
    CreateOrderFailure, OrderCreateService, OrderReadService, OrderUpdateService,
    ReadOrderFailure, UpdateOrderFailure,
};

/// Application state shared across order handlers
#[derive(Clone)]
pub struct OrdersState {
    pub create: OrderCreateService,
    pub read: OrderReadService,
    pub update: OrderUpdateService,
    pub event_bus: EventBus,
}

/// Request body for creating an order
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, message = "an order needs at least one item"))]
    pub items: Vec<Value>,
}

/// Create an order
///
/// POST /orders
pub async fn create_order(
    State(state): State<OrdersState>,
    body: String,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let request = parse_create_request(&body)?;

    let order = state
        .create
        .create(request.items)
        .await
        .map_err(|failure| match failure {
            CreateOrderFailure::Unknown => ApiError::Internal,
        })?;

    state.event_bus.publish(OrderEvent::Created { order_id: order.id });

    Ok((StatusCode::CREATED, Json(order)))
}

/// Get an order by id
///
/// GET /orders/{id}
pub async fn get_order(
    State(state): State<OrdersState>,
    OrderIdPath(id): OrderIdPath,
) -> Result<Json<Order>, ApiError> {
    let order = state.read.get(&id).await.map_err(|failure| match failure {
        ReadOrderFailure::NotFound => ApiError::from(OrderError::NotFound { id }),
        ReadOrderFailure::Unknown => ApiError::Internal,
    })?;

    Ok(Json(order))
}

/// Apply a patch document to an order
///
/// PATCH /orders/{id}
///
/// ```json
/// { "changes": [ { "op": "replace", "path": "/status", "value": "Shipped" } ] }
/// ```
pub async fn patch_order(
    State(state): State<OrdersState>,
    OrderIdPath(id): OrderIdPath,
    ValidatedPatch(updates): ValidatedPatch,
) -> Result<Json<Order>, ApiError> {
    let order = state
        .update
        .update(&id, &updates)
        .await
        .map_err(|failure| match failure {
            UpdateOrderFailure::ItemNotFound => ApiError::from(OrderError::NotFound { id }),
            UpdateOrderFailure::UnknownFailure => ApiError::Internal,
        })?;

    if updates.iter().any(|update| update.field() == OrderField::Status) {
        state.event_bus.publish(OrderEvent::StatusSet {
            order_id: order.id,
            status: order.status,
        });
    }

    Ok(Json(order))
}

fn parse_create_request(body: &str) -> Result<CreateOrderRequest, ValidationError> {
    let json: Value = serde_json::from_str(body).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;

    let request: CreateOrderRequest = serde_json::from_value(json).map_err(|e| {
        ValidationError::FieldErrors(vec![FieldValidationError::new("items", e.to_string())])
    })?;

    request.validate()?;

    Ok(request)
}
