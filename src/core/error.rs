//! Typed error handling for the HTTP surface
//!
//! Services return their own small failure enums (see [`crate::orders`]).
//! The transport maps those, plus request and validation problems, into
//! [`ApiError`], which knows its status code, error code and JSON body.
//!
//! # Error Categories
//!
//! - [`OrderError`]: the addressed order cannot be served
//! - [`RequestError`]: malformed path parameters
//! - [`ValidationError`]: body is not JSON or fails payload validation
//! - `Internal`: anything else; never carries internal detail to the client
//!
//! # Example
//!
//! ```rust,ignore
//! match update_service.update(&id, &updates).await {
//!     Ok(order) => Ok(Json(order)),
//!     Err(UpdateOrderFailure::ItemNotFound) => Err(ApiError::Order(OrderError::NotFound { id })),
//!     Err(UpdateOrderFailure::UnknownFailure) => Err(ApiError::Internal),
//! }
//! ```

use crate::core::order::OrderId;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The error type returned by HTTP handlers
#[derive(Debug)]
pub enum ApiError {
    /// Order-related errors
    Order(OrderError),

    /// Path or parameter errors
    Request(RequestError),

    /// Payload errors
    Validation(ValidationError),

    /// Unclassified server-side failure
    Internal,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Order(e) => write!(f, "{}", e),
            ApiError::Request(e) => write!(f, "{}", e),
            ApiError::Validation(e) => write!(f, "{}", e),
            ApiError::Internal => write!(f, "Internal server error"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Order(e) => Some(e),
            ApiError::Request(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Internal => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Order(e) => e.status_code(),
            ApiError::Request(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::Order(e) => e.error_code(),
            ApiError::Request(e) => e.error_code(),
            ApiError::Validation(e) => e.error_code(),
            ApiError::Internal => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::Order(OrderError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id.to_string() }))
            }
            ApiError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Order Errors
// =============================================================================

#[derive(Debug)]
pub enum OrderError {
    /// No order exists for the id
    NotFound { id: OrderId },
}

impl fmt::Display for OrderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderError::NotFound { id } => write!(f, "Order with id '{}' not found", id),
        }
    }
}

impl std::error::Error for OrderError {}

impl OrderError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            OrderError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::NotFound { .. } => "ORDER_NOT_FOUND",
        }
    }
}

impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        ApiError::Order(err)
    }
}

// =============================================================================
// Request Errors
// =============================================================================

#[derive(Debug)]
pub enum RequestError {
    /// Path id is not a hyphenated UUID
    InvalidOrderId { id: String },
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::InvalidOrderId { id } => write!(f, "Invalid order id: '{}'", id),
        }
    }
}

impl std::error::Error for RequestError {}

impl RequestError {
    pub fn error_code(&self) -> &'static str {
        match self {
            RequestError::InvalidOrderId { .. } => "ORDER_ID_INVALID",
        }
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        ApiError::Request(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Errors related to request payloads
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Body could not be parsed as JSON at all
    InvalidJson { message: String },

    /// Body is JSON but violates the payload rules
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidJson { message } => {
                write!(f, "Payload is not JSON: {}", message)
            }
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Payload is invalid: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    pub fn error_code(&self) -> &'static str {
        match self {
            ValidationError::InvalidJson { .. } => "PAYLOAD_NOT_JSON",
            ValidationError::FieldErrors(_) => "PAYLOAD_INVALID",
        }
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldValidationError::new(field.to_string(), message)
                })
            })
            .collect();
        ValidationError::FieldErrors(fields)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err)
    }
}
