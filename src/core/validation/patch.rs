//! Patch document parsing
//!
//! Accepted shape:
//!
//! ```json
//! { "changes": [ { "op": "replace", "path": "/status", "value": "Shipped" } ] }
//! ```

use crate::core::error::{FieldValidationError, ValidationError};
use crate::core::order::OrderStatus;
use crate::core::update::{OrderField, OrderUpdate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use validator::Validate;

/// Body of a `PATCH /orders/{id}` request
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct UpdateOrderPayload {
    #[serde(default)]
    #[validate(length(min = 1, message = "at least one change is required"))]
    pub changes: Vec<PatchOperation>,

    /// Members other than `changes`; any entry here rejects the document
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

/// One entry of `changes`
///
/// Members are optional here so that a missing member is reported against
/// its position instead of failing the whole document. Unknown members are
/// kept so they can be reported the same way.
#[derive(Debug, Serialize, Deserialize)]
pub struct PatchOperation {
    #[serde(default)]
    pub op: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub value: Option<Value>,
    #[serde(flatten)]
    pub unknown: Map<String, Value>,
}

const REPLACE: &str = "replace";

/// Parse and validate a raw patch body into typed updates, in document order
pub fn parse_update_payload(body: &str) -> Result<Vec<OrderUpdate>, ValidationError> {
    let json: Value = serde_json::from_str(body).map_err(|e| ValidationError::InvalidJson {
        message: e.to_string(),
    })?;

    let payload: UpdateOrderPayload = serde_json::from_value(json).map_err(|e| {
        ValidationError::FieldErrors(vec![FieldValidationError::new("changes", e.to_string())])
    })?;

    payload.validate()?;

    let mut errors: Vec<FieldValidationError> =
        payload.unknown.keys().map(unknown_member).collect();
    let mut updates = Vec::with_capacity(payload.changes.len());
    let mut seen = HashSet::new();

    for (index, operation) in payload.changes.iter().enumerate() {
        match parse_operation(index, operation) {
            Ok(update) => {
                if seen.insert(update.field()) {
                    updates.push(update);
                } else {
                    errors.push(FieldValidationError::new(
                        format!("changes[{}].path", index),
                        format!("duplicate path '{}'", update.field().path()),
                    ));
                }
            }
            Err(mut operation_errors) => errors.append(&mut operation_errors),
        }
    }

    if errors.is_empty() {
        Ok(updates)
    } else {
        Err(ValidationError::FieldErrors(errors))
    }
}

fn parse_operation(
    index: usize,
    operation: &PatchOperation,
) -> Result<OrderUpdate, Vec<FieldValidationError>> {
    let member = |name: &str| format!("changes[{}].{}", index, name);
    let mut errors = Vec::new();

    match operation.op.as_deref() {
        Some(REPLACE) => {}
        Some(other) => errors.push(FieldValidationError::new(
            member("op"),
            format!("unsupported op '{}', expected '{}'", other, REPLACE),
        )),
        None => errors.push(FieldValidationError::new(member("op"), "op is required")),
    }

    let field = match operation.path.as_deref() {
        Some(path) => {
            let field = OrderField::from_path(path);
            if field.is_none() {
                errors.push(FieldValidationError::new(
                    member("path"),
                    format!("unsupported path '{}'", path),
                ));
            }
            field
        }
        None => {
            errors.push(FieldValidationError::new(member("path"), "path is required"));
            None
        }
    };

    let update = match (field, operation.value.as_ref()) {
        (_, None) => {
            errors.push(FieldValidationError::new(member("value"), "value is required"));
            None
        }
        (Some(field), Some(value)) => match parse_value(field, value) {
            Ok(update) => Some(update),
            Err(message) => {
                errors.push(FieldValidationError::new(member("value"), message));
                None
            }
        },
        (None, Some(_)) => None,
    };

    errors.extend(
        operation
            .unknown
            .keys()
            .map(|name| unknown_member(member(name.as_str()))),
    );

    match update {
        Some(update) if errors.is_empty() => Ok(update),
        _ => Err(errors),
    }
}

fn unknown_member(name: impl Into<String>) -> FieldValidationError {
    FieldValidationError::new(name, "unknown member")
}

fn parse_value(field: OrderField, value: &Value) -> Result<OrderUpdate, String> {
    match field {
        OrderField::Status => {
            let raw = value
                .as_str()
                .ok_or_else(|| "status must be a string".to_string())?;
            let status = raw.parse::<OrderStatus>()?;
            Ok(OrderUpdate::Status(status))
        }
    }
}
