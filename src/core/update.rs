//! Declarative field updates accepted by the patch pipeline

use crate::core::order::OrderStatus;
use serde_json::Value;
use std::fmt;

/// A field of an order that can be patched
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OrderField {
    Status,
}

impl OrderField {
    pub const ALL: [OrderField; 1] = [OrderField::Status];

    /// Attribute name in the store and in the JSON representation
    pub fn attribute(&self) -> &'static str {
        match self {
            OrderField::Status => "status",
        }
    }

    /// JSON pointer used by patch documents
    pub fn path(&self) -> &'static str {
        match self {
            OrderField::Status => "/status",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        OrderField::ALL.into_iter().find(|field| field.path() == path)
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// One field/value change, already validated against the field's value set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderUpdate {
    Status(OrderStatus),
}

impl OrderUpdate {
    pub fn field(&self) -> OrderField {
        match self {
            OrderUpdate::Status(_) => OrderField::Status,
        }
    }

    pub fn value(&self) -> Value {
        match self {
            OrderUpdate::Status(status) => Value::String(status.as_str().to_string()),
        }
    }
}
