//! Update expression compiler
//!
//! Turns an ordered list of [`OrderUpdate`]s into a single `SET` expression
//! plus a placeholder → value mapping, ready for one atomic conditional write.
//!
//! ```rust,ignore
//! let compiled = compile(&[OrderUpdate::Status(OrderStatus::Shipped)]);
//! assert_eq!(compiled.expression(), "SET status = :a");
//! assert_eq!(compiled.values()["a"], json!("Shipped"));
//! ```
//!
//! The compiler is pure. Field and value validation, and rejection of empty
//! or duplicate-field lists, happen before this point.

use crate::core::update::{OrderField, OrderUpdate};
use indexmap::IndexMap;
use serde_json::Value;

/// One `<field> = :<key>` assignment of a compiled update
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub key: String,
    pub field: OrderField,
    pub fragment: String,
    pub value: Value,
}

/// Store-agnostic form of a list of updates
///
/// Assignments keep the order of the updates they were compiled from.
#[derive(Clone, Debug, PartialEq)]
pub struct CompiledUpdate {
    assignments: Vec<Assignment>,
}

impl CompiledUpdate {
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// `SET a = :a, b = :b, ...`
    pub fn expression(&self) -> String {
        let fragments: Vec<&str> = self
            .assignments
            .iter()
            .map(|assignment| assignment.fragment.as_str())
            .collect();
        format!("SET {}", fragments.join(", "))
    }

    /// Placeholder key (without the leading `:`) → value, in update order
    pub fn values(&self) -> IndexMap<String, Value> {
        self.assignments
            .iter()
            .map(|assignment| (assignment.key.clone(), assignment.value.clone()))
            .collect()
    }

    /// Same expression with every attribute name replaced by a `#name` alias
    ///
    /// Needed by stores where field names such as `status` are reserved words.
    pub fn aliased_expression(&self) -> String {
        let fragments: Vec<String> = self
            .assignments
            .iter()
            .map(|assignment| format!("#{} = :{}", assignment.field.attribute(), assignment.key))
            .collect();
        format!("SET {}", fragments.join(", "))
    }

    /// Alias → attribute name for [`aliased_expression`](Self::aliased_expression)
    pub fn attribute_names(&self) -> IndexMap<String, String> {
        self.assignments
            .iter()
            .map(|assignment| {
                let name = assignment.field.attribute();
                (format!("#{}", name), name.to_string())
            })
            .collect()
    }
}

/// Compile updates into a single `SET` expression
pub fn compile(updates: &[OrderUpdate]) -> CompiledUpdate {
    let assignments = updates
        .iter()
        .enumerate()
        .map(|(index, update)| {
            let key = placeholder_key(index);
            let field = update.field();
            Assignment {
                fragment: format!("{} = :{}", field.attribute(), key),
                key,
                field,
                value: update.value(),
            }
        })
        .collect();

    CompiledUpdate { assignments }
}

/// Encode a position as a placeholder key
///
/// Each decimal digit maps to a letter (`0 → a` … `9 → j`), so `10` becomes
/// `"ba"`. Decimal rendering is unique and the digit map is a bijection,
/// so distinct indices never share a key.
pub fn placeholder_key(index: usize) -> String {
    index
        .to_string()
        .bytes()
        .map(|digit| char::from(b'a' + (digit - b'0')))
        .collect()
}
