//! Validation of incoming patch requests
//!
//! Requests are checked here before they reach the update pipeline: the
//! pipeline trusts that every update names a supported field, carries a value
//! from that field's value set and that no field is targeted twice.

pub mod extractor;
pub mod patch;

pub use extractor::{OrderIdPath, ValidatedPatch};
pub use patch::{PatchOperation, UpdateOrderPayload, parse_update_payload};
