//! The order resource and its factory

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier of an order
///
/// Hyphenated UUIDs are accepted when parsing from a request path, optionally
/// wrapped in braces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(Uuid);

impl OrderId {
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    /// Parse an identifier in hyphenated (`xxxxxxxx-…`) or braced (`{xxxxxxxx-…}`) form
    pub fn parse(raw: &str) -> Option<Self> {
        let hyphenated = raw
            .strip_prefix('{')
            .and_then(|inner| inner.strip_suffix('}'))
            .unwrap_or(raw);

        // Uuid::parse_str also accepts simple and urn forms
        if hyphenated.len() != 36 {
            return None;
        }
        Uuid::parse_str(hyphenated).ok().map(Self)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl From<Uuid> for OrderId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Lifecycle state of an order
///
/// The set is closed; no transition rules are enforced here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Created,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "Created",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("unknown order status '{}'", s))
    }
}

/// An order as stored and returned to clients
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,

    /// Set once at creation
    pub created_when: DateTime<Utc>,

    pub status: OrderStatus,

    /// Line items, opaque to the update pipeline
    #[serde(default)]
    pub items: Vec<serde_json::Value>,
}

type IdSource = Arc<dyn Fn() -> Uuid + Send + Sync>;
type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Builds new orders from their line items
///
/// Id generation and the clock are injected so callers (and tests) control both.
#[derive(Clone)]
pub struct OrderFactory {
    id_source: IdSource,
    clock: Clock,
}

impl OrderFactory {
    pub fn new(
        id_source: impl Fn() -> Uuid + Send + Sync + 'static,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id_source: Arc::new(id_source),
            clock: Arc::new(clock),
        }
    }

    pub fn build(&self, items: Vec<serde_json::Value>) -> Order {
        Order {
            id: OrderId::new((self.id_source)()),
            created_when: (self.clock)(),
            status: OrderStatus::Created,
            items,
        }
    }
}

impl Default for OrderFactory {
    fn default() -> Self {
        Self::new(Uuid::new_v4, Utc::now)
    }
}

impl fmt::Debug for OrderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderFactory").finish_non_exhaustive()
    }
}
