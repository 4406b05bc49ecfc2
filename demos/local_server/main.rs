//! Order service backed by the in-memory store
//!
//! Run with:
//! ```sh
//! TABLE_NAME=orders cargo run --example local_server
//! ```
//!
//! Then try:
//! ```sh
//! curl -X POST localhost:3000/orders -d '{"items":[{"sku":"A-1","qty":2}]}'
//! curl -X PATCH localhost:3000/orders/<id> \
//!   -d '{"changes":[{"op":"replace","path":"/status","value":"Shipped"}]}'
//! ```

use anyhow::Result;
use orders::prelude::*;
use tokio::sync::broadcast::error::RecvError;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,orders=debug")),
        )
        .init();

    let config = ServiceConfig::from_env().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Falling back to default configuration");
        ServiceConfig::new("orders")
    });

    let event_bus = EventBus::new(config.event_capacity);
    let mut events = event_bus.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(envelope) => tracing::info!(
                    order_id = %envelope.event.order_id(),
                    action = envelope.event.action(),
                    "Order event"
                ),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Event logger lagged behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    ServerBuilder::from_config(&config)
        .with_store(InMemoryOrderStore::new())
        .with_event_bus(event_bus)
        .serve(&config.listen_addr)
        .await
}
