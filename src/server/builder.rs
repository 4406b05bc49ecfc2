//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_order_routes;
use crate::config::ServiceConfig;
use crate::core::events::EventBus;
use crate::core::order::OrderFactory;
use crate::core::store::OrderStore;
use crate::orders::{
    CreateOrderDependencies, OrderCreateService, OrderReadService, OrderUpdateService,
    OrdersState, ReadOrderDependencies, UpdateOrderDependencies,
};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builder for the order service router
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemoryOrderStore::new())
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn OrderStore>>,
    factory: OrderFactory,
    event_bus: Option<EventBus>,
    event_capacity: usize,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            factory: OrderFactory::default(),
            event_bus: None,
            event_capacity: 1024,
            custom_routes: Vec::new(),
        }
    }

    /// Start from a loaded configuration
    pub fn from_config(config: &ServiceConfig) -> Self {
        Self {
            event_capacity: config.event_capacity,
            ..Self::new()
        }
    }

    /// Set the order store (required)
    pub fn with_store(mut self, store: impl OrderStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared order store
    pub fn with_shared_store(mut self, store: Arc<dyn OrderStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the factory used for new orders
    pub fn with_order_factory(mut self, factory: OrderFactory) -> Self {
        self.factory = factory;
        self
    }

    /// Use an existing event bus, e.g. one that already has subscribers
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the state shared by the order handlers
    pub fn build_state(&mut self) -> Result<OrdersState> {
        let store = self
            .store
            .clone()
            .ok_or_else(|| anyhow::anyhow!("OrderStore is required. Call .with_store()"))?;

        let event_bus = self
            .event_bus
            .get_or_insert_with(|| EventBus::new(self.event_capacity))
            .clone();

        Ok(OrdersState {
            create: OrderCreateService::new(CreateOrderDependencies {
                store: store.clone(),
                factory: self.factory.clone(),
            }),
            read: OrderReadService::new(ReadOrderDependencies {
                store: store.clone(),
            }),
            update: OrderUpdateService::new(UpdateOrderDependencies { store }),
            event_bus,
        })
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let state = self.build_state()?;

        let mut app = build_order_routes(state);
        for custom_router in std::mem::take(&mut self.custom_routes) {
            app = app.merge(custom_router);
        }

        Ok(app.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        ))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Handles SIGTERM and SIGINT (Ctrl+C).
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
