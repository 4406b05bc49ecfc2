//! HTTP-level tests for the order routes
//!
//! JSON → HTTP request → extractor → service → store → HTTP response → JSON.

mod order_harness;

use axum::http::StatusCode;
use axum_test::TestServer;
use order_harness::*;
use orders::core::{EventBus, Order, OrderEvent, OrderStatus, OrderStore};
use orders::server::ServerBuilder;
use orders::storage::InMemoryOrderStore;
use serde_json::{Value, json};

fn make_server(store: impl OrderStore + 'static) -> TestServer {
    let router = ServerBuilder::new().with_store(store).build().unwrap();
    TestServer::try_new(router).unwrap()
}

fn ship() -> Value {
    json!({ "changes": [{ "op": "replace", "path": "/status", "value": "Shipped" }] })
}

// =============================================================================
// PATCH /orders/{id}
// =============================================================================

mod patch_tests {
    use super::*;

    #[tokio::test]
    async fn test_patch_returns_updated_order() {
        let order = sample_order();
        let server = make_server(seeded_store(&order).await);

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .json(&ship())
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], order.id.to_string());
        assert_eq!(body["status"], "Shipped");
        assert_eq!(body["createdWhen"], "2024-05-17T09:30:00Z");
        assert_eq!(body["items"], json!(order.items));
    }

    #[tokio::test]
    async fn test_patch_unknown_order_returns_404() {
        let order = sample_order();
        let server = make_server(InMemoryOrderStore::new());

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .json(&ship())
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(body["code"], "ORDER_NOT_FOUND");
        assert_eq!(body["details"]["id"], order.id.to_string());
    }

    #[tokio::test]
    async fn test_patch_store_fault_returns_500_without_detail() {
        let server = make_server(FailingStore::timeout());

        let response = server
            .patch(&format!("/orders/{}", sample_order().id))
            .json(&ship())
            .await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        let body: Value = response.json();
        assert_eq!(body["code"], "INTERNAL_ERROR");
        assert_eq!(body["message"], "Internal server error");
        assert!(!response.text().contains("timed out"));
    }

    #[tokio::test]
    async fn test_patch_invalid_id_returns_400() {
        let store = FailingStore::timeout();
        let server = make_server(store.clone());

        let response = server.patch("/orders/not-a-uuid").json(&ship()).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "ORDER_ID_INVALID");
        assert_eq!(store.calls(), 0);
    }

    #[tokio::test]
    async fn test_patch_non_json_body_returns_400() {
        let order = sample_order();
        let server = make_server(seeded_store(&order).await);

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .text("status=Shipped")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PAYLOAD_NOT_JSON");
    }

    #[tokio::test]
    async fn test_patch_invalid_payload_returns_400_and_leaves_order() {
        let order = sample_order();
        let store = seeded_store(&order).await;
        let server = make_server(store.clone());

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .json(&json!({
                "changes": [
                    { "op": "replace", "path": "/status", "value": "Shipped" },
                    { "op": "replace", "path": "/status", "value": "Delivered" }
                ]
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PAYLOAD_INVALID");
        assert_eq!(body["details"]["fields"][0]["field"], "changes[1].path");
        assert_eq!(store.get(&order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn test_patch_empty_changes_returns_400() {
        let order = sample_order();
        let server = make_server(seeded_store(&order).await);

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .json(&json!({ "changes": [] }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["details"]["fields"][0]["field"], "changes");
    }

    #[tokio::test]
    async fn test_patch_publishes_status_change() {
        let order = sample_order();
        let event_bus = EventBus::new(8);
        let mut events = event_bus.subscribe();
        let router = ServerBuilder::new()
            .with_store(seeded_store(&order).await)
            .with_event_bus(event_bus)
            .build()
            .unwrap();
        let server = TestServer::try_new(router).unwrap();

        server
            .patch(&format!("/orders/{}", order.id))
            .json(&ship())
            .await
            .assert_status_ok();

        let envelope = events.recv().await.unwrap();
        assert_eq!(
            envelope.event,
            OrderEvent::StatusSet {
                order_id: order.id,
                status: OrderStatus::Shipped,
            }
        );
    }

    #[tokio::test]
    async fn test_patch_same_status_still_publishes_status_set() {
        let order = sample_order();
        let event_bus = EventBus::new(8);
        let mut events = event_bus.subscribe();
        let router = ServerBuilder::new()
            .with_store(seeded_store(&order).await)
            .with_event_bus(event_bus)
            .build()
            .unwrap();
        let server = TestServer::try_new(router).unwrap();

        for _ in 0..2 {
            server
                .patch(&format!("/orders/{}", order.id))
                .json(&ship())
                .await
                .assert_status_ok();
        }

        for _ in 0..2 {
            let envelope = events.recv().await.unwrap();
            assert_eq!(envelope.event.action(), "status_set");
        }
    }

    #[tokio::test]
    async fn test_patch_unknown_members_return_400() {
        let order = sample_order();
        let store = seeded_store(&order).await;
        let server = make_server(store.clone());

        let response = server
            .patch(&format!("/orders/{}", order.id))
            .json(&json!({
                "changes": [{ "op": "replace", "path": "/status", "value": "Shipped", "from": "/x" }],
                "extra": true
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PAYLOAD_INVALID");
        assert_eq!(body["details"]["fields"][0]["field"], "extra");
        assert_eq!(body["details"]["fields"][1]["field"], "changes[0].from");
        assert_eq!(store.get(&order.id).await.unwrap(), Some(order));
    }

    #[tokio::test]
    async fn test_patch_braced_id_is_accepted() {
        let order = sample_order();
        let server = make_server(seeded_store(&order).await);

        let response = server
            .patch(&format!("/orders/{{{}}}", order.id))
            .json(&ship())
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["id"], order.id.to_string());
    }
}

// =============================================================================
// GET /orders/{id} and POST /orders
// =============================================================================

mod read_create_tests {
    use super::*;

    #[tokio::test]
    async fn test_get_existing_order() {
        let order = sample_order();
        let server = make_server(seeded_store(&order).await);

        let response = server.get(&format!("/orders/{}", order.id)).await;

        response.assert_status_ok();
        let body: Order = response.json();
        assert_eq!(body, order);
    }

    #[tokio::test]
    async fn test_get_unknown_order_returns_404() {
        let server = make_server(InMemoryOrderStore::new());

        let response = server.get(&format!("/orders/{}", sample_order().id)).await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_then_patch_then_get() {
        let server = make_server(InMemoryOrderStore::new());

        let created = server
            .post("/orders")
            .json(&json!({ "items": [{ "sku": "C-3", "qty": 4 }] }))
            .await;
        created.assert_status(StatusCode::CREATED);
        let created: Order = created.json();
        assert_eq!(created.status, OrderStatus::Created);

        server
            .patch(&format!("/orders/{}", created.id))
            .json(&json!({
                "changes": [{ "op": "replace", "path": "/status", "value": "Cancelled" }]
            }))
            .await
            .assert_status_ok();

        let fetched: Order = server.get(&format!("/orders/{}", created.id)).await.json();
        assert_eq!(fetched.status, OrderStatus::Cancelled);
        assert_eq!(fetched.created_when, created.created_when);
        assert_eq!(fetched.items, created.items);
    }

    #[tokio::test]
    async fn test_create_without_items_returns_400() {
        let server = make_server(InMemoryOrderStore::new());

        let response = server.post("/orders").json(&json!({ "items": [] })).await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "PAYLOAD_INVALID");
    }

    #[tokio::test]
    async fn test_health() {
        let server = make_server(InMemoryOrderStore::new());

        let response = server.get("/health").await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "ok");
    }
}
