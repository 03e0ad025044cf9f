//! End-to-end order flow over the HTTP API
//!
//! Drives the full router against a temporary data directory: stock up,
//! publish a menu item, create/reject/delete/close orders and watch the
//! inventory file stay consistent throughout.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use brew_server::{Config, ServerState, api};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn test_app(dir: &tempfile::TempDir) -> Router {
    let config = Config::with_overrides(dir.path().to_str().unwrap(), 0);
    let state = ServerState::initialize(&config).unwrap();
    api::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn seed(app: &Router) {
    let (status, _) = send(
        app,
        "POST",
        "/inventory",
        Some(json!({
            "ingredient_id": "flour",
            "name": "Flour",
            "quantity": 100.0,
            "unit": "g"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        app,
        "POST",
        "/menu",
        Some(json!({
            "product_id": "latte",
            "name": "Latte",
            "description": "Flour latte, house specialty",
            "price": 4.5,
            "ingredients": [{ "ingredient_id": "flour", "quantity": 10.0 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn flour_level(app: &Router) -> f64 {
    let (status, body) = send(app, "GET", "/inventory/flour", None).await;
    assert_eq!(status, StatusCode::OK);
    body["quantity"].as_f64().unwrap()
}

async fn create_order(app: &Router, quantity: u32) -> (StatusCode, Value) {
    send(
        app,
        "POST",
        "/orders",
        Some(json!({
            "customer_name": "Alice",
            "items": [{ "product_id": "latte", "quantity": quantity }]
        })),
    )
    .await
}

#[tokio::test]
async fn test_order_inventory_consistency_flow() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    seed(&app).await;

    // 2 lattes: 100 - 20 = 80
    let (status, order) = create_order(&app, 2).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "open");
    let first_id = order["order_id"].as_str().unwrap().to_string();
    assert_eq!(flour_level(&app).await, 80.0);

    // 9 lattes need 90 g, only 80 left: rejected, inventory unchanged
    let (status, body) = create_order(&app, 9).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"], "insufficient_stock");
    assert_eq!(flour_level(&app).await, 80.0);

    // Deleting the open order restores the full 100 g
    let (status, _) = send(&app, "DELETE", &format!("/orders/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(flour_level(&app).await, 100.0);

    // Close a different order, then delete it: no inventory effect
    let (_, order) = create_order(&app, 3).await;
    let second_id = order["order_id"].as_str().unwrap().to_string();
    assert_eq!(flour_level(&app).await, 70.0);

    let (status, closed) = send(&app, "POST", &format!("/orders/{second_id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "closed");

    let (status, _) = send(&app, "DELETE", &format!("/orders/{second_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(flour_level(&app).await, 70.0);
}

#[tokio::test]
async fn test_close_is_idempotent_boundary() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    seed(&app).await;

    let (_, order) = create_order(&app, 1).await;
    let id = order["order_id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "POST", &format!("/orders/{id}/close"), None).await;
    assert_eq!(status, StatusCode::OK);

    // Second close is rejected with a conflict
    let (status, body) = send(&app, "POST", &format!("/orders/{id}/close"), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "conflict");

    // Closed orders cannot be updated
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/orders/{id}"),
        Some(json!({ "customer_name": "Mallory" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_validation_and_not_found_responses() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    seed(&app).await;

    // Blank customer name
    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_name": "",
            "items": [{ "product_id": "latte", "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");

    // Unknown product
    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(json!({
            "customer_name": "Bob",
            "items": [{ "product_id": "unicorn", "quantity": 1 }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
    assert_eq!(flour_level(&app).await, 100.0);

    // Unknown order id
    let (status, _) = send(&app, "GET", "/orders/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/orders/missing", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_reports_reflect_closed_orders_only() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);
    seed(&app).await;

    let (_, open_order) = create_order(&app, 1).await;
    let _keep_open = open_order["order_id"].as_str().unwrap();

    let (_, closing) = create_order(&app, 4).await;
    let id = closing["order_id"].as_str().unwrap().to_string();
    send(&app, "POST", &format!("/orders/{id}/close"), None).await;

    let (status, body) = send(&app, "GET", "/reports/total-sales", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_sales"].as_f64().unwrap(), 18.0); // 4 * 4.5

    let (status, body) = send(&app, "GET", "/reports/popular-items", None).await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product_id"], "latte");
    assert_eq!(items[0]["total_orders"], 4);
}

#[tokio::test]
async fn test_ping() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(&dir);

    let request = Request::builder()
        .method("GET")
        .uri("/ping")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"pong");
}
