mod common;

use common::{jwt, signed_in_store, storefront_for};
use serde_json::json;
use storefront_core::ClientError;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cart_body(quantity: u32) -> serde_json::Value {
    json!({
        "items": [
            { "productId": "p1", "unitPrice": 250000, "quantity": quantity }
        ]
    })
}

#[tokio::test]
async fn test_add_item() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cart/items"))
        .and(body_json(json!({ "product_id": "p1", "quantity": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body(2)))
        .expect(1)
        .mount(&server)
        .await;

    let storefront = storefront_for(&server, signed_in_store(&jwt("user-1", "USER")));
    let cart = storefront.cart.add_item("p1", 2).await.unwrap();

    assert_eq!(cart.item_count(), 2);
}

#[tokio::test]
async fn test_update_quantity() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cart/items/p1"))
        .and(body_json(json!({ "quantity": 3 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body(3)))
        .expect(1)
        .mount(&server)
        .await;

    let storefront = storefront_for(&server, signed_in_store(&jwt("user-1", "USER")));
    let cart = storefront.cart.update_quantity("p1", 3).await.unwrap();

    assert_eq!(cart.lines[0].quantity, 3);
}

#[tokio::test]
async fn test_remove_item() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cart/items/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let storefront = storefront_for(&server, signed_in_store(&jwt("user-1", "USER")));
    let cart = storefront.cart.remove_item("p1").await.unwrap();

    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_mutation_returning_zero_quantity_line_is_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/cart/items/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(cart_body(0)))
        .mount(&server)
        .await;

    let storefront = storefront_for(&server, signed_in_store(&jwt("user-1", "USER")));
    let err = storefront.cart.update_quantity("p1", 1).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(ref msg) if msg.contains("p1")));
}

#[tokio::test]
async fn test_cart_rejects_zero_quantity_locally() {
    let server = MockServer::start().await;
    let storefront = storefront_for(&server, signed_in_store(&jwt("user-1", "USER")));

    let err = storefront.cart.update_quantity("p1", 0).await.unwrap_err();

    assert!(matches!(err, ClientError::InvalidRequest(_)));
    assert!(server.received_requests().await.unwrap().is_empty());
}
