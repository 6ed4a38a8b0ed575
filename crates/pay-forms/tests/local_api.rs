//! `LocalApi` against a mocked card-relay server.

use pay_core::{PaymentError, SubscriptionRequest};
use pay_forms::{LocalApi, PaymentBackend};
use serde_json::json;
use wiremock::{
    matchers::{body_json, header, method, path},
    Mock, MockServer, ResponseTemplate,
};

#[tokio::test]
async fn create_product_reads_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "productId": "prod_1",
            "priceId": "price_1"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let plan = LocalApi::new(server.uri()).create_product().await.unwrap();

    assert_eq!(plan.product_id, "prod_1");
    assert_eq!(plan.price_id, "price_1");
}

#[tokio::test]
async fn payment_intent_posts_amount_as_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment-intent"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "amount": 1000 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "pi_1",
            "amount": 1000,
            "currency": "usd",
            "status": "requires_payment_method",
            "client_secret": "pi_1_secret_x"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let intent = LocalApi::new(format!("{}/", server.uri()))
        .create_payment_intent(1000)
        .await
        .unwrap();

    assert_eq!(intent.client_secret.as_deref(), Some("pi_1_secret_x"));
}

#[tokio::test]
async fn subscription_body_is_camel_case() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/monthly-subscription"))
        .and(body_json(json!({
            "email": "customer@example.com",
            "paymentMethodId": "pm_1",
            "priceId": "price_1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "sub_1",
            "customer": "cus_1",
            "status": "active",
            "items": { "data": [{ "id": "si_1", "price": { "id": "price_1" } }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let subscription = LocalApi::new(server.uri())
        .create_subscription(&SubscriptionRequest {
            email: "customer@example.com".into(),
            payment_method_id: "pm_1".into(),
            price_id: "price_1".into(),
        })
        .await
        .unwrap();

    assert!(subscription.includes_price("price_1"));
}

#[tokio::test]
async fn error_body_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment-intent"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "No such customer" })),
        )
        .mount(&server)
        .await;

    let err = LocalApi::new(server.uri())
        .create_payment_intent(1000)
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::Api { status: 500, .. }));
    assert_eq!(err.to_string(), "No such customer");
}

#[tokio::test]
async fn method_not_allowed_text_is_kept() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/create-product"))
        .respond_with(ResponseTemplate::new(405).set_body_string("Method Not Allowed"))
        .mount(&server)
        .await;

    let err = LocalApi::new(server.uri()).create_product().await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 405: Method Not Allowed");
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let err = LocalApi::new("http://127.0.0.1:1")
        .create_product()
        .await
        .unwrap_err();

    assert!(matches!(err, PaymentError::NetworkError(_)));
}

#[tokio::test]
async fn publishable_key_comes_from_config_route() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/config"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "publishableKey": "pk_test_456" })),
        )
        .mount(&server)
        .await;

    let key = LocalApi::new(server.uri()).publishable_key().await.unwrap();
    assert_eq!(key, "pk_test_456");
}
