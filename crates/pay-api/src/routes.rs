//! # Routes
//!
//! Axum router configuration for the payment API.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - POST /api/create-product - Provision the plan's product and price
/// - POST /api/payment-intent - One-time payment intent
/// - POST /api/monthly-subscription - Customer plus subscription
/// - GET  /api/config - Publishable key for the client
/// - GET  /health - Health check
///
/// Any other method on the three POST routes gets a 405.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        .route(
            "/create-product",
            post(handlers::create_product).fallback(handlers::method_not_allowed),
        )
        .route(
            "/payment-intent",
            post(handlers::payment_intent).fallback(handlers::method_not_allowed),
        )
        .route(
            "/monthly-subscription",
            post(handlers::monthly_subscription).fallback(handlers::method_not_allowed),
        )
        .route("/config", get(handlers::client_config));

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        .nest("/api", api_routes)
        // Middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        // State
        .with_state(state)
}
