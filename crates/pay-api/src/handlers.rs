//! # Request Handlers
//!
//! Axum request handlers for the payment API. Each payment route makes
//! its provider calls and relays the provider's object back unchanged.

use crate::error::ApiError;
use crate::registry;
use crate::state::{AppState, ProvisioningMode};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use pay_core::{
    Money, NewCustomer, PaymentError, PaymentIntent, PaymentRequest, ProvisionedPlan,
    Subscription, SubscriptionRequest,
};
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "card-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Publishable key for the browser's card element
pub async fn client_config(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let key = state.publishable_key.as_deref().ok_or_else(|| {
        PaymentError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
    })?;

    Ok(Json(serde_json::json!({ "publishableKey": key })))
}

/// Answer for every non-POST method on the payment routes
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        [(header::ALLOW, "POST")],
        "Method Not Allowed",
    )
}

/// `POST /api/create-product`
///
/// The request body is ignored.
#[instrument(skip(state), fields(request_id = %Uuid::new_v4()))]
pub async fn create_product(
    State(state): State<AppState>,
) -> Result<Json<ProvisionedPlan>, ApiError> {
    let provider = state.provider.as_ref();

    let provisioned = match state.config.provisioning_mode {
        ProvisioningMode::Reuse => state.prices.get_or_provision(provider, &state.plan).await?,
        ProvisioningMode::AlwaysCreate => registry::provision(provider, &state.plan).await?,
    };

    Ok(Json(provisioned))
}

/// `POST /api/payment-intent`
#[instrument(skip(state, payload), fields(request_id = %Uuid::new_v4()))]
pub async fn payment_intent(
    State(state): State<AppState>,
    payload: Result<Json<PaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentIntent>, ApiError> {
    let Json(request) = payload?;

    let policy = &state.config.amount_policy;
    policy.check(request.amount)?;

    let intent = state
        .provider
        .create_payment_intent(Money::from_minor(request.amount, policy.currency))
        .await?;

    info!(
        "Created payment intent: id={}, amount={}",
        intent.id,
        Money::from_minor(request.amount, policy.currency).display()
    );

    Ok(Json(intent))
}

/// `POST /api/monthly-subscription`
///
/// Creates a customer owning the payment method, then subscribes it to the
/// price. A customer left behind by a failed subscription is deleted again.
#[instrument(skip(state, payload), fields(request_id = %Uuid::new_v4()))]
pub async fn monthly_subscription(
    State(state): State<AppState>,
    payload: Result<Json<SubscriptionRequest>, JsonRejection>,
) -> Result<Json<Subscription>, ApiError> {
    let Json(request) = payload?;
    request.validate()?;

    let customer = state
        .provider
        .create_customer(&NewCustomer {
            email: request.email.trim().to_string(),
            payment_method_id: request.payment_method_id.clone(),
        })
        .await?;

    match state
        .provider
        .create_subscription(&customer.id, &request.price_id)
        .await
    {
        Ok(subscription) => {
            info!(
                "Created subscription: id={}, customer={}, status={}",
                subscription.id, customer.id, subscription.status
            );
            Ok(Json(subscription))
        }
        Err(err) => {
            warn!(
                "Subscription failed for customer {}, removing it: {}",
                customer.id, err
            );
            if let Err(cleanup) = state.provider.delete_customer(&customer.id).await {
                error!("Failed to delete customer {}: {}", customer.id, cleanup);
            }
            Err(err.into())
        }
    }
}
