//! # Request Bodies
//!
//! JSON bodies exchanged between the form clients and the API routes.

use crate::error::{PaymentError, PaymentResult};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/payment-intent`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRequest {
    /// Amount in smallest currency unit
    pub amount: i64,
}

/// Body of `POST /api/monthly-subscription`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionRequest {
    pub email: String,
    pub payment_method_id: String,
    pub price_id: String,
}

impl SubscriptionRequest {
    /// Reject requests the provider would fail on anyway, before any
    /// provider-side resource is created.
    pub fn validate(&self) -> PaymentResult<()> {
        validate_email(&self.email)?;

        if !self.payment_method_id.starts_with("pm_") {
            return Err(PaymentError::InvalidRequest(
                "paymentMethodId must be a tokenized card (pm_...)".to_string(),
            ));
        }

        if !self.price_id.starts_with("price_") {
            return Err(PaymentError::InvalidRequest(
                "priceId must be a provider price id (price_...)".to_string(),
            ));
        }

        Ok(())
    }
}

/// Failure envelope returned by every route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Minimal shape check for a customer email: one `@`, a non-empty local
/// part, and a dotted domain without whitespace.
pub fn validate_email(email: &str) -> PaymentResult<()> {
    let invalid = || PaymentError::InvalidRequest(format!("Invalid email address: {:?}", email));

    let email = email.trim();
    if email.is_empty() || email.len() > 254 || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }

    Ok(())
}
