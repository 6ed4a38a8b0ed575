//! # Client-side Card Traits
//!
//! What a form needs from the provider's client library: turn the card the
//! user entered into a single-use token, and confirm a payment intent with
//! that token. In the browser these are Stripe.js calls (`pay-wasm`);
//! natively they are publishable-key REST calls (`pay-stripe`).
//!
//! The futures are not required to be `Send` because browser
//! implementations hold JS handles.

use crate::error::PaymentResult;
use crate::resource::PaymentIntent;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Opaque handle for a tokenized card (a provider payment-method id)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardToken(String);

impl CardToken {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CardToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Provider price id held by the subscription form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceReference(String);

impl PriceReference {
    /// `None` for an empty id: a price reference is only usable once non-empty
    pub fn new(id: impl Into<String>) -> Option<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(id))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Exchanges the card currently entered in the form for a token.
#[async_trait(?Send)]
pub trait CardTokenizer {
    /// A rejected card comes back as `PaymentError::CardError` carrying the
    /// provider's message.
    async fn tokenize(&self) -> PaymentResult<CardToken>;
}

/// Completes a payment intent from the client side.
#[async_trait(?Send)]
pub trait PaymentConfirmer {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardToken,
    ) -> PaymentResult<PaymentIntent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_reference_rejects_empty() {
        assert!(PriceReference::new("").is_none());
        assert!(PriceReference::new("   ").is_none());
        assert_eq!(PriceReference::new("price_1").unwrap().as_str(), "price_1");
    }

    #[test]
    fn test_card_token_is_transparent() {
        let token = CardToken::new("pm_123");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"pm_123\"");
        assert_eq!(token.to_string(), "pm_123");
    }
}
