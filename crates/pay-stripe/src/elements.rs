//! # Stripe Elements (publishable key)
//!
//! The client half of the integration, speaking the same publishable-key
//! endpoints Stripe.js uses from the browser: tokenizing a card into a
//! payment method and confirming a payment intent by its client secret.
//! Raw card details go straight to Stripe and never reach the local API.

use crate::config::StripeConfig;
use crate::http::{FormParams, StripeHttp};
use async_trait::async_trait;
use pay_core::{
    CardToken, CardTokenizer, PaymentConfirmer, PaymentError, PaymentIntent, PaymentMethod,
    PaymentResult,
};
use tracing::{debug, info, instrument, warn};

/// Raw card fields as typed into a card form
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub number: String,
    pub exp_month: u8,
    pub exp_year: u16,
    pub cvc: String,
}

impl CardDetails {
    pub fn last4(&self) -> &str {
        let digits = self.number.trim();
        &digits[digits.len().saturating_sub(4)..]
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("last4", &self.last4())
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .finish_non_exhaustive()
    }
}

/// What the card field currently holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardSource {
    /// A card token such as Stripe's `tok_visa` test token
    Token(String),
    /// Raw card details
    Card(CardDetails),
}

impl CardSource {
    fn params(&self) -> FormParams {
        let params = FormParams::new().push("type", "card");
        match self {
            CardSource::Token(token) => params.push("card[token]", token),
            CardSource::Card(card) => params
                .push("card[number]", card.number.trim())
                .push("card[exp_month]", card.exp_month)
                .push("card[exp_year]", card.exp_year)
                .push("card[cvc]", &card.cvc),
        }
    }
}

/// Publishable-key Stripe client
#[derive(Debug, Clone)]
pub struct StripeElements {
    config: StripeConfig,
    http: StripeHttp,
}

impl StripeElements {
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let http = StripeHttp::new(&config)?;
        Ok(Self { config, http })
    }

    /// A card field bound to this client, ready to tokenize `source`
    pub fn card_field(&self, source: CardSource) -> StripeCardField {
        StripeCardField {
            elements: self.clone(),
            source,
        }
    }

    /// `POST /v1/payment_methods`
    #[instrument(skip(self, source))]
    pub async fn create_payment_method(&self, source: &CardSource) -> PaymentResult<PaymentMethod> {
        let auth = self.config.publishable_auth_header()?;
        let method: PaymentMethod = self
            .http
            .post(&auth, "/v1/payment_methods", &source.params())
            .await?;
        debug!("Tokenized card: payment_method={}", method.id);
        Ok(method)
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for StripeElements {
    /// `POST /v1/payment_intents/{id}/confirm`.
    ///
    /// Intents that come back needing customer action (3-D Secure) are
    /// reported as card errors: completing them requires the browser.
    #[instrument(skip(self, client_secret), fields(payment_method = %card))]
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardToken,
    ) -> PaymentResult<PaymentIntent> {
        let auth = self.config.publishable_auth_header()?;
        let intent_id = PaymentIntent::id_from_client_secret(client_secret).ok_or_else(|| {
            PaymentError::InvalidRequest("Malformed payment intent client secret".to_string())
        })?;

        let params = FormParams::new()
            .push("client_secret", client_secret)
            .push("payment_method", card.as_str());
        let path = format!("/v1/payment_intents/{}/confirm", intent_id);

        let intent: PaymentIntent = self.http.post(&auth, &path, &params).await?;

        match intent.status.as_str() {
            "requires_action" => {
                warn!("Payment intent {} requires customer action", intent.id);
                Err(PaymentError::CardError {
                    message: "This payment requires additional authentication.".to_string(),
                })
            }
            "requires_payment_method" => Err(PaymentError::CardError {
                message: last_payment_error(&intent)
                    .unwrap_or_else(|| "Your card was declined.".to_string()),
            }),
            status => {
                info!("Confirmed payment intent: id={}, status={}", intent.id, status);
                Ok(intent)
            }
        }
    }
}

fn last_payment_error(intent: &PaymentIntent) -> Option<String> {
    intent
        .extra
        .get("last_payment_error")
        .and_then(|e| e.get("message"))
        .and_then(|m| m.as_str())
        .map(String::from)
}

/// A card entry bound to a `StripeElements` client
#[derive(Debug, Clone)]
pub struct StripeCardField {
    elements: StripeElements,
    source: CardSource,
}

impl StripeCardField {
    pub fn source(&self) -> &CardSource {
        &self.source
    }
}

#[async_trait(?Send)]
impl CardTokenizer for StripeCardField {
    async fn tokenize(&self) -> PaymentResult<CardToken> {
        let method = self.elements.create_payment_method(&self.source).await?;
        Ok(CardToken::new(method.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visa() -> CardDetails {
        CardDetails {
            number: "4242424242424242".into(),
            exp_month: 12,
            exp_year: 2034,
            cvc: "123".into(),
        }
    }

    #[test]
    fn test_debug_hides_card_number() {
        let debug = format!("{:?}", visa());
        assert!(debug.contains("4242"));
        assert!(!debug.contains("4242424242424242"));
        assert!(!debug.contains("123\""));
    }

    #[test]
    fn test_card_source_params() {
        let params = CardSource::Token("tok_visa".into()).params();
        assert_eq!(params.get("type"), Some("card"));
        assert_eq!(params.get("card[token]"), Some("tok_visa"));

        let params = CardSource::Card(visa()).params();
        assert_eq!(params.get("card[number]"), Some("4242424242424242"));
        assert_eq!(params.get("card[exp_month]"), Some("12"));
        assert_eq!(params.get("card[exp_year]"), Some("2034"));
    }
}
