//! # Stripe.js Card Element
//!
//! `CardTokenizer` and `PaymentConfirmer` on top of a mounted card element.
//! Stripe.js resolves its promises with either the result object or an
//! `error`; rejected promises are transport failures.

use crate::bindings::{new_stripe, JsCardElement, JsStripe};
use async_trait::async_trait;
use js_sys::{Object, Promise, Reflect};
use pay_core::{
    CardToken, CardTokenizer, PaymentConfirmer, PaymentError, PaymentIntent, PaymentResult,
};
use serde::Deserialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

#[derive(Debug, Clone)]
pub struct StripeJs {
    stripe: JsStripe,
    card: JsCardElement,
}

impl StripeJs {
    /// Create a card element and mount it at `selector`
    pub fn mount(publishable_key: &str, selector: &str) -> PaymentResult<Self> {
        let internal = |e: JsValue| PaymentError::Internal(js_message(&e));

        let stripe = new_stripe(publishable_key).map_err(internal)?;
        let elements = stripe.elements().map_err(internal)?;
        let card = elements
            .create_element("card", &JsValue::UNDEFINED)
            .map_err(internal)?;
        card.mount(selector).map_err(internal)?;

        Ok(Self { stripe, card })
    }
}

#[async_trait(?Send)]
impl CardTokenizer for StripeJs {
    async fn tokenize(&self) -> PaymentResult<CardToken> {
        let options = Object::new();
        set(&options, "type", &JsValue::from_str("card"))?;
        set(&options, "card", &self.card)?;

        let promise = self
            .stripe
            .create_payment_method(&options)
            .map_err(|e| PaymentError::Internal(js_message(&e)))?;
        let result = settle(promise).await?;

        get(&get(&result, "paymentMethod")?, "id")?
            .as_string()
            .map(CardToken::new)
            .ok_or_else(|| PaymentError::Internal("Stripe.js returned no payment method".into()))
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for StripeJs {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardToken,
    ) -> PaymentResult<PaymentIntent> {
        let data = Object::new();
        set(&data, "payment_method", &JsValue::from_str(card.as_str()))?;

        let promise = self
            .stripe
            .confirm_card_payment(client_secret, &data)
            .map_err(|e| PaymentError::Internal(js_message(&e)))?;
        let result = settle(promise).await?;

        serde_wasm_bindgen::from_value(get(&result, "paymentIntent")?)
            .map_err(|e| PaymentError::Serialization(e.to_string()))
    }
}

/// `error` member of a Stripe.js result
#[derive(Debug, Deserialize)]
struct StripeJsError {
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "type", default)]
    kind: Option<String>,
}

impl From<StripeJsError> for PaymentError {
    fn from(err: StripeJsError) -> Self {
        let message = err
            .message
            .unwrap_or_else(|| "Card processing failed".to_string());
        match err.kind.as_deref() {
            Some("card_error") | Some("validation_error") => PaymentError::CardError { message },
            _ => PaymentError::provider("stripe", message),
        }
    }
}

async fn settle(promise: Promise) -> PaymentResult<JsValue> {
    let result = JsFuture::from(promise)
        .await
        .map_err(|e| PaymentError::NetworkError(js_message(&e)))?;

    let error = get(&result, "error")?;
    if !error.is_undefined() && !error.is_null() {
        let error: StripeJsError = serde_wasm_bindgen::from_value(error)
            .map_err(|e| PaymentError::Serialization(e.to_string()))?;
        return Err(error.into());
    }

    Ok(result)
}

fn get(target: &JsValue, key: &str) -> PaymentResult<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .map_err(|e| PaymentError::Internal(js_message(&e)))
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> PaymentResult<()> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| PaymentError::Internal(js_message(&e)))
}

pub(crate) fn js_message(value: &JsValue) -> String {
    value
        .dyn_ref::<js_sys::Error>()
        .map(|e| String::from(e.message()))
        .or_else(|| value.as_string())
        .unwrap_or_else(|| "Unknown JavaScript error".to_string())
}
