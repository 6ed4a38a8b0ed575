//! # pay-wasm
//!
//! Browser bindings for card-relay's two forms, using Stripe.js for the
//! card element.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { PaymentPage, SubscriptionPage, publishableKey } from 'card-relay-wasm';
//!
//! await init();
//! const key = await publishableKey(window.location.origin);
//!
//! const payment = new PaymentPage(key, '#card-element', window.location.origin, 1000);
//! await payment.submit();
//!
//! const subscription = new SubscriptionPage(key, '#card-element', window.location.origin);
//! await subscription.load();
//! await subscription.submit('customer@example.com');
//! ```
//!
//! ## Building
//!
//! ```bash
//! wasm-pack build --target web
//! ```

pub mod bindings;
pub mod labels;
pub mod stripe_js;

use js_sys::Promise;
use pay_core::Currency;
use pay_forms::{LocalApi, PaymentForm, SubmitState, SubscriptionForm};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::console;

pub use stripe_js::StripeJs;

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Fetch the publishable key from `GET /api/config`
#[wasm_bindgen(js_name = publishableKey)]
pub fn publishable_key(api_base: String) -> Promise {
    future_to_promise(async move {
        let key = LocalApi::new(api_base)
            .publishable_key()
            .await
            .map_err(to_js_error)?;
        Ok(JsValue::from_str(&key))
    })
}

/// Format the subscription heading, e.g. `Subscribe Now - Price: $20.00`
#[wasm_bindgen(js_name = priceLabel)]
pub fn price_label(amount: u32, currency: &str) -> Result<String, JsValue> {
    let currency: Currency = currency.parse().map_err(|e: String| JsValue::from_str(&e))?;
    Ok(labels::price_label(i64::from(amount), currency))
}

// =============================================================================
// One-time payment
// =============================================================================

#[wasm_bindgen]
pub struct PaymentPage {
    form: Rc<PaymentForm<LocalApi, StripeJs, StripeJs>>,
}

#[wasm_bindgen]
impl PaymentPage {
    /// Mount the card element; `amount` defaults to 1000
    #[wasm_bindgen(constructor)]
    pub fn new(
        publishable_key: &str,
        card_selector: &str,
        api_base: &str,
        amount: Option<u32>,
    ) -> Result<PaymentPage, JsValue> {
        let stripe = StripeJs::mount(publishable_key, card_selector).map_err(to_js_error)?;

        let mut form = PaymentForm::new(LocalApi::new(api_base), stripe.clone(), stripe);
        if let Some(amount) = amount {
            form = form.with_amount(i64::from(amount));
        }

        Ok(Self {
            form: Rc::new(form),
        })
    }

    /// Resolves with the confirmed payment intent, rejects with the error shown
    pub fn submit(&self) -> Promise {
        let form = Rc::clone(&self.form);
        future_to_promise(async move {
            let intent = form.submit().await.map_err(to_js_error)?;
            console::log_1(&JsValue::from_str("Payment successful"));
            to_js(&intent)
        })
    }

    #[wasm_bindgen(getter)]
    pub fn disabled(&self) -> bool {
        self.form.is_disabled()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        labels::status_name(&self.form.state()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.form.state().error_message().map(String::from)
    }

    #[wasm_bindgen(getter, js_name = buttonLabel)]
    pub fn button_label(&self) -> String {
        labels::button_label(self.form.state() == SubmitState::Processing, labels::PAY_LABEL)
    }
}

// =============================================================================
// Monthly subscription
// =============================================================================

#[wasm_bindgen]
pub struct SubscriptionPage {
    form: Rc<SubscriptionForm<LocalApi, StripeJs>>,
}

#[wasm_bindgen]
impl SubscriptionPage {
    #[wasm_bindgen(constructor)]
    pub fn new(
        publishable_key: &str,
        card_selector: &str,
        api_base: &str,
    ) -> Result<SubscriptionPage, JsValue> {
        let stripe = StripeJs::mount(publishable_key, card_selector).map_err(to_js_error)?;

        Ok(Self {
            form: Rc::new(SubscriptionForm::new(LocalApi::new(api_base), stripe)),
        })
    }

    /// Provision the plan; resolves with the price id
    pub fn load(&self) -> Promise {
        let form = Rc::clone(&self.form);
        future_to_promise(async move {
            let price = form.load().await.map_err(to_js_error)?;
            Ok(JsValue::from_str(price.as_str()))
        })
    }

    /// Resolves with the subscription, rejects with the error shown
    pub fn submit(&self, email: String) -> Promise {
        let form = Rc::clone(&self.form);
        future_to_promise(async move {
            let subscription = form.submit(&email).await.map_err(to_js_error)?;
            console::log_1(&JsValue::from_str("Subscription successful"));
            to_js(&subscription)
        })
    }

    #[wasm_bindgen(getter, js_name = priceId)]
    pub fn price_id(&self) -> Option<String> {
        self.form.price().map(|p| p.as_str().to_string())
    }

    #[wasm_bindgen(getter)]
    pub fn disabled(&self) -> bool {
        self.form.is_disabled()
    }

    #[wasm_bindgen(getter)]
    pub fn status(&self) -> String {
        labels::status_name(&self.form.state()).to_string()
    }

    #[wasm_bindgen(getter)]
    pub fn error(&self) -> Option<String> {
        self.form.state().error_message().map(String::from)
    }

    #[wasm_bindgen(getter, js_name = buttonLabel)]
    pub fn button_label(&self) -> String {
        labels::button_label(
            self.form.state() == SubmitState::Processing,
            labels::SUBSCRIBE_LABEL,
        )
    }
}
