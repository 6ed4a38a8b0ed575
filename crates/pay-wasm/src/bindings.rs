//! Raw wasm-bindgen bindings to the parts of Stripe.js v3 the forms use.
//!
//! Stripe.js must already be loaded on the page (`https://js.stripe.com/v3/`).

use js_sys::Promise;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    /// `Stripe(publishableKey)` instance
    #[wasm_bindgen(js_name = Stripe)]
    #[derive(Debug, Clone)]
    pub type JsStripe;

    #[derive(Debug, Clone)]
    pub type JsElements;

    /// The single-line `card` element
    #[derive(Debug, Clone)]
    pub type JsCardElement;

    #[wasm_bindgen(js_name = Stripe, js_namespace = window, catch)]
    pub fn new_stripe(publishable_key: &str) -> Result<JsStripe, JsValue>;

    /// `stripe.elements()`
    #[wasm_bindgen(method, catch, js_name = elements)]
    pub fn elements(this: &JsStripe) -> Result<JsElements, JsValue>;

    /// `elements.create(type, options)`
    #[wasm_bindgen(method, catch, js_name = create)]
    pub fn create_element(
        this: &JsElements,
        element_type: &str,
        options: &JsValue,
    ) -> Result<JsCardElement, JsValue>;

    #[wasm_bindgen(method, catch, js_name = mount)]
    pub fn mount(this: &JsCardElement, selector: &str) -> Result<(), JsValue>;

    /// `stripe.createPaymentMethod({ type: "card", card })` → `{ paymentMethod } | { error }`
    #[wasm_bindgen(method, catch, js_name = createPaymentMethod)]
    pub fn create_payment_method(this: &JsStripe, options: &JsValue) -> Result<Promise, JsValue>;

    /// `stripe.confirmCardPayment(clientSecret, data)` → `{ paymentIntent } | { error }`
    #[wasm_bindgen(method, catch, js_name = confirmCardPayment)]
    pub fn confirm_card_payment(
        this: &JsStripe,
        client_secret: &str,
        data: &JsValue,
    ) -> Result<Promise, JsValue>;
}
