//! # pay-forms
//!
//! Client-side flows for card-relay, independent of how the card element
//! is rendered.
//!
//! - `PaymentForm` - tokenize, create a payment intent, confirm it
//! - `SubscriptionForm` - provision a price on load, then tokenize and subscribe
//! - `LocalApi` - `PaymentBackend` over the card-relay HTTP routes
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_forms::{LocalApi, PaymentForm};
//!
//! let form = PaymentForm::new(LocalApi::new("http://127.0.0.1:8080"), card, confirmer);
//! let intent = form.submit().await?;
//! ```

pub mod backend;
pub mod error;
pub mod payment;
pub mod submit;
pub mod subscription;

#[cfg(test)]
mod testing;

pub use backend::{LocalApi, PaymentBackend};
pub use error::{FormError, FormResult};
pub use payment::{PaymentForm, DEFAULT_AMOUNT};
pub use submit::{SubmitControl, SubmitGuard, SubmitState};
pub use subscription::{LoadState, SubscriptionForm};
