//! # pay-stripe
//!
//! Stripe adapter for card-relay.
//!
//! This crate provides both halves of the Stripe integration:
//!
//! 1. **StripeBilling** - secret-key calls, implements `BillingProvider`
//!    - Products and recurring prices
//!    - One-time payment intents
//!    - Customers and subscriptions
//!
//! 2. **StripeElements** - publishable-key calls, the Stripe.js equivalents
//!    - Card tokenization (`CardTokenizer` via `StripeCardField`)
//!    - Payment intent confirmation (`PaymentConfirmer`)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pay_stripe::{StripeBilling, StripeElements, CardSource, StripeConfig};
//! use pay_core::{BillingProvider, CardTokenizer, PaymentConfirmer, Money, Currency};
//!
//! let config = StripeConfig::from_env()?;
//! let billing = StripeBilling::new(config.clone())?;
//! let intent = billing.create_payment_intent(Money::from_minor(1000, Currency::USD)).await?;
//!
//! let elements = StripeElements::new(config)?;
//! let token = elements.card_field(CardSource::Token("tok_visa".into())).tokenize().await?;
//! let secret = intent.client_secret.as_deref().unwrap_or_default();
//! elements.confirm_card_payment(secret, &token).await?;
//! ```

pub mod billing;
pub mod config;
pub mod elements;
pub mod http;

// Re-exports
pub use billing::StripeBilling;
pub use config::{StripeConfig, STRIPE_API_VERSION};
pub use elements::{CardDetails, CardSource, StripeCardField, StripeElements};
pub use http::FormParams;
