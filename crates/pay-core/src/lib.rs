//! # pay-core
//!
//! Core types and traits for card-relay.
//!
//! This crate provides:
//! - `BillingProvider` trait for the server-side provider calls
//! - `CardTokenizer` / `PaymentConfirmer` traits for the client-side flow
//! - Provider resources (`PaymentIntent`, `Subscription`, ...) that relay verbatim
//! - `PlanDefinition` for the provisioned product and recurring price
//! - Request bodies, `AmountPolicy`, and `PaymentError`
//!
//! ## Example
//!
//! ```rust,ignore
//! use pay_core::{BillingProvider, Currency, Money, PlanDefinition};
//!
//! let plan = PlanDefinition::default();
//! let product = provider.create_product(&plan).await?;
//! let price = provider.create_recurring_price(&product.id, &plan).await?;
//!
//! let intent = provider
//!     .create_payment_intent(Money::from_minor(1000, Currency::USD))
//!     .await?;
//! // hand intent.client_secret to the browser
//! ```

pub mod card;
pub mod error;
pub mod money;
pub mod plan;
pub mod policy;
pub mod provider;
pub mod request;
pub mod resource;

// Re-exports for convenience
pub use card::{CardToken, CardTokenizer, PaymentConfirmer, PriceReference};
pub use error::{PaymentError, PaymentResult};
pub use money::{BillingInterval, Currency, Money};
pub use plan::{PlanDefinition, ProvisionedPlan};
pub use policy::AmountPolicy;
pub use provider::{BillingProvider, BoxedBillingProvider, NewCustomer};
pub use request::{validate_email, ErrorBody, PaymentRequest, SubscriptionRequest};
pub use resource::{
    Customer, List, PaymentIntent, PaymentMethod, Price, Product, Subscription, SubscriptionItem,
};
