//! # Billing Provider Trait
//!
//! Server-side seam to the payment provider. The API routes only ever talk
//! to a `BillingProvider`; the Stripe adapter lives in `pay-stripe` and
//! tests substitute in-memory fakes.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   BillingProvider (trait)                   │
//! │  ├── create_product()          ├── create_customer()        │
//! │  ├── create_recurring_price()  ├── delete_customer()        │
//! │  ├── create_payment_intent()   └── create_subscription()    │
//! └─────────────────────────────────────────────────────────────┘
//!                            ▲
//!                    ┌───────┴───────┐
//!                    │ StripeBilling │
//!                    └───────────────┘
//! ```

use crate::error::PaymentResult;
use crate::money::Money;
use crate::plan::PlanDefinition;
use crate::resource::{Customer, PaymentIntent, Price, Product, Subscription};
use async_trait::async_trait;
use std::sync::Arc;

/// Customer to create before subscribing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCustomer {
    pub email: String,
    /// Attached to the customer and set as the default invoice payment method
    pub payment_method_id: String,
}

/// Secret-key operations against the payment provider.
///
/// Every call is a single provider request; nothing is retried and nothing
/// is cached at this layer.
#[async_trait]
pub trait BillingProvider: Send + Sync {
    /// Create a product from the plan's name and description.
    async fn create_product(&self, plan: &PlanDefinition) -> PaymentResult<Product>;

    /// Create a recurring price for `product_id` from the plan's amount and interval.
    async fn create_recurring_price(
        &self,
        product_id: &str,
        plan: &PlanDefinition,
    ) -> PaymentResult<Price>;

    /// Create a one-time payment intent.
    async fn create_payment_intent(&self, amount: Money) -> PaymentResult<PaymentIntent>;

    async fn create_customer(&self, customer: &NewCustomer) -> PaymentResult<Customer>;

    /// Remove a customer. Used to undo a customer whose subscription failed.
    async fn delete_customer(&self, customer_id: &str) -> PaymentResult<()>;

    /// Subscribe `customer_id` to `price_id`, expanding the latest invoice's
    /// payment intent in the returned object.
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> PaymentResult<Subscription>;

    /// Get the provider name (for logging).
    fn provider_name(&self) -> &'static str;
}

/// Type alias for a boxed billing provider (dynamic dispatch)
pub type BoxedBillingProvider = Arc<dyn BillingProvider>;
