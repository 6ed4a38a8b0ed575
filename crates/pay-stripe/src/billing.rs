//! # Stripe Billing
//!
//! Secret-key calls backing the three API routes: products, recurring
//! prices, payment intents, customers and subscriptions.

use crate::config::StripeConfig;
use crate::http::{FormParams, StripeHttp, PROVIDER};
use async_trait::async_trait;
use pay_core::{
    BillingProvider, Customer, Money, NewCustomer, PaymentIntent, PaymentResult, PlanDefinition,
    Price, Product, Subscription,
};
use serde::Deserialize;
use tracing::{info, instrument};

/// Stripe implementation of `BillingProvider`
#[derive(Debug, Clone)]
pub struct StripeBilling {
    config: StripeConfig,
    http: StripeHttp,
}

impl StripeBilling {
    /// Create a new Stripe billing client
    pub fn new(config: StripeConfig) -> PaymentResult<Self> {
        let http = StripeHttp::new(&config)?;
        Ok(Self { config, http })
    }

    /// Create from environment variables
    pub fn from_env() -> PaymentResult<Self> {
        Self::new(StripeConfig::from_env()?)
    }

    pub fn config(&self) -> &StripeConfig {
        &self.config
    }

    fn price_params(product_id: &str, plan: &PlanDefinition) -> FormParams {
        FormParams::new()
            .push("unit_amount", plan.unit_amount)
            .push("currency", plan.currency.as_str())
            .push("recurring[interval]", plan.interval.as_str())
            .push("recurring[interval_count]", plan.interval_count)
            .push("product", product_id)
    }

    fn customer_params(customer: &NewCustomer) -> FormParams {
        FormParams::new()
            .push("email", &customer.email)
            .push("payment_method", &customer.payment_method_id)
            .push(
                "invoice_settings[default_payment_method]",
                &customer.payment_method_id,
            )
    }

    fn subscription_params(customer_id: &str, price_id: &str) -> FormParams {
        FormParams::new()
            .push("customer", customer_id)
            .push("items[0][price]", price_id)
            .push("expand[]", "latest_invoice.payment_intent")
    }
}

#[async_trait]
impl BillingProvider for StripeBilling {
    #[instrument(skip(self, plan), fields(name = %plan.name))]
    async fn create_product(&self, plan: &PlanDefinition) -> PaymentResult<Product> {
        let auth = self.config.secret_auth_header()?;
        let params = FormParams::new()
            .push("name", &plan.name)
            .push_opt(
                "description",
                Some(&plan.description).filter(|d| !d.is_empty()),
            );

        let product: Product = self.http.post(&auth, "/v1/products", &params).await?;
        info!("Created Stripe product: id={}", product.id);
        Ok(product)
    }

    #[instrument(skip(self, plan), fields(amount = plan.unit_amount, interval = plan.interval.as_str()))]
    async fn create_recurring_price(
        &self,
        product_id: &str,
        plan: &PlanDefinition,
    ) -> PaymentResult<Price> {
        let auth = self.config.secret_auth_header()?;
        let params = Self::price_params(product_id, plan);

        let price: Price = self.http.post(&auth, "/v1/prices", &params).await?;
        info!("Created Stripe price: id={}", price.id);
        Ok(price)
    }

    #[instrument(skip(self, amount), fields(amount = amount.amount, currency = amount.currency.as_str()))]
    async fn create_payment_intent(&self, amount: Money) -> PaymentResult<PaymentIntent> {
        let auth = self.config.secret_auth_header()?;
        let params = FormParams::new()
            .push("amount", amount.amount)
            .push("currency", amount.currency.as_str());

        let intent: PaymentIntent = self.http.post(&auth, "/v1/payment_intents", &params).await?;
        info!("Created Stripe payment intent: id={}", intent.id);
        Ok(intent)
    }

    #[instrument(skip(self, customer))]
    async fn create_customer(&self, customer: &NewCustomer) -> PaymentResult<Customer> {
        let auth = self.config.secret_auth_header()?;
        let params = Self::customer_params(customer);

        let created: Customer = self.http.post(&auth, "/v1/customers", &params).await?;
        info!("Created Stripe customer: id={}", created.id);
        Ok(created)
    }

    #[instrument(skip(self))]
    async fn delete_customer(&self, customer_id: &str) -> PaymentResult<()> {
        let auth = self.config.secret_auth_header()?;
        let path = format!("/v1/customers/{}", customer_id);

        let deleted: DeletedObject = self.http.delete(&auth, &path).await?;
        info!(
            "Deleted Stripe customer: id={}, deleted={}",
            deleted.id, deleted.deleted
        );
        Ok(())
    }

    #[instrument(skip(self))]
    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> PaymentResult<Subscription> {
        let auth = self.config.secret_auth_header()?;
        let params = Self::subscription_params(customer_id, price_id);

        let subscription: Subscription =
            self.http.post(&auth, "/v1/subscriptions", &params).await?;
        info!(
            "Created Stripe subscription: id={}, status={}",
            subscription.id, subscription.status
        );
        Ok(subscription)
    }

    fn provider_name(&self) -> &'static str {
        PROVIDER
    }
}

#[derive(Debug, Deserialize)]
struct DeletedObject {
    id: String,
    #[serde(default)]
    deleted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::BillingInterval;

    #[test]
    fn test_price_params() {
        let plan = PlanDefinition {
            interval: BillingInterval::Year,
            ..Default::default()
        };
        let params = StripeBilling::price_params("prod_1", &plan);

        assert_eq!(params.get("unit_amount"), Some("2000"));
        assert_eq!(params.get("currency"), Some("usd"));
        assert_eq!(params.get("recurring[interval]"), Some("year"));
        assert_eq!(params.get("recurring[interval_count]"), Some("1"));
        assert_eq!(params.get("product"), Some("prod_1"));
    }

    #[test]
    fn test_customer_params_set_default_payment_method() {
        let params = StripeBilling::customer_params(&NewCustomer {
            email: "customer@example.com".into(),
            payment_method_id: "pm_1".into(),
        });

        assert_eq!(params.get("payment_method"), Some("pm_1"));
        assert_eq!(
            params.get("invoice_settings[default_payment_method]"),
            Some("pm_1")
        );
    }

    #[test]
    fn test_subscription_params_expand_intent() {
        let params = StripeBilling::subscription_params("cus_1", "price_1");
        assert_eq!(params.get("items[0][price]"), Some("price_1"));
        assert_eq!(params.get("expand[]"), Some("latest_invoice.payment_intent"));
    }

    #[test]
    fn test_provider_name() {
        let billing = StripeBilling::new(StripeConfig::new("sk_test_a", "pk_test_b")).unwrap();
        assert_eq!(billing.provider_name(), "stripe");
    }
}
