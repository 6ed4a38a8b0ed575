//! Shared harness for the API integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use pay_api::{create_router, AppConfig, AppState, ProvisioningMode};
use pay_core::{
    BillingProvider, Customer, Money, NewCustomer, PaymentError, PaymentIntent, PaymentResult,
    PlanDefinition, Price, Product, Subscription,
};
use serde_json::json;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const PUBLISHABLE_KEY: &str = "pk_test_456";
pub const OUTAGE: &str = "Simulated provider outage";

/// In-memory provider that counts calls and can be told to fail
#[derive(Default)]
pub struct FakeProvider {
    pub products: AtomicUsize,
    pub prices: AtomicUsize,
    pub intents: AtomicUsize,
    pub customers: AtomicUsize,
    pub subscriptions: AtomicUsize,
    pub deleted: Mutex<Vec<String>>,
    /// Every call fails
    pub fail_all: AtomicBool,
    /// Only subscription creation fails
    pub fail_subscription: AtomicBool,
    /// Delay applied to product creation
    pub product_delay: Option<Duration>,
}

impl FakeProvider {
    pub fn failing() -> Self {
        let provider = Self::default();
        provider.fail_all.store(true, Ordering::SeqCst);
        provider
    }

    pub fn slow() -> Self {
        Self {
            product_delay: Some(Duration::from_millis(20)),
            ..Self::default()
        }
    }

    pub fn count(counter: &AtomicUsize) -> usize {
        counter.load(Ordering::SeqCst)
    }

    pub fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }

    fn check(&self) -> PaymentResult<()> {
        if self.fail_all.load(Ordering::SeqCst) {
            return Err(PaymentError::provider("stripe", OUTAGE));
        }
        Ok(())
    }
}

fn next(counter: &AtomicUsize) -> usize {
    counter.fetch_add(1, Ordering::SeqCst) + 1
}

#[async_trait]
impl BillingProvider for FakeProvider {
    async fn create_product(&self, plan: &PlanDefinition) -> PaymentResult<Product> {
        self.check()?;
        if let Some(delay) = self.product_delay {
            tokio::time::sleep(delay).await;
        }
        let n = next(&self.products);
        Ok(serde_json::from_value(json!({
            "id": format!("prod_{}", n),
            "object": "product",
            "name": plan.name,
            "description": plan.description
        }))?)
    }

    async fn create_recurring_price(
        &self,
        product_id: &str,
        plan: &PlanDefinition,
    ) -> PaymentResult<Price> {
        self.check()?;
        let n = next(&self.prices);
        Ok(serde_json::from_value(json!({
            "id": format!("price_{}", n),
            "object": "price",
            "product": product_id,
            "unit_amount": plan.unit_amount,
            "currency": plan.currency.as_str(),
            "recurring": { "interval": plan.interval.as_str(), "interval_count": plan.interval_count }
        }))?)
    }

    async fn create_payment_intent(&self, amount: Money) -> PaymentResult<PaymentIntent> {
        self.check()?;
        let n = next(&self.intents);
        Ok(serde_json::from_value(json!({
            "id": format!("pi_{}", n),
            "object": "payment_intent",
            "amount": amount.amount,
            "currency": amount.currency.as_str(),
            "status": "requires_payment_method",
            "client_secret": format!("pi_{}_secret_test", n),
            "livemode": false
        }))?)
    }

    async fn create_customer(&self, customer: &NewCustomer) -> PaymentResult<Customer> {
        self.check()?;
        let n = next(&self.customers);
        Ok(serde_json::from_value(json!({
            "id": format!("cus_{}", n),
            "object": "customer",
            "email": customer.email,
            "invoice_settings": { "default_payment_method": customer.payment_method_id }
        }))?)
    }

    async fn delete_customer(&self, customer_id: &str) -> PaymentResult<()> {
        self.check()?;
        self.deleted.lock().unwrap().push(customer_id.to_string());
        Ok(())
    }

    async fn create_subscription(
        &self,
        customer_id: &str,
        price_id: &str,
    ) -> PaymentResult<Subscription> {
        self.check()?;
        if self.fail_subscription.load(Ordering::SeqCst) {
            return Err(PaymentError::provider("stripe", "No such price: 'price_gone'"));
        }
        let n = next(&self.subscriptions);
        Ok(serde_json::from_value(json!({
            "id": format!("sub_{}", n),
            "object": "subscription",
            "customer": customer_id,
            "status": "active",
            "items": {
                "object": "list",
                "data": [{ "id": format!("si_{}", n), "price": { "id": price_id } }]
            },
            "latest_invoice": {
                "id": format!("in_{}", n),
                "payment_intent": { "id": format!("pi_sub_{}", n), "status": "succeeded" }
            }
        }))?)
    }

    fn provider_name(&self) -> &'static str {
        "fake"
    }
}

pub struct TestHarness {
    pub server: TestServer,
    pub provider: Arc<FakeProvider>,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::build(FakeProvider::default(), AppConfig::default(), PlanDefinition::default())
    }

    pub fn with_mode(mode: ProvisioningMode) -> Self {
        let config = AppConfig {
            provisioning_mode: mode,
            ..AppConfig::default()
        };
        Self::build(FakeProvider::default(), config, PlanDefinition::default())
    }

    pub fn build(provider: FakeProvider, config: AppConfig, plan: PlanDefinition) -> Self {
        let provider = Arc::new(provider);
        let state = AppState::with_provider(config, provider.clone(), plan)
            .with_publishable_key(Some(PUBLISHABLE_KEY.to_string()));
        Self::serve(state, provider)
    }

    pub fn serve(state: AppState, provider: Arc<FakeProvider>) -> Self {
        let server = TestServer::new(create_router(state)).expect("test server");
        Self { server, provider }
    }
}
