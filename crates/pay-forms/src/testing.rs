//! In-memory fakes for the form tests.

use crate::backend::PaymentBackend;
use async_trait::async_trait;
use pay_core::{
    CardToken, CardTokenizer, PaymentConfirmer, PaymentError, PaymentIntent, PaymentResult,
    ProvisionedPlan, Subscription, SubscriptionRequest,
};
use serde_json::json;
use std::cell::{Cell, RefCell};
use std::time::Duration;

pub struct FakeBackend {
    price_id: String,
    unreachable: bool,
    amounts: RefCell<Vec<i64>>,
    subscriptions: RefCell<Vec<SubscriptionRequest>>,
}

impl Default for FakeBackend {
    fn default() -> Self {
        Self {
            price_id: "price_1".into(),
            unreachable: false,
            amounts: RefCell::default(),
            subscriptions: RefCell::default(),
        }
    }
}

impl FakeBackend {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }

    pub fn with_price_id(mut self, price_id: &str) -> Self {
        self.price_id = price_id.into();
        self
    }

    pub fn amounts(&self) -> Vec<i64> {
        self.amounts.borrow().clone()
    }

    pub fn subscriptions(&self) -> Vec<SubscriptionRequest> {
        self.subscriptions.borrow().clone()
    }

    fn reachable(&self) -> PaymentResult<()> {
        if self.unreachable {
            return Err(PaymentError::NetworkError("connection refused".into()));
        }
        Ok(())
    }
}

#[async_trait(?Send)]
impl PaymentBackend for FakeBackend {
    async fn create_product(&self) -> PaymentResult<ProvisionedPlan> {
        self.reachable()?;
        Ok(ProvisionedPlan {
            product_id: "prod_1".into(),
            price_id: self.price_id.clone(),
        })
    }

    async fn create_payment_intent(&self, amount: i64) -> PaymentResult<PaymentIntent> {
        self.reachable()?;
        self.amounts.borrow_mut().push(amount);
        Ok(serde_json::from_value(json!({
            "id": "pi_1",
            "amount": amount,
            "currency": "usd",
            "status": "requires_payment_method",
            "client_secret": "pi_1_secret_x"
        }))?)
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> PaymentResult<Subscription> {
        self.reachable()?;
        self.subscriptions.borrow_mut().push(request.clone());
        Ok(serde_json::from_value(json!({
            "id": "sub_1",
            "customer": "cus_1",
            "status": "active",
            "items": { "data": [{ "id": "si_1", "price": { "id": request.price_id } }] }
        }))?)
    }
}

pub struct FakeCard {
    outcome: Result<String, String>,
    delay: Option<Duration>,
    calls: Cell<usize>,
}

impl FakeCard {
    pub fn valid() -> Self {
        Self {
            outcome: Ok("pm_card".into()),
            delay: None,
            calls: Cell::new(0),
        }
    }

    pub fn declined(message: &str) -> Self {
        Self {
            outcome: Err(message.into()),
            ..Self::valid()
        }
    }

    pub fn slow(mut self) -> Self {
        self.delay = Some(Duration::from_millis(20));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

#[async_trait(?Send)]
impl CardTokenizer for FakeCard {
    async fn tokenize(&self) -> PaymentResult<CardToken> {
        self.calls.set(self.calls.get() + 1);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.outcome {
            Ok(id) => Ok(CardToken::new(id.clone())),
            Err(message) => Err(PaymentError::CardError {
                message: message.clone(),
            }),
        }
    }
}

#[derive(Default)]
pub struct FakeConfirmer {
    confirmed: RefCell<Vec<(String, String)>>,
}

impl FakeConfirmer {
    pub fn confirmed(&self) -> Vec<(String, String)> {
        self.confirmed.borrow().clone()
    }
}

#[async_trait(?Send)]
impl PaymentConfirmer for FakeConfirmer {
    async fn confirm_card_payment(
        &self,
        client_secret: &str,
        card: &CardToken,
    ) -> PaymentResult<PaymentIntent> {
        self.confirmed
            .borrow_mut()
            .push((client_secret.to_string(), card.to_string()));
        Ok(serde_json::from_value(json!({
            "id": "pi_1",
            "amount": 1000,
            "currency": "usd",
            "status": "succeeded"
        }))?)
    }
}
