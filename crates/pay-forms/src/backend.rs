//! # Local API Client
//!
//! The forms reach the server only through `PaymentBackend`. `LocalApi`
//! posts JSON to the card-relay routes with `reqwest`, which also runs in
//! the browser on top of `fetch`.

use async_trait::async_trait;
use pay_core::{
    ErrorBody, PaymentError, PaymentIntent, PaymentRequest, PaymentResult, ProvisionedPlan,
    Subscription, SubscriptionRequest,
};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

#[async_trait(?Send)]
pub trait PaymentBackend {
    /// `POST /api/create-product`
    async fn create_product(&self) -> PaymentResult<ProvisionedPlan>;

    /// `POST /api/payment-intent`
    async fn create_payment_intent(&self, amount: i64) -> PaymentResult<PaymentIntent>;

    /// `POST /api/monthly-subscription`
    async fn create_subscription(&self, request: &SubscriptionRequest)
        -> PaymentResult<Subscription>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClientConfig {
    publishable_key: String,
}

#[derive(Debug, Clone)]
pub struct LocalApi {
    client: Client,
    base_url: String,
}

impl LocalApi {
    /// `base_url` is the server origin, e.g. `http://127.0.0.1:8080`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET /api/config`: the publishable key for the card element
    pub async fn publishable_key(&self) -> PaymentResult<String> {
        let config: ClientConfig = self
            .send(self.client.get(format!("{}/api/config", self.base_url)))
            .await?;
        Ok(config.publishable_key)
    }

    fn post(&self, path: &str) -> RequestBuilder {
        self.client.post(format!("{}{}", self.base_url, path))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> PaymentResult<T> {
        let response = request
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&body)
                .map(|b| b.error)
                .unwrap_or_else(|_| format!("HTTP {}: {}", status.as_u16(), body));
            warn!("Local API returned {}: {}", status, message);
            return Err(PaymentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait(?Send)]
impl PaymentBackend for LocalApi {
    async fn create_product(&self) -> PaymentResult<ProvisionedPlan> {
        let plan: ProvisionedPlan = self.send(self.post("/api/create-product")).await?;
        debug!("Provisioned price {}", plan.price_id);
        Ok(plan)
    }

    async fn create_payment_intent(&self, amount: i64) -> PaymentResult<PaymentIntent> {
        let request = self
            .post("/api/payment-intent")
            .json(&PaymentRequest { amount });
        self.send(request).await
    }

    async fn create_subscription(
        &self,
        request: &SubscriptionRequest,
    ) -> PaymentResult<Subscription> {
        self.send(self.post("/api/monthly-subscription").json(request))
            .await
    }
}
