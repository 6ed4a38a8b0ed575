//! # Stripe HTTP Transport
//!
//! Form-encoded requests against the Stripe REST API and translation of
//! Stripe error bodies into `PaymentError`.

use crate::config::StripeConfig;
use pay_core::{PaymentError, PaymentResult};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error};

pub(crate) const PROVIDER: &str = "stripe";

/// Ordered form parameters using Stripe's bracket notation for nesting
/// (`recurring[interval]`, `items[0][price]`, `expand[]`).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormParams(Vec<(String, String)>);

impl FormParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.0.push((key.into(), value.to_string()));
        self
    }

    pub fn push_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

/// Shared HTTP plumbing for the secret-key and publishable-key clients
#[derive(Debug, Clone)]
pub(crate) struct StripeHttp {
    client: Client,
    base_url: String,
    api_version: String,
}

impl StripeHttp {
    pub(crate) fn new(config: &StripeConfig) -> PaymentResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| PaymentError::Configuration(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            api_version: config.api_version.clone(),
        })
    }

    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        auth: &str,
        path: &str,
        params: &FormParams,
    ) -> PaymentResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {} ({} params)", path, params.as_pairs().len());

        let response = self
            .client
            .request(Method::POST, &url)
            .header("Authorization", auth)
            .header("Stripe-Version", &self.api_version)
            .form(&params.0)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        Self::handle_response(response).await
    }

    pub(crate) async fn delete<T: DeserializeOwned>(&self, auth: &str, path: &str) -> PaymentResult<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("DELETE {}", path);

        let response = self
            .client
            .request(Method::DELETE, &url)
            .header("Authorization", auth)
            .header("Stripe-Version", &self.api_version)
            .send()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> PaymentResult<T> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| PaymentError::NetworkError(e.to_string()))?;

        if !status.is_success() {
            error!("Stripe API error: status={}, body={}", status, body);
            return Err(parse_error_body(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| {
            PaymentError::Serialization(format!("Failed to parse Stripe response: {}", e))
        })
    }
}

/// Turn a Stripe error body into a `PaymentError`. Card errors keep their
/// own variant so the forms can show them as card problems.
pub(crate) fn parse_error_body(status: u16, body: &str) -> PaymentError {
    match serde_json::from_str::<StripeErrorResponse>(body) {
        Ok(response) if response.error.error_type.as_deref() == Some("card_error") => {
            PaymentError::CardError {
                message: response.error.message,
            }
        }
        Ok(response) => PaymentError::provider(PROVIDER, response.error.message),
        Err(_) => PaymentError::provider(PROVIDER, format!("HTTP {}: {}", status, body)),
    }
}

#[derive(Debug, Deserialize)]
struct StripeErrorResponse {
    error: StripeError,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    #[serde(default = "unknown_error")]
    message: String,
    #[serde(rename = "type", default)]
    error_type: Option<String>,
}

fn unknown_error() -> String {
    "Unknown Stripe error".to_string()
}
