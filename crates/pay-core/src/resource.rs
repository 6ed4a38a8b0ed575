//! # Provider Resources
//!
//! Objects returned by the payment provider. Each type names the fields
//! card-relay reads and keeps every other field in a flattened map, so a
//! resource serializes back out with the provider's full payload and can be
//! relayed to the browser unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider fields card-relay does not interpret
pub type Fields = Map<String, Value>;

fn created_at(fields: &Fields) -> Option<DateTime<Utc>> {
    fields
        .get("created")
        .and_then(Value::as_i64)
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub id: String,
    #[serde(default)]
    pub unit_amount: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Price {
    /// Recurring interval (`month`, `year`, ...) for recurring prices
    pub fn interval(&self) -> Option<&str> {
        self.extra
            .get("recurring")
            .and_then(|r| r.get("interval"))
            .and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Fields,
}

/// A single attempted charge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentIntent {
    pub id: String,
    /// Secret the browser uses to confirm the intent
    #[serde(default)]
    pub client_secret: Option<String>,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: Fields,
}

impl PaymentIntent {
    /// Recover the intent id from its client secret (`pi_X_secret_Y` -> `pi_X`)
    pub fn id_from_client_secret(client_secret: &str) -> Option<&str> {
        client_secret
            .split_once("_secret_")
            .map(|(id, _)| id)
            .filter(|id| id.starts_with("pi_"))
    }

    pub fn is_succeeded(&self) -> bool {
        self.status == "succeeded"
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        created_at(&self.extra)
    }
}

/// Paginated provider list (`{ "object": "list", "data": [...] }`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List<T> {
    pub data: Vec<T>,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionItem {
    pub id: String,
    pub price: Price,
    #[serde(flatten)]
    pub extra: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: String,
    pub customer: String,
    pub status: String,
    pub items: List<SubscriptionItem>,
    #[serde(flatten)]
    pub extra: Fields,
}

impl Subscription {
    /// Price ids of all subscription items
    pub fn price_ids(&self) -> impl Iterator<Item = &str> {
        self.items.data.iter().map(|item| item.price.id.as_str())
    }

    pub fn includes_price(&self, price_id: &str) -> bool {
        self.price_ids().any(|id| id == price_id)
    }

    /// The expanded `latest_invoice.payment_intent`, when present
    pub fn latest_payment_intent(&self) -> Option<&Value> {
        self.extra
            .get("latest_invoice")
            .and_then(|invoice| invoice.get("payment_intent"))
            .filter(|intent| intent.is_object())
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        created_at(&self.extra)
    }
}

/// Tokenized card
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub extra: Fields,
}
