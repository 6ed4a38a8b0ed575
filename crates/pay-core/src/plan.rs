//! # Plan Definition
//!
//! The product and recurring price the provisioning endpoint creates.
//! Loaded from `config/plan.toml`; every field has a default so an empty
//! file (or no file at all) yields the stock monthly plan.

use crate::money::{BillingInterval, Currency, Money};
use serde::{Deserialize, Serialize};

/// Product + recurring price to provision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanDefinition {
    /// Product display name, also the registry key for memoized prices
    pub name: String,

    /// Product description
    pub description: String,

    /// Price per interval in smallest currency unit
    pub unit_amount: i64,

    pub currency: Currency,

    pub interval: BillingInterval,

    pub interval_count: u32,

    /// Already-provisioned product id. Used together with `price_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,

    /// Already-provisioned price id. Used together with `product_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_id: Option<String>,
}

impl Default for PlanDefinition {
    fn default() -> Self {
        Self {
            name: "Apple".to_string(),
            description: "A delicious fruit.".to_string(),
            unit_amount: 2000,
            currency: Currency::USD,
            interval: BillingInterval::Month,
            interval_count: 1,
            product_id: None,
            price_id: None,
        }
    }
}

impl PlanDefinition {
    /// Load a plan from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }

    /// Price per interval
    pub fn price(&self) -> Money {
        Money::from_minor(self.unit_amount, self.currency)
    }

    /// The pinned product/price pair, when both ids are configured
    pub fn pinned(&self) -> Option<ProvisionedPlan> {
        match (&self.product_id, &self.price_id) {
            (Some(product_id), Some(price_id)) if !product_id.is_empty() && !price_id.is_empty() => {
                Some(ProvisionedPlan {
                    product_id: product_id.clone(),
                    price_id: price_id.clone(),
                })
            }
            _ => None,
        }
    }
}

/// Identifiers returned by the provisioning endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProvisionedPlan {
    pub product_id: String,
    pub price_id: String,
}
