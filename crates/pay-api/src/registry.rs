//! # Price Registry
//!
//! Process-wide memo of provisioned product/price pairs, keyed by product
//! name. The lock is held across provider calls so concurrent first
//! requests create a single pair.

use chrono::{DateTime, Utc};
use pay_core::{BillingProvider, PaymentResult, PlanDefinition, ProvisionedPlan};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Clone)]
struct Entry {
    plan: ProvisionedPlan,
    provisioned_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct PriceRegistry {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl PriceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pinned ids from the plan, else the memoized pair, else a fresh one.
    pub async fn get_or_provision(
        &self,
        provider: &dyn BillingProvider,
        plan: &PlanDefinition,
    ) -> PaymentResult<ProvisionedPlan> {
        if let Some(pinned) = plan.pinned() {
            debug!("Using pinned price {} for {:?}", pinned.price_id, plan.name);
            return Ok(pinned);
        }

        let mut entries = self.entries.lock().await;
        if let Some(entry) = entries.get(&plan.name) {
            debug!(
                "Reusing price {} for {:?} (provisioned {})",
                entry.plan.price_id,
                plan.name,
                entry.provisioned_at.to_rfc3339()
            );
            return Ok(entry.plan.clone());
        }

        let created = provision(provider, plan).await?;
        entries.insert(
            plan.name.clone(),
            Entry {
                plan: created.clone(),
                provisioned_at: Utc::now(),
            },
        );
        Ok(created)
    }

    /// Number of memoized plans
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

/// Create one product and one recurring price for `plan`.
pub async fn provision(
    provider: &dyn BillingProvider,
    plan: &PlanDefinition,
) -> PaymentResult<ProvisionedPlan> {
    let product = provider.create_product(plan).await?;
    let price = provider.create_recurring_price(&product.id, plan).await?;

    info!(
        "Provisioned {:?}: product={}, price={} ({}/{})",
        plan.name,
        product.id,
        price.id,
        plan.price().display(),
        plan.interval.as_str()
    );

    Ok(ProvisionedPlan {
        product_id: product.id,
        price_id: price.id,
    })
}
