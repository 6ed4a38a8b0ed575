//! # Application State
//!
//! Shared state for the Axum application.
//! Contains the billing provider, the plan to provision, and configuration.

use crate::registry::PriceRegistry;
use anyhow::Context;
use pay_core::{AmountPolicy, BoxedBillingProvider, PlanDefinition};
use pay_stripe::{StripeBilling, StripeConfig};
use std::str::FromStr;
use std::sync::Arc;

/// How `POST /api/create-product` treats repeated calls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProvisioningMode {
    /// Create the plan once per process (or use pinned ids) and hand the same pair back
    #[default]
    Reuse,
    /// Create a new product and price on every call
    AlwaysCreate,
}

impl FromStr for ProvisioningMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reuse" => Ok(ProvisioningMode::Reuse),
            "always-create" | "always_create" => Ok(ProvisioningMode::AlwaysCreate),
            other => anyhow::bail!("Unknown PROVISIONING_MODE: {}", other),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    /// Provisioning behavior
    pub provisioning_mode: ProvisioningMode,
    /// Bounds for one-time payment amounts
    pub amount_policy: AmountPolicy,
    /// Explicit plan file (otherwise `config/plan.toml` is searched)
    pub plan_file: Option<String>,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        let provisioning_mode = var("PROVISIONING_MODE")
            .map(|m| m.parse())
            .transpose()?
            .unwrap_or_default();

        let mut amount_policy = AmountPolicy::default();
        if let Some(min) = var("MIN_AMOUNT") {
            amount_policy.min = min.parse().context("MIN_AMOUNT must be an integer")?;
        }
        if let Some(max) = var("MAX_AMOUNT") {
            amount_policy.max = max.parse().context("MAX_AMOUNT must be an integer")?;
        }
        if let Some(allowed) = var("ALLOWED_AMOUNTS") {
            amount_policy.allowed = AmountPolicy::parse_allowed(&allowed)?;
        }

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: var("PORT").and_then(|p| p.parse().ok()).unwrap_or(8080),
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            provisioning_mode,
            amount_policy,
            plan_file: var("PLAN_FILE"),
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<std::net::SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid socket address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            environment: "development".to_string(),
            provisioning_mode: ProvisioningMode::default(),
            amount_policy: AmountPolicy::default(),
            plan_file: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Billing provider
    pub provider: BoxedBillingProvider,
    /// Product and price created by the provisioning route
    pub plan: Arc<PlanDefinition>,
    /// Memoized provisioned plans
    pub prices: PriceRegistry,
    /// Key handed to the browser for tokenization
    pub publishable_key: Option<String>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Stripe
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env()?;
        let plan = load_plan(config.plan_file.as_deref())?;

        let stripe_config = StripeConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to load Stripe config: {}", e))?;
        if stripe_config.secret_key.is_none() {
            tracing::warn!("STRIPE_SECRET_KEY not set; payment routes will fail until it is");
        }
        let publishable_key = stripe_config.publishable_key.clone();

        let stripe = StripeBilling::new(stripe_config)
            .map_err(|e| anyhow::anyhow!("Failed to initialize Stripe: {}", e))?;

        Ok(Self::with_provider(config, Arc::new(stripe), plan).with_publishable_key(publishable_key))
    }

    /// Create state around an explicit provider
    pub fn with_provider(
        config: AppConfig,
        provider: BoxedBillingProvider,
        plan: PlanDefinition,
    ) -> Self {
        Self {
            provider,
            plan: Arc::new(plan),
            prices: PriceRegistry::new(),
            publishable_key: None,
            config,
        }
    }

    /// Builder: set the publishable key served at `/api/config`
    pub fn with_publishable_key(mut self, key: Option<String>) -> Self {
        self.publishable_key = key;
        self
    }
}

/// Load the plan definition from config file
fn load_plan(explicit: Option<&str>) -> anyhow::Result<PlanDefinition> {
    if let Some(path) = explicit {
        let content =
            std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))?;
        let plan = PlanDefinition::from_toml(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
        tracing::info!("Loaded plan {:?} from {}", plan.name, path);
        return Ok(plan);
    }

    let config_paths = [
        "config/plan.toml",
        "../config/plan.toml",
        "../../config/plan.toml",
    ];

    for path in config_paths {
        if let Ok(content) = std::fs::read_to_string(path) {
            let plan = PlanDefinition::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path, e))?;
            tracing::info!("Loaded plan {:?} from {}", plan.name, path);
            return Ok(plan);
        }
    }

    tracing::warn!("No plan file found, using default plan");
    Ok(PlanDefinition::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provisioning_mode_parse() {
        assert_eq!("reuse".parse::<ProvisioningMode>().unwrap(), ProvisioningMode::Reuse);
        assert_eq!(
            "Always-Create".parse::<ProvisioningMode>().unwrap(),
            ProvisioningMode::AlwaysCreate
        );
        assert!("sometimes".parse::<ProvisioningMode>().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 3000,
            ..Default::default()
        };

        let addr = config.socket_addr().unwrap();
        assert_eq!(addr.to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn test_bad_socket_addr_is_error() {
        let config = AppConfig {
            host: "not a host".to_string(),
            ..Default::default()
        };
        assert!(config.socket_addr().is_err());
    }

    #[test]
    fn test_load_plan_explicit_missing_file() {
        assert!(load_plan(Some("/nonexistent/plan.toml")).is_err());
    }
}
