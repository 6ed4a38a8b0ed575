//! # Stripe Configuration
//!
//! Configuration management for Stripe integration.
//! Keys are loaded from environment variables. A missing secret key is not
//! a startup error: the server still comes up and every provider-backed
//! route fails at its first Stripe call instead.

use pay_core::{PaymentError, PaymentResult};
use std::env;

/// API version every request is pinned to
pub const STRIPE_API_VERSION: &str = "2024-06-20";

pub const STRIPE_API_BASE: &str = "https://api.stripe.com";

/// Stripe API configuration
#[derive(Debug, Clone)]
pub struct StripeConfig {
    /// Secret API key (sk_test_... or sk_live_...), server-side only
    pub secret_key: Option<String>,

    /// Publishable key (pk_test_... or pk_live_...), safe to hand to clients
    pub publishable_key: Option<String>,

    /// API base URL (for testing/mocking)
    pub api_base_url: String,

    /// API version
    pub api_version: String,
}

impl StripeConfig {
    /// Load configuration from environment variables.
    ///
    /// Read env vars (all optional):
    /// - `STRIPE_SECRET_KEY`
    /// - `STRIPE_PUBLISHABLE_KEY`
    /// - `STRIPE_API_BASE`
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let non_empty = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        let config = Self::from_keys(
            non_empty("STRIPE_SECRET_KEY"),
            non_empty("STRIPE_PUBLISHABLE_KEY"),
        )?;

        Ok(match non_empty("STRIPE_API_BASE") {
            Some(base) => config.with_api_base_url(base),
            None => config,
        })
    }

    /// Build a config from optional keys, validating the ones present.
    pub fn from_keys(
        secret_key: Option<String>,
        publishable_key: Option<String>,
    ) -> PaymentResult<Self> {
        if let Some(ref key) = secret_key {
            if !key.starts_with("sk_test_") && !key.starts_with("sk_live_") && !key.starts_with("rk_") {
                return Err(PaymentError::Configuration(
                    "STRIPE_SECRET_KEY must start with sk_test_, sk_live_ or rk_".to_string(),
                ));
            }
        }

        if let Some(ref key) = publishable_key {
            if !key.starts_with("pk_test_") && !key.starts_with("pk_live_") {
                return Err(PaymentError::Configuration(
                    "STRIPE_PUBLISHABLE_KEY must start with pk_test_ or pk_live_".to_string(),
                ));
            }
        }

        Ok(Self {
            secret_key,
            publishable_key,
            api_base_url: STRIPE_API_BASE.to_string(),
            api_version: STRIPE_API_VERSION.to_string(),
        })
    }

    /// Create config with explicit values (for testing)
    pub fn new(secret_key: impl Into<String>, publishable_key: impl Into<String>) -> Self {
        Self {
            secret_key: Some(secret_key.into()),
            publishable_key: Some(publishable_key.into()),
            api_base_url: STRIPE_API_BASE.to_string(),
            api_version: STRIPE_API_VERSION.to_string(),
        }
    }

    /// Check if using test keys
    pub fn is_test_mode(&self) -> bool {
        self.secret_key
            .as_deref()
            .or(self.publishable_key.as_deref())
            .is_some_and(|k| k.contains("_test_"))
    }

    /// Authorization header for secret-key (server) calls
    pub fn secret_auth_header(&self) -> PaymentResult<String> {
        self.secret_key
            .as_ref()
            .map(|key| format!("Bearer {}", key))
            .ok_or_else(|| PaymentError::Configuration("STRIPE_SECRET_KEY not set".to_string()))
    }

    /// Authorization header for publishable-key (client) calls
    pub fn publishable_auth_header(&self) -> PaymentResult<String> {
        self.publishable_key
            .as_ref()
            .map(|key| format!("Bearer {}", key))
            .ok_or_else(|| {
                PaymentError::Configuration("STRIPE_PUBLISHABLE_KEY not set".to_string())
            })
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_modes() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert!(config.is_test_mode());

        let config = StripeConfig::new("sk_live_abc123", "pk_live_xyz789");
        assert!(!config.is_test_mode());
    }

    #[test]
    fn test_auth_headers() {
        let config = StripeConfig::new("sk_test_abc123", "pk_test_xyz789");
        assert_eq!(config.secret_auth_header().unwrap(), "Bearer sk_test_abc123");
        assert_eq!(
            config.publishable_auth_header().unwrap(),
            "Bearer pk_test_xyz789"
        );
    }

    #[test]
    fn test_missing_secret_key_fails_on_use_not_on_load() {
        let config = StripeConfig::from_keys(None, Some("pk_test_xyz".into())).unwrap();

        let err = config.secret_auth_header().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: STRIPE_SECRET_KEY not set");
        assert!(config.publishable_auth_header().is_ok());
    }

    #[test]
    fn test_malformed_keys_rejected() {
        assert!(StripeConfig::from_keys(Some("pk_test_wrong_slot".into()), None).is_err());
        assert!(StripeConfig::from_keys(None, Some("sk_test_leaked".into())).is_err());
    }

    #[test]
    fn test_api_base_trailing_slash() {
        let config = StripeConfig::new("sk_test_a", "pk_test_b").with_api_base_url("http://127.0.0.1:9999/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9999");
    }
}
