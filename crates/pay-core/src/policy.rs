//! # Amount Policy
//!
//! Server-side bounds for client-supplied payment amounts.

use crate::error::{PaymentError, PaymentResult};
use crate::money::{Currency, Money};

/// Smallest USD charge the provider accepts
pub const DEFAULT_MIN_AMOUNT: i64 = 50;

/// $9,999.99
pub const DEFAULT_MAX_AMOUNT: i64 = 999_999;

/// Bounds (and optionally an exact allow-list) for one-time payment amounts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountPolicy {
    pub currency: Currency,
    pub min: i64,
    pub max: i64,
    /// When non-empty, only these amounts are accepted
    pub allowed: Vec<i64>,
}

impl Default for AmountPolicy {
    fn default() -> Self {
        Self {
            currency: Currency::USD,
            min: DEFAULT_MIN_AMOUNT,
            max: DEFAULT_MAX_AMOUNT,
            allowed: Vec::new(),
        }
    }
}

impl AmountPolicy {
    /// Builder: accept only the listed amounts
    pub fn with_allowed(mut self, allowed: impl IntoIterator<Item = i64>) -> Self {
        self.allowed = allowed.into_iter().collect();
        self
    }

    /// Parse a comma separated allow-list (`"1000,2500"`)
    pub fn parse_allowed(list: &str) -> PaymentResult<Vec<i64>> {
        list.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>().map_err(|_| {
                    PaymentError::Configuration(format!("Invalid amount in allow-list: {}", s))
                })
            })
            .collect()
    }

    pub fn check(&self, amount: i64) -> PaymentResult<()> {
        if !self.allowed.is_empty() {
            if self.allowed.contains(&amount) {
                return Ok(());
            }
            return Err(PaymentError::InvalidAmount {
                message: format!(
                    "{} is not an accepted amount",
                    Money::from_minor(amount, self.currency).display()
                ),
            });
        }

        if amount < self.min {
            return Err(PaymentError::InvalidAmount {
                message: format!(
                    "amount must be at least {}",
                    Money::from_minor(self.min, self.currency).display()
                ),
            });
        }

        if amount > self.max {
            return Err(PaymentError::InvalidAmount {
                message: format!(
                    "amount must be at most {}",
                    Money::from_minor(self.max, self.currency).display()
                ),
            });
        }

        Ok(())
    }
}
