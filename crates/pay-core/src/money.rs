//! # Money Types
//!
//! Currencies, minor-unit amounts and billing intervals.

use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the ISO 4217 currency code as the provider expects it
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the others have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Convert from smallest unit back to decimal
    pub fn from_smallest_unit(&self, amount: i64) -> f64 {
        let divisor = 10_f64.powi(self.decimal_places() as i32);
        amount as f64 / divisor
    }

    fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "€",
            Currency::GBP => "£",
            Currency::JPY => "¥",
            Currency::CAD => "C$",
            Currency::AUD => "A$",
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "jpy" => Ok(Currency::JPY),
            "cad" => Ok(Currency::CAD),
            "aud" => Ok(Currency::AUD),
            other => Err(format!("unsupported currency: {}", other)),
        }
    }
}

/// An amount in the smallest currency unit (cents for USD)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: i64,
    pub currency: Currency,
}

impl Money {
    pub fn from_minor(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Format for display (e.g., "$20.00")
    pub fn display(&self) -> String {
        let decimal = self.currency.from_smallest_unit(self.amount);
        if self.currency.decimal_places() == 0 {
            format!("{}{}", self.currency.symbol(), self.amount)
        } else {
            format!("{}{:.2}", self.currency.symbol(), decimal)
        }
    }
}

/// Recurring billing interval, named the way the provider names them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Day => "day",
            BillingInterval::Week => "week",
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_minor(2000, Currency::USD).display(), "$20.00");
        assert_eq!(Money::from_minor(1999, Currency::EUR).display(), "€19.99");
        assert_eq!(Money::from_minor(500, Currency::JPY).display(), "¥500");
    }

    #[test]
    fn test_currency_parse() {
        assert_eq!("USD".parse::<Currency>(), Ok(Currency::USD));
        assert_eq!("gbp".parse::<Currency>(), Ok(Currency::GBP));
        assert!("xyz".parse::<Currency>().is_err());
    }

    #[test]
    fn test_serde_names_match_provider() {
        assert_eq!(serde_json::to_string(&Currency::USD).unwrap(), "\"usd\"");
        assert_eq!(
            serde_json::to_string(&BillingInterval::Month).unwrap(),
            "\"month\""
        );
        assert_eq!(BillingInterval::Year.as_str(), "year");
    }
}
