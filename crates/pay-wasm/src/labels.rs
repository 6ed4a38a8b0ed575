//! Display text for the two forms.

use pay_core::{Currency, Money};
use pay_forms::SubmitState;

pub const PROCESSING_LABEL: &str = "Processing...";
pub const PAY_LABEL: &str = "Pay";
pub const SUBSCRIBE_LABEL: &str = "Subscribe";

/// Submit button text
pub fn button_label(in_flight: bool, idle: &str) -> String {
    if in_flight {
        PROCESSING_LABEL.to_string()
    } else {
        idle.to_string()
    }
}

/// Heading of the subscription form, e.g. `Subscribe Now - Price: $20.00`
pub fn price_label(amount: i64, currency: Currency) -> String {
    format!(
        "Subscribe Now - Price: {}",
        Money::from_minor(amount, currency).display()
    )
}

pub fn status_name(state: &SubmitState) -> &'static str {
    match state {
        SubmitState::Idle => "idle",
        SubmitState::Processing => "processing",
        SubmitState::Succeeded => "succeeded",
        SubmitState::Failed(_) => "failed",
    }
}
