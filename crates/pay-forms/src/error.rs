//! # Form Errors

use pay_core::PaymentError;
use thiserror::Error;

/// Why a form submission did not complete
#[derive(Debug, Error)]
pub enum FormError {
    /// Another submission on the same form has not finished
    #[error("A submission is already in progress")]
    InFlight,

    /// The subscription price has not been provisioned yet
    #[error("Subscription price is not ready yet")]
    NotReady,

    /// Tokenization, transport, API, or confirmation failure
    #[error(transparent)]
    Payment(#[from] PaymentError),
}

pub type FormResult<T> = Result<T, FormError>;
