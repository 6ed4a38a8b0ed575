//! # Payment Error Types
//!
//! Typed error handling for card-relay.
//! Every provider call and request check returns `Result<T, PaymentError>`.

use thiserror::Error;

/// Core error type for all payment operations
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Amount rejected by the server-side amount policy
    #[error("Invalid amount: {message}")]
    InvalidAmount { message: String },

    /// Payment provider API error. `message` is the provider's human-readable text.
    #[error("{message}")]
    ProviderError { provider: String, message: String },

    /// Card could not be tokenized or the payment was declined on confirmation
    #[error("{message}")]
    CardError { message: String },

    /// The local API answered with a non-success status and an `{ error }` body
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Network/HTTP error communicating with provider or local API
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl PaymentError {
    /// Provider error attributed to `provider`
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        PaymentError::ProviderError {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status code appropriate for this error.
    ///
    /// Everything the provider or the process itself failed at is a 500;
    /// only request validation is reported as a client error.
    pub fn status_code(&self) -> u16 {
        match self {
            PaymentError::InvalidRequest(_) => 400,
            PaymentError::InvalidAmount { .. } => 400,
            PaymentError::CardError { .. } => 402,
            PaymentError::Api { status, .. } => *status,
            PaymentError::Configuration(_)
            | PaymentError::ProviderError { .. }
            | PaymentError::NetworkError(_)
            | PaymentError::Serialization(_)
            | PaymentError::Internal(_) => 500,
        }
    }

    /// Whether the failure was caused by the caller's input
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

impl From<serde_json::Error> for PaymentError {
    fn from(err: serde_json::Error) -> Self {
        PaymentError::Serialization(err.to_string())
    }
}

/// Result type alias for payment operations
pub type PaymentResult<T> = Result<T, PaymentError>;
