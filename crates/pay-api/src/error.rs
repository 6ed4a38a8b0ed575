//! # API Errors
//!
//! Every failing route answers with `{ "error": message }` and the status
//! code the underlying `PaymentError` maps to.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pay_core::{ErrorBody, PaymentError};
use tracing::{error, warn};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// Body could not be read as the expected JSON
    #[error("{0}")]
    Body(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Payment(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::Body(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Body(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            error!("Request failed ({}): {}", status, message);
        } else {
            warn!("Request rejected ({}): {}", status, message);
        }

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(PaymentError::provider("stripe", "No such price"));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "No such price");

        let err = ApiError::from(PaymentError::InvalidRequest("bad email".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        assert_eq!(ApiError::Body("EOF".into()).status(), StatusCode::BAD_REQUEST);
    }
}
