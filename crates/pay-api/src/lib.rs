//! # pay-api
//!
//! HTTP API layer for card-relay.
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/api/create-product` | Provision product and monthly price |
//! | POST | `/api/payment-intent` | Create one-time payment intent |
//! | POST | `/api/monthly-subscription` | Create customer and subscription |
//! | GET | `/api/config` | Publishable key |

pub mod error;
pub mod handlers;
pub mod registry;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use registry::PriceRegistry;
pub use routes::create_router;
pub use state::{AppConfig, AppState, ProvisioningMode};
