//! # card-relay
//!
//! Card payments and monthly subscriptions relayed to Stripe.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export STRIPE_SECRET_KEY=sk_test_...
//! export STRIPE_PUBLISHABLE_KEY=pk_test_...
//!
//! # Run the server
//! card-relay
//! ```

use pay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    print_banner();

    let state = AppState::new()?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!(
        "Plan: {:?} at {}/{}",
        state.plan.name,
        state.plan.price().display(),
        state.plan.interval.as_str()
    );
    info!("Provisioning mode: {:?}", state.config.provisioning_mode);
    info!("Payment provider: {}", state.provider.provider_name());

    let app = routes::create_router(state);

    info!("card-relay starting on http://{}", addr);

    if !is_prod {
        info!("Health: http://{}/health", addr);
        info!("Payment intent: POST http://{}/api/payment-intent", addr);
        info!("Subscription: POST http://{}/api/monthly-subscription", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  card-relay
  ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
  Card payments and subscriptions
  Version: {}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
