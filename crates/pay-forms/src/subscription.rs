//! # Monthly Subscription Form
//!
//! On mount the form provisions the plan and keeps the returned price id.
//! Submitting tokenizes the card and asks the server to subscribe the
//! customer to that price.

use crate::backend::PaymentBackend;
use crate::error::{FormError, FormResult};
use crate::submit::{SubmitControl, SubmitState};
use pay_core::{
    validate_email, CardTokenizer, PaymentError, PriceReference, Subscription,
    SubscriptionRequest,
};
use std::sync::{Mutex, PoisonError};
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Loading,
    Ready(PriceReference),
    Failed(String),
}

pub struct SubscriptionForm<B, T> {
    backend: B,
    tokenizer: T,
    price: Mutex<LoadState>,
    control: SubmitControl,
}

impl<B, T> SubscriptionForm<B, T>
where
    B: PaymentBackend,
    T: CardTokenizer,
{
    pub fn new(backend: B, tokenizer: T) -> Self {
        Self {
            backend,
            tokenizer,
            price: Mutex::new(LoadState::Loading),
            control: SubmitControl::new(),
        }
    }

    /// Provision the plan and store its price id
    #[instrument(skip(self))]
    pub async fn load(&self) -> FormResult<PriceReference> {
        let result = self
            .backend
            .create_product()
            .await
            .and_then(|plan| {
                PriceReference::new(plan.price_id).ok_or_else(|| {
                    PaymentError::Internal("Provisioning returned an empty price id".to_string())
                })
            });

        let next = match &result {
            Ok(price) => {
                info!("Subscription price ready: {}", price.as_str());
                LoadState::Ready(price.clone())
            }
            Err(err) => {
                warn!("Could not load subscription price: {}", err);
                LoadState::Failed(err.to_string())
            }
        };
        *self.price.lock().unwrap_or_else(PoisonError::into_inner) = next;

        result.map_err(Into::into)
    }

    pub fn load_state(&self) -> LoadState {
        self.price
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn price(&self) -> Option<PriceReference> {
        match self.load_state() {
            LoadState::Ready(price) => Some(price),
            _ => None,
        }
    }

    pub fn state(&self) -> SubmitState {
        self.control.state()
    }

    /// Submit stays disabled until a price is loaded and while in flight
    pub fn is_disabled(&self) -> bool {
        self.price().is_none() || self.control.is_disabled()
    }

    #[instrument(skip(self, email))]
    pub async fn submit(&self, email: &str) -> FormResult<Subscription> {
        let guard = self.control.begin()?;
        let result = self.subscribe(email).await;
        guard.finish(result)
    }

    async fn subscribe(&self, email: &str) -> FormResult<Subscription> {
        validate_email(email)?;
        let price = self.price().ok_or(FormError::NotReady)?;

        let token = self.tokenizer.tokenize().await?;

        let request = SubscriptionRequest {
            email: email.trim().to_string(),
            payment_method_id: token.as_str().to_string(),
            price_id: price.as_str().to_string(),
        };
        let subscription = self.backend.create_subscription(&request).await?;

        info!(
            "Subscribed: id={}, status={}",
            subscription.id, subscription.status
        );
        Ok(subscription)
    }
}
