//! # One-time Payment Form
//!
//! Tokenize the card, ask the server for a payment intent, then confirm the
//! intent with the token. Raw card data only ever goes to the tokenizer.

use crate::backend::PaymentBackend;
use crate::error::FormResult;
use crate::submit::{SubmitControl, SubmitState};
use pay_core::{CardTokenizer, PaymentConfirmer, PaymentError, PaymentIntent};
use tracing::{info, instrument};

/// Charged when no amount is configured, in smallest currency unit
pub const DEFAULT_AMOUNT: i64 = 1000;

pub struct PaymentForm<B, T, C> {
    backend: B,
    tokenizer: T,
    confirmer: C,
    amount: i64,
    control: SubmitControl,
}

impl<B, T, C> PaymentForm<B, T, C>
where
    B: PaymentBackend,
    T: CardTokenizer,
    C: PaymentConfirmer,
{
    pub fn new(backend: B, tokenizer: T, confirmer: C) -> Self {
        Self {
            backend,
            tokenizer,
            confirmer,
            amount: DEFAULT_AMOUNT,
            control: SubmitControl::new(),
        }
    }

    pub fn with_amount(mut self, amount: i64) -> Self {
        self.amount = amount;
        self
    }

    pub fn amount(&self) -> i64 {
        self.amount
    }

    pub fn state(&self) -> SubmitState {
        self.control.state()
    }

    pub fn is_disabled(&self) -> bool {
        self.control.is_disabled()
    }

    #[instrument(skip(self), fields(amount = self.amount))]
    pub async fn submit(&self) -> FormResult<PaymentIntent> {
        let guard = self.control.begin()?;
        let result = self.charge().await;
        guard.finish(result)
    }

    async fn charge(&self) -> FormResult<PaymentIntent> {
        let token = self.tokenizer.tokenize().await?;

        let intent = self.backend.create_payment_intent(self.amount).await?;
        let client_secret = intent.client_secret.as_deref().ok_or_else(|| {
            PaymentError::Internal(format!("Payment intent {} has no client secret", intent.id))
        })?;

        let confirmed = self
            .confirmer
            .confirm_card_payment(client_secret, &token)
            .await?;

        info!("Payment {} confirmed: {}", confirmed.id, confirmed.status);
        Ok(confirmed)
    }
}
