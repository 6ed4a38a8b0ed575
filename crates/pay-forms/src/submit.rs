//! # Submission State
//!
//! Each form owns one `SubmitControl`. `begin` claims the in-flight flag
//! synchronously, so a second submit started while the first is awaiting
//! fails before it can reach the card element or the API.

use crate::error::{FormError, FormResult};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

/// `Idle → Processing → Succeeded | Failed`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmitState {
    #[default]
    Idle,
    Processing,
    Succeeded,
    /// Message shown next to the form
    Failed(String),
}

impl SubmitState {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmitState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SubmitControl {
    in_flight: AtomicBool,
    state: Mutex<SubmitState>,
}

impl SubmitControl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the form for one submission
    pub fn begin(&self) -> FormResult<SubmitGuard<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Submit ignored: already in flight");
            return Err(FormError::InFlight);
        }

        self.set(SubmitState::Processing);
        Ok(SubmitGuard {
            control: self,
            finished: false,
        })
    }

    pub fn state(&self) -> SubmitState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the submit control should be rendered disabled
    pub fn is_disabled(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn set(&self, state: SubmitState) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = state;
    }
}

/// Held for the duration of one submission; releases the flag on drop.
#[must_use]
pub struct SubmitGuard<'a> {
    control: &'a SubmitControl,
    finished: bool,
}

impl SubmitGuard<'_> {
    /// Record the outcome and hand it back
    pub fn finish<T>(mut self, result: FormResult<T>) -> FormResult<T> {
        let state = match &result {
            Ok(_) => SubmitState::Succeeded,
            Err(err) => SubmitState::Failed(err.to_string()),
        };
        self.control.set(state);
        self.finished = true;
        result
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        // Abandoned submission
        if !self.finished {
            self.control.set(SubmitState::Idle);
        }
        self.control.in_flight.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pay_core::PaymentError;

    #[test]
    fn test_second_begin_is_rejected() {
        let control = SubmitControl::new();
        let guard = control.begin().unwrap();

        assert!(control.is_disabled());
        assert_eq!(control.state(), SubmitState::Processing);
        assert!(matches!(control.begin(), Err(FormError::InFlight)));

        drop(guard);
        assert!(!control.is_disabled());
        assert!(control.begin().is_ok());
    }

    #[test]
    fn test_finish_records_outcome() {
        let control = SubmitControl::new();

        let guard = control.begin().unwrap();
        let _ = guard.finish::<()>(Err(PaymentError::NetworkError("offline".into()).into()));
        assert_eq!(
            control.state().error_message(),
            Some("Network error: offline")
        );
        assert!(!control.is_disabled());

        let guard = control.begin().unwrap();
        guard.finish(Ok(())).unwrap();
        assert_eq!(control.state(), SubmitState::Succeeded);
    }

    #[test]
    fn test_abandoned_guard_returns_to_idle() {
        let control = SubmitControl::new();
        drop(control.begin().unwrap());
        assert_eq!(control.state(), SubmitState::Idle);
    }
}
