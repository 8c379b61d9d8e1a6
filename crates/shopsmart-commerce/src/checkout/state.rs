//! Checkout submission state machine.
//!
//! `Idle -> Submitting -> Succeeded | Failed`. A finished submission can be
//! retried by the user, which starts a new `Submitting` phase; nothing can
//! start while one is already in flight.

use crate::cart::{Cart, RewardDiscount};
use crate::checkout::CheckoutRequest;
use crate::error::CommerceError;
use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Where the current checkout submission stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// Request sent, waiting for the backend.
    Submitting,
    /// Backend accepted the order.
    Succeeded,
    /// Backend rejected the order or the request never completed.
    Failed { message: String },
}

impl CheckoutState {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutState::Idle => "idle",
            CheckoutState::Submitting => "submitting",
            CheckoutState::Succeeded => "succeeded",
            CheckoutState::Failed { .. } => "failed",
        }
    }

    /// Check if this is a terminal state of a submission.
    pub fn is_finished(&self) -> bool {
        matches!(self, CheckoutState::Succeeded | CheckoutState::Failed { .. })
    }
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Checkout submission tracker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkout {
    state: CheckoutState,
}

impl Checkout {
    /// Create a tracker in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &CheckoutState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == CheckoutState::Submitting
    }

    /// Start a submission and build its request.
    ///
    /// Fails with `CheckoutInProgress` while a submission is in flight and
    /// with `EmptyCart` when there is nothing to order. Neither failure
    /// changes the state.
    pub fn begin(
        &mut self,
        customer_id: CustomerId,
        cart: &Cart,
        rewards: &RewardDiscount,
        requires_delivery: bool,
    ) -> Result<CheckoutRequest, CommerceError> {
        if self.is_submitting() {
            return Err(CommerceError::CheckoutInProgress);
        }
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        debug!(from = %self.state, lines = cart.line_count(), "checkout submitting");
        self.state = CheckoutState::Submitting;
        Ok(CheckoutRequest::new(
            customer_id,
            rewards.is_enabled(),
            requires_delivery,
        ))
    }

    /// Record backend acceptance.
    pub fn succeed(&mut self) -> Result<(), CommerceError> {
        self.finish(CheckoutState::Succeeded)
    }

    /// Record a rejection or transport failure.
    pub fn fail(&mut self, message: impl Into<String>) -> Result<(), CommerceError> {
        self.finish(CheckoutState::Failed {
            message: message.into(),
        })
    }

    /// Go back to `Idle`. Not allowed mid-submission.
    pub fn reset(&mut self) -> Result<(), CommerceError> {
        if self.is_submitting() {
            return Err(self.invalid(&CheckoutState::Idle));
        }
        self.state = CheckoutState::Idle;
        Ok(())
    }

    fn finish(&mut self, next: CheckoutState) -> Result<(), CommerceError> {
        if !self.is_submitting() {
            return Err(self.invalid(&next));
        }
        debug!(to = %next, "checkout finished");
        self.state = next;
        Ok(())
    }

    fn invalid(&self, to: &CheckoutState) -> CommerceError {
        CommerceError::InvalidCheckoutTransition {
            from: self.state.to_string(),
            to: to.to_string(),
        }
    }
}
