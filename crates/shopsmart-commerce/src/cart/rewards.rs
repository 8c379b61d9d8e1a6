//! Reward-point discount toggle.
//!
//! The discount is a function of the subtotal and the toggle, never a
//! running adjustment: flipping the toggle any number of times lands on the
//! same total for the same subtotal.

use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Toggle state plus the reward amount fetched for the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct RewardDiscount {
    enabled: bool,
    reward_amount: Option<Money>,
}

impl RewardDiscount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the currency value of the customer's reward points.
    pub fn set_reward_amount(&mut self, amount: Money) -> Result<(), CommerceError> {
        if amount.is_negative() {
            return Err(CommerceError::InvalidRewardAmount(amount.display()));
        }
        self.reward_amount = Some(amount);
        Ok(())
    }

    /// Reward amount, if fetched.
    pub fn reward_amount(&self) -> Option<Money> {
        self.reward_amount
    }

    /// Set the toggle. Returns whether the state changed.
    pub fn set_enabled(&mut self, enabled: bool) -> bool {
        let changed = self.enabled != enabled;
        self.enabled = enabled;
        changed
    }

    /// Flip the toggle and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Turn the toggle off and forget the fetched amount.
    pub fn reset(&mut self) {
        self.enabled = false;
        self.reward_amount = None;
    }

    /// Discount to take off `subtotal`.
    ///
    /// Zero when disabled or when no amount has been fetched. Capped at the
    /// subtotal so the total never goes negative.
    pub fn discount_for(&self, subtotal: &Money) -> Result<Money, CommerceError> {
        let zero = Money::zero(subtotal.currency);
        let amount = match (self.enabled, self.reward_amount) {
            (true, Some(amount)) => amount,
            _ => return Ok(zero),
        };

        if amount.currency != subtotal.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: amount.currency.code().to_string(),
            });
        }

        Ok(amount.min(*subtotal))
    }
}
