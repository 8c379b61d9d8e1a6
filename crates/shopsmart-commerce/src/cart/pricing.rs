//! Cart pricing calculations.

use crate::cart::RewardDiscount;
use crate::error::CommerceError;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Derived pricing for a cart. Never stored; recompute it whenever the lines
/// or the toggles change.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CartSummary {
    /// Subtotal before discounts.
    pub subtotal: Money,
    /// Reward discount applied (zero when rewards are off).
    pub reward_discount: Money,
    /// Final total (subtotal - reward discount).
    pub total: Money,
    /// Whether the customer asked for home delivery.
    pub requires_delivery: bool,
}

impl CartSummary {
    /// Compute the summary from a subtotal and the current toggle state.
    pub fn compute(
        subtotal: Money,
        rewards: &RewardDiscount,
        requires_delivery: bool,
    ) -> Result<Self, CommerceError> {
        let reward_discount = rewards.discount_for(&subtotal)?;
        let total = subtotal.try_subtract(&reward_discount).ok_or_else(|| {
            CommerceError::CurrencyMismatch {
                expected: subtotal.currency.code().to_string(),
                got: reward_discount.currency.code().to_string(),
            }
        })?;

        Ok(Self {
            subtotal,
            reward_discount,
            total,
            requires_delivery,
        })
    }

    /// Check if a reward discount is applied.
    pub fn has_discount(&self) -> bool {
        self.reward_discount.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_no_discount() {
        let subtotal = Money::from_minor(2550, Currency::SGD);
        let summary = CartSummary::compute(subtotal, &RewardDiscount::new(), true).unwrap();
        assert_eq!(summary.total, subtotal);
        assert!(!summary.has_discount());
        assert!(summary.requires_delivery);
    }

    #[test]
    fn test_discount_applied() {
        let subtotal = Money::from_minor(2550, Currency::SGD);
        let mut rewards = RewardDiscount::new();
        rewards
            .set_reward_amount(Money::from_minor(500, Currency::SGD))
            .unwrap();
        rewards.set_enabled(true);

        let summary = CartSummary::compute(subtotal, &rewards, false).unwrap();
        assert_eq!(summary.total, Money::from_minor(2050, Currency::SGD));
        assert_eq!(summary.total.display(), "S$20.50");
        assert!(summary.has_discount());
    }
}
