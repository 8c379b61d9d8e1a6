//! Customer profile and rewards.

use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// What the storefront shows about the signed-in customer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub name: String,
    /// Loyalty balance in points.
    #[serde(default)]
    pub reward_points: Decimal,
}

impl CustomerProfile {
    pub fn new(name: impl Into<String>, reward_points: Decimal) -> Self {
        Self {
            name: name.into(),
            reward_points,
        }
    }

    pub fn has_reward_points(&self) -> bool {
        self.reward_points > Decimal::ZERO
    }
}

/// The customer's rewards converted to a currency amount.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRewards {
    /// Points balance, when the backend reports it.
    pub reward_points: Option<Decimal>,
    /// Discount the points are worth at checkout.
    pub reward_amount: Money,
}

impl CustomerRewards {
    pub fn new(reward_amount: Money) -> Self {
        Self {
            reward_points: None,
            reward_amount,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_wire_format() {
        let profile: CustomerProfile =
            serde_json::from_str(r#"{"name":"Mei Ling","rewardPoints":120}"#).unwrap();
        assert_eq!(profile.name, "Mei Ling");
        assert_eq!(profile.reward_points, Decimal::from(120));
        assert!(profile.has_reward_points());
    }

    #[test]
    fn test_missing_points_default_to_zero() {
        let profile: CustomerProfile = serde_json::from_str(r#"{"name":"Ahmad"}"#).unwrap();
        assert!(!profile.has_reward_points());
    }
}
