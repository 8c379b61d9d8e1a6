//! Checkout request.

use crate::ids::CustomerId;
use serde::{Deserialize, Serialize};

/// Parameters of one order submission.
///
/// Built when the customer presses checkout and discarded once the backend
/// answers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub customer_id: CustomerId,
    pub apply_reward_points: bool,
    pub requires_delivery: bool,
}

impl CheckoutRequest {
    pub fn new(customer_id: CustomerId, apply_reward_points: bool, requires_delivery: bool) -> Self {
        Self {
            customer_id,
            apply_reward_points,
            requires_delivery,
        }
    }
}
