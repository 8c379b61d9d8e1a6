//! Commerce error types.

use thiserror::Error;

use crate::validation::ValidationErrors;

/// Errors that can occur in storefront domain operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommerceError {
    /// Invalid quantity.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Negative or otherwise unusable price.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// Negative reward amount.
    #[error("Invalid reward amount: {0}")]
    InvalidRewardAmount(String),

    /// A checkout submission is already in flight.
    #[error("Checkout already in progress")]
    CheckoutInProgress,

    /// Checkout attempted on an empty cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Currency mismatch.
    #[error("Currency mismatch: expected {expected}, got {got}")]
    CurrencyMismatch { expected: String, got: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Client-side validation failed.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),
}

impl CommerceError {
    /// Check if this error was caught before anything was sent to the backend.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CommerceError::Validation(_)
                | CommerceError::InvalidQuantity(_)
                | CommerceError::InvalidPrice(_)
                | CommerceError::EmptyCart
        )
    }
}

impl From<ValidationErrors> for CommerceError {
    fn from(errors: ValidationErrors) -> Self {
        CommerceError::Validation(errors)
    }
}
