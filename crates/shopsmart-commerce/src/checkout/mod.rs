//! Checkout module.
//!
//! Contains the submission state machine and the request it produces.

mod request;
mod state;

pub use request::CheckoutRequest;
pub use state::{Checkout, CheckoutState};
