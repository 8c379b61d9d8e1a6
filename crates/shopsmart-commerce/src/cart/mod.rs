//! Shopping cart module.
//!
//! Contains the cart aggregator, line items, the derived pricing summary and
//! the reward discount toggle.

mod cart;
mod line;
mod pricing;
mod rewards;

pub use cart::Cart;
pub use line::{CartLine, MAX_QUANTITY_PER_LINE, UNAVAILABLE_PRODUCT_NAME};
pub use pricing::CartSummary;
pub use rewards::RewardDiscount;
