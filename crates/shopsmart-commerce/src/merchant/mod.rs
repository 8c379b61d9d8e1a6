//! Merchant administration types.

mod form;
mod merchant;

pub use form::{FormMode, MerchantForm};
pub use merchant::{Merchant, MerchantDirectory};
