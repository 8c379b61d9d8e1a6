//! Storefront domain types and logic for ShopSmart.
//!
//! This crate holds the rules the storefront applies before and after
//! talking to the backend:
//!
//! - **Cart**: lines, subtotal, reward discount toggle, cart summary
//! - **Checkout**: submission state machine and request
//! - **Catalog**: categories, product details, search filter
//! - **Merchant**: merchant records, admin list, form validation
//!
//! # Example
//!
//! ```rust
//! use shopsmart_commerce::prelude::*;
//!
//! let mut cart = Cart::new(Currency::SGD);
//! cart.add_line(CartLine::new(ProductId::new("p-1"), "Kaya", 2, Money::from_minor(1000, Currency::SGD)).unwrap())
//!     .unwrap();
//! cart.add_line(CartLine::new(ProductId::new("p-2"), "Kopi", 1, Money::from_minor(550, Currency::SGD)).unwrap())
//!     .unwrap();
//!
//! let mut rewards = RewardDiscount::new();
//! rewards.set_reward_amount(Money::from_minor(500, Currency::SGD)).unwrap();
//! rewards.set_enabled(true);
//!
//! let summary = cart.summarize(&rewards, false).unwrap();
//! assert_eq!(summary.total.display(), "S$20.50");
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod validation;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod merchant;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money};
    pub use crate::validation::{FieldError, ValidationErrors};

    // Cart
    pub use crate::cart::{Cart, CartLine, CartSummary, RewardDiscount};

    // Catalog
    pub use crate::catalog::{
        category_options, Category, CategoryOption, ProductDetails, ProductSearch,
        ProductSummary,
    };

    // Checkout
    pub use crate::checkout::{Checkout, CheckoutRequest, CheckoutState};

    // Customer
    pub use crate::customer::{CustomerProfile, CustomerRewards};

    // Merchant
    pub use crate::merchant::{FormMode, Merchant, MerchantDirectory, MerchantForm};
}
