//! Storefront controllers for ShopSmart.
//!
//! Each controller owns the state behind one part of the storefront and
//! talks to the backend through the service traits in `shopsmart-data`:
//!
//! - `CartController` - cart refresh, reward toggle, line removal, clear, checkout
//! - `CustomerCache` - profile and rewards, fetched once per session
//! - `CatalogBrowser` - category options and product search
//! - `AdminConsole` - merchant administration
//! - `AdminLogin` - OTP sign-in for admins
//!
//! Outcomes reach the user through a `Notifier`.

mod admin;
mod cart;
mod catalog;
mod customer;
mod error;
pub mod messages;
mod login;
mod notify;
mod services;

#[cfg(test)]
mod testing;

pub use admin::AdminConsole;
pub use cart::{CartController, CheckoutOutcome};
pub use catalog::CatalogBrowser;
pub use customer::CustomerCache;
pub use error::StorefrontError;
pub use login::AdminLogin;
pub use notify::{Notifier, NullNotifier, Route, Severity, Toast};
pub use services::Services;
