//! Product catalog module.
//!
//! Contains categories, product details used to price cart lines, and the
//! product search filter.

mod category;
mod product;
mod search;

pub use category::{category_options, Category, CategoryOption, ALL_CATEGORIES_LABEL};
pub use product::{ProductDetails, ProductSummary};
pub use search::{ProductSearch, MAX_PINCODE_LEN};
