//! Product types.

use crate::ids::{MerchantId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Catalog details needed to show and price a cart line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDetails {
    /// Product name.
    pub product_name: String,
    /// Current listing price.
    pub unit_price: Money,
    /// Product image.
    pub image_url: Option<String>,
}

/// A product as returned by catalog search.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductSummary {
    pub product_id: ProductId,
    pub product_name: String,
    pub merchant_id: Option<MerchantId>,
    pub listing_price: Money,
    pub image_url: Option<String>,
    pub available_stock: i64,
    pub pincode: Option<String>,
}

impl ProductSummary {
    /// Check if any stock is left.
    pub fn in_stock(&self) -> bool {
        self.available_stock > 0
    }
}
