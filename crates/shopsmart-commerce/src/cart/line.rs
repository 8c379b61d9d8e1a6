//! Cart line items.

use crate::catalog::ProductDetails;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Maximum quantity a local merge may build up on one line. Backend
/// snapshots are taken as reported.
pub const MAX_QUANTITY_PER_LINE: i64 = 9999;

/// Name shown for a line whose product lookup failed.
pub const UNAVAILABLE_PRODUCT_NAME: &str = "Not available";

/// One product entry with quantity in a customer's in-progress order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Product being purchased.
    pub product_id: ProductId,
    /// Product name (denormalized for display).
    pub product_name: String,
    /// Product image.
    pub image_url: Option<String>,
    /// Quantity, always at least 1.
    pub quantity: i64,
    /// Unit price fetched from the catalog; `None` when the lookup failed.
    pub unit_price: Option<Money>,
}

impl CartLine {
    /// Create a priced line.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        quantity: i64,
        unit_price: Money,
    ) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        if unit_price.is_negative() {
            return Err(CommerceError::InvalidPrice(unit_price.display()));
        }
        Ok(Self {
            product_id,
            product_name: product_name.into(),
            image_url: None,
            quantity,
            unit_price: Some(unit_price),
        })
    }

    /// Create a line from catalog details.
    pub fn from_details(
        product_id: ProductId,
        quantity: i64,
        details: ProductDetails,
    ) -> Result<Self, CommerceError> {
        let mut line = Self::new(product_id, details.product_name, quantity, details.unit_price)?;
        line.image_url = details.image_url;
        Ok(line)
    }

    /// Create a line whose catalog lookup failed.
    ///
    /// The line stays visible so it can still be removed, but it has no
    /// price and adds nothing to the subtotal.
    pub fn unavailable(product_id: ProductId, quantity: i64) -> Result<Self, CommerceError> {
        validate_quantity(quantity)?;
        Ok(Self {
            product_id,
            product_name: UNAVAILABLE_PRODUCT_NAME.to_string(),
            image_url: None,
            quantity,
            unit_price: None,
        })
    }

    /// Set the image URL.
    pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Whether the catalog supplied a price for this line.
    pub fn is_priced(&self) -> bool {
        self.unit_price.is_some()
    }

    /// `unit_price × quantity`, or `None` for an unpriced line.
    pub fn line_total(&self) -> Result<Option<Money>, CommerceError> {
        match &self.unit_price {
            Some(price) => price
                .try_multiply(self.quantity)
                .map(Some)
                .ok_or(CommerceError::Overflow),
            None => Ok(None),
        }
    }
}

pub(crate) fn validate_quantity(quantity: i64) -> Result<(), CommerceError> {
    if quantity <= 0 {
        return Err(CommerceError::InvalidQuantity(quantity));
    }
    Ok(())
}

pub(crate) fn check_line_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_LINE {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_LINE,
        ));
    }
    Ok(())
}
