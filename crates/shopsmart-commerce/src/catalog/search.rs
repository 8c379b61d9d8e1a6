//! Product search filter.

use crate::error::CommerceError;
use crate::ids::CategoryId;
use crate::validation::ValidationErrors;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Longest pincode the filter accepts. Partial pincodes are allowed.
pub const MAX_PINCODE_LEN: usize = 6;

/// Filter for the products view.
///
/// Serializes to the body of the catalog's filter endpoint; unset fields are
/// left out.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductSearch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_price: Option<Decimal>,
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_text: Option<String>,
}

impl ProductSearch {
    /// Create an empty filter (matches everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text query. Blank text clears it.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        let trimmed = text.trim();
        self.search_text = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Restrict to a category. `None` means "All".
    pub fn with_category(mut self, category_id: Option<CategoryId>) -> Self {
        self.category_id = category_id;
        self
    }

    /// Set the price range. Either bound may be open.
    pub fn with_price_range(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn with_pincode(mut self, pincode: impl Into<String>) -> Self {
        let pincode = pincode.into();
        let trimmed = pincode.trim();
        self.pincode = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    /// Check the filter before it is sent.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let mut errors = ValidationErrors::new();

        if let Some(min) = self.min_price {
            if min.is_sign_negative() {
                errors.add("minPrice", "Minimum price cannot be negative");
            }
        }
        if let Some(max) = self.max_price {
            if max.is_sign_negative() {
                errors.add("maxPrice", "Maximum price cannot be negative");
            }
        }
        if let (Some(min), Some(max)) = (self.min_price, self.max_price) {
            if min > max {
                errors.add("minPrice", "Minimum price cannot exceed maximum price");
            }
        }
        if let Some(pincode) = &self.pincode {
            if pincode.chars().count() > MAX_PINCODE_LEN {
                errors.add(
                    "pincode",
                    format!("Pincode must be at most {MAX_PINCODE_LEN} characters"),
                );
            } else if !pincode.chars().all(|c| c.is_ascii_digit()) {
                errors.add("pincode", "Pincode must contain digits only");
            }
        }

        errors.into_result().map_err(CommerceError::from)
    }

    /// Query-string pairs for the products view route.
    ///
    /// Every key is always present; unset values render as empty strings.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        fn or_empty<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        vec![
            ("categoryId", or_empty(&self.category_id)),
            ("maxPrice", or_empty(&self.max_price)),
            ("minPrice", or_empty(&self.min_price)),
            ("pincode", or_empty(&self.pincode)),
            ("searchText", or_empty(&self.search_text)),
        ]
    }

    /// Check whether any criterion is set.
    pub fn is_empty(&self) -> bool {
        self.category_id.is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
            && self.pincode.is_none()
            && self.search_text.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_builder() {
        let search = ProductSearch::new()
            .with_text("  kopi ")
            .with_category(Some(CategoryId::new("c-1")))
            .with_price_range(Some(dec("1.50")), Some(dec("10")))
            .with_pincode("1190");

        assert_eq!(search.search_text.as_deref(), Some("kopi"));
        assert_eq!(search.pincode.as_deref(), Some("1190"));
        assert!(search.validate().is_ok());
        assert!(!search.is_empty());
    }

    #[test]
    fn test_blank_text_is_unset() {
        let search = ProductSearch::new().with_text("   ").with_pincode("");
        assert!(search.is_empty());
    }

    #[test]
    fn test_min_above_max_rejected() {
        let search = ProductSearch::new().with_price_range(Some(dec("20")), Some(dec("5")));
        match search.validate() {
            Err(CommerceError::Validation(errors)) => assert!(errors.has("minPrice")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_long_pincode_rejected() {
        let search = ProductSearch::new().with_pincode("1234567");
        assert!(search.validate().is_err());
    }

    #[test]
    fn test_query_pairs_render_unset_as_empty() {
        let search = ProductSearch::new().with_text("milo");
        let pairs = search.query_pairs();
        assert_eq!(pairs.len(), 5);
        assert_eq!(pairs[0], ("categoryId", String::new()));
        assert_eq!(pairs[4], ("searchText", "milo".to_string()));
    }

    #[test]
    fn test_body_omits_unset_fields() {
        let search = ProductSearch::new()
            .with_category(Some(CategoryId::new("c-9")))
            .with_price_range(None, Some(dec("12.5")));
        let body = serde_json::to_value(&search).unwrap();
        assert_eq!(body["categoryId"], "c-9");
        assert_eq!(body["maxPrice"], 12.5);
        assert!(body.get("minPrice").is_none());
        assert!(body.get("searchText").is_none());
    }
}
