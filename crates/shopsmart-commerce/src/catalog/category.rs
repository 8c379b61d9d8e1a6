//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Label of the catch-all entry at the top of the category picker.
pub const ALL_CATEGORIES_LABEL: &str = "All";

/// A product category as listed by the catalog service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Unique category identifier.
    pub category_id: CategoryId,
    /// Display name.
    pub category_name: String,
}

impl Category {
    pub fn new(category_id: impl Into<CategoryId>, category_name: impl Into<String>) -> Self {
        Self {
            category_id: category_id.into(),
            category_name: category_name.into(),
        }
    }
}

/// One entry of the category picker.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryOption {
    pub label: String,
    /// `None` selects every category.
    pub value: Option<CategoryId>,
}

/// Build picker options: "All" first, then categories in backend order.
pub fn category_options(categories: &[Category]) -> Vec<CategoryOption> {
    std::iter::once(CategoryOption {
        label: ALL_CATEGORIES_LABEL.to_string(),
        value: None,
    })
    .chain(categories.iter().map(|c| CategoryOption {
        label: c.category_name.clone(),
        value: Some(c.category_id.clone()),
    }))
    .collect()
}
