//! REST route construction.
//!
//! Identifiers are pushed as path segments, so anything the backend hands
//! out is percent-encoded rather than spliced into the URL.

use reqwest::Url;
use shopsmart_commerce::catalog::ProductSearch;
use shopsmart_commerce::{CustomerId, MerchantId, ProductId, UserId};

use crate::config::ApiConfig;
use crate::error::FetchError;

/// Resolved base URLs and the routes built on them.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
    login_base: Url,
    product_base: Url,
    merchant_list: Url,
}

impl Endpoints {
    /// Parse every base URL from the config.
    pub fn from_config(config: &ApiConfig) -> Result<Self, FetchError> {
        Ok(Self {
            base: parse(&config.base_url)?,
            login_base: parse(&config.login_base_url)?,
            product_base: parse(&config.product_base_url)?,
            merchant_list: parse(&config.merchant_list_url())?,
        })
    }

    pub fn categories(&self) -> Result<Url, FetchError> {
        join(&self.product_base, &["categories"])
    }

    pub fn product_filter(&self) -> Result<Url, FetchError> {
        join(&self.product_base, &["products", "filter"])
    }

    pub fn product(&self, merchant_id: &MerchantId, product_id: &ProductId) -> Result<Url, FetchError> {
        join(
            &self.base,
            &[
                "getProduct",
                merchant_id.as_str(),
                "products",
                product_id.as_str(),
            ],
        )
    }

    pub fn cart_items(&self, user_id: &UserId) -> Result<Url, FetchError> {
        join(&self.base, &["getCartItems", user_id.as_str()])
    }

    pub fn delete_from_cart(&self, user_id: &UserId) -> Result<Url, FetchError> {
        join(&self.base, &["deleteFromCart", user_id.as_str()])
    }

    pub fn empty_cart(&self, customer_id: &CustomerId) -> Result<Url, FetchError> {
        join(&self.base, &["emptyCartItems", customer_id.as_str()])
    }

    pub fn customer(&self, user_id: &UserId) -> Result<Url, FetchError> {
        join(&self.base, &["getCustomer", user_id.as_str()])
    }

    pub fn customer_rewards(&self, user_id: &UserId) -> Result<Url, FetchError> {
        join(&self.base, &["getCustomer", user_id.as_str(), "rewards"])
    }

    /// `PUT /createOrder/{customerId}/rewards/{bool}/delivery/{bool}`
    pub fn create_order(
        &self,
        customer_id: &CustomerId,
        apply_reward_points: bool,
        requires_delivery: bool,
    ) -> Result<Url, FetchError> {
        join(
            &self.base,
            &[
                "createOrder",
                customer_id.as_str(),
                "rewards",
                bool_segment(apply_reward_points),
                "delivery",
                bool_segment(requires_delivery),
            ],
        )
    }

    pub fn merchants(&self) -> Url {
        self.merchant_list.clone()
    }

    pub fn create_merchant(&self) -> Result<Url, FetchError> {
        join(&self.base, &["createMerchant"])
    }

    pub fn update_merchant(&self, merchant_id: &MerchantId) -> Result<Url, FetchError> {
        join(&self.base, &["updateMerchant", merchant_id.as_str()])
    }

    pub fn merchant(&self, merchant_id: &MerchantId) -> Result<Url, FetchError> {
        join(&self.base, &["getMerchant", merchant_id.as_str()])
    }

    pub fn blacklist_merchant(&self, merchant_id: &MerchantId) -> Result<Url, FetchError> {
        join(&self.base, &["blacklistMerchant", merchant_id.as_str()])
    }

    pub fn unblacklist_merchant(&self, merchant_id: &MerchantId) -> Result<Url, FetchError> {
        join(&self.base, &["unblacklistMerchant", merchant_id.as_str()])
    }

    pub fn delete_merchant(&self, merchant_id: &MerchantId) -> Result<Url, FetchError> {
        join(&self.base, &["deleteMerchant", merchant_id.as_str()])
    }

    pub fn generate_otp(&self) -> Result<Url, FetchError> {
        join(
            &self.login_base,
            &["profile", "login", "generateOtp", "admin"],
        )
    }

    pub fn verify_otp(&self) -> Result<Url, FetchError> {
        join(&self.login_base, &["profile", "login", "verifyOtp", "admin"])
    }

    /// Encoded query string for the products view, e.g. `categoryId=&maxPrice=10&...`.
    pub fn products_view_query(&self, search: &ProductSearch) -> String {
        let mut url = self.product_base.clone();
        url.query_pairs_mut()
            .clear()
            .extend_pairs(search.query_pairs());
        url.query().unwrap_or_default().to_string()
    }
}

fn parse(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::InvalidUrl(format!("{raw}: {e}")))
}

/// Append path segments, percent-encoding each one.
///
/// `.` and `..` are refused: the URL parser would drop them and the request
/// would hit a different route.
fn join(base: &Url, segments: &[&str]) -> Result<Url, FetchError> {
    if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(FetchError::InvalidUrl(format!(
            "{base}: path segment {dot:?} not allowed"
        )));
    }
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn bool_segment(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}
