//! Backend addresses and request timeouts.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use shopsmart_commerce::Currency;

use crate::service::ServiceTag;
use crate::timeout::TimeoutConfig;

/// Default address for every backend when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Where the backends live and how long to wait for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Central service: cart, customer, order and merchant routes.
    pub base_url: String,
    /// OTP login service.
    pub login_base_url: String,
    /// Product service: categories and product search.
    pub product_base_url: String,
    /// Full URL of the merchant list. Defaults to `{base_url}/getAllMerchants`.
    pub merchant_list_url: Option<String>,
    /// Currency prices are quoted in.
    pub currency: Currency,
    /// Connect timeout shared by all services, in milliseconds.
    pub connect_timeout_ms: u64,
    /// Per-service total timeouts in milliseconds, keyed by service name.
    pub timeouts_ms: BTreeMap<String, u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            login_base_url: DEFAULT_BASE_URL.to_string(),
            product_base_url: DEFAULT_BASE_URL.to_string(),
            merchant_list_url: None,
            currency: Currency::SGD,
            connect_timeout_ms: 2_000,
            timeouts_ms: BTreeMap::new(),
        }
    }
}

impl ApiConfig {
    /// Point every service at one address.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            login_base_url: base_url.clone(),
            product_base_url: base_url.clone(),
            base_url,
            ..Self::default()
        }
    }

    /// Override the total timeout for one service.
    pub fn with_timeout(mut self, tag: ServiceTag, timeout: Duration) -> Self {
        self.timeouts_ms
            .insert(tag.name().to_string(), timeout.as_millis() as u64);
        self
    }

    /// Timeouts for a request to `tag`, honoring overrides.
    pub fn timeout_for(&self, tag: ServiceTag) -> TimeoutConfig {
        let total = self
            .timeouts_ms
            .get(tag.name())
            .map(|ms| Duration::from_millis(*ms))
            .unwrap_or_else(|| tag.default_timeout());
        TimeoutConfig::new(Duration::from_millis(self.connect_timeout_ms), total)
    }

    /// Resolved merchant list URL.
    pub fn merchant_list_url(&self) -> String {
        match &self.merchant_list_url {
            Some(url) => url.clone(),
            None => format!("{}/getAllMerchants", self.base_url.trim_end_matches('/')),
        }
    }

    /// Names in `timeouts_ms` that match no service.
    pub fn unknown_timeout_keys(&self) -> Vec<&str> {
        self.timeouts_ms
            .keys()
            .filter(|key| key.parse::<ServiceTag>().is_err())
            .map(String::as_str)
            .collect()
    }
}
