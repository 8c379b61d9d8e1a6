//! Service tagging for outbound requests.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// The backend service a request targets.
///
/// Each tag carries the default timeout for its requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceTag {
    /// Categories, product details and product search.
    Catalog,
    /// Cart contents and cart mutations.
    Cart,
    /// Customer profile and rewards.
    Customer,
    /// Order placement.
    Order,
    /// Merchant administration.
    Merchant,
    /// OTP login.
    Login,
}

impl ServiceTag {
    /// Every tag, in a stable order.
    pub const ALL: [ServiceTag; 6] = [
        Self::Catalog,
        Self::Cart,
        Self::Customer,
        Self::Order,
        Self::Merchant,
        Self::Login,
    ];

    /// Get the default timeout for this service.
    pub fn default_timeout(&self) -> Duration {
        match self {
            Self::Catalog => Duration::from_millis(5_000),
            Self::Cart => Duration::from_millis(5_000),
            Self::Customer => Duration::from_millis(5_000),
            // Order placement touches stock, rewards and delivery.
            Self::Order => Duration::from_millis(15_000),
            Self::Merchant => Duration::from_millis(10_000),
            Self::Login => Duration::from_millis(10_000),
        }
    }

    /// Get the name of this service, as used in config keys and logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Cart => "cart",
            Self::Customer => "customer",
            Self::Order => "order",
            Self::Merchant => "merchant",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for ServiceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ServiceTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown service: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for tag in ServiceTag::ALL {
            assert_eq!(tag.name().parse::<ServiceTag>(), Ok(tag));
        }
        assert!("search".parse::<ServiceTag>().is_err());
    }

    #[test]
    fn test_order_waits_longest() {
        let longest = ServiceTag::ALL
            .iter()
            .max_by_key(|tag| tag.default_timeout())
            .copied();
        assert_eq!(longest, Some(ServiceTag::Order));
    }
}
