//! User kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which part of the storefront a signed-in user may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[default]
    Customer,
    Merchant,
    Admin,
}

impl UserType {
    /// Get the user type as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "customer",
            UserType::Merchant => "merchant",
            UserType::Admin => "admin",
        }
    }

    /// Landing route after sign-in.
    pub fn home_route(&self) -> &'static str {
        match self {
            UserType::Customer => "/customer",
            UserType::Merchant => "/merchant",
            UserType::Admin => "/admin",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "customer" => Ok(UserType::Customer),
            "merchant" => Ok(UserType::Merchant),
            "admin" => Ok(UserType::Admin),
            other => Err(format!("unknown user type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("Admin".parse::<UserType>(), Ok(UserType::Admin));
        assert!("staff".parse::<UserType>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&UserType::Merchant).unwrap(),
            "\"merchant\""
        );
    }
}
