//! The rendering surface, as seen by controllers.
//!
//! Controllers never draw anything. They report outcomes as toasts and ask
//! for view changes as routes; whatever renders implements `Notifier`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Info,
    Warn,
    Error,
}

/// A transient notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub severity: Severity,
    pub summary: String,
    pub detail: String,
}

impl Toast {
    pub fn new(severity: Severity, summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            severity,
            summary: summary.into(),
            detail: detail.into(),
        }
    }

    pub fn success(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Success, summary, detail)
    }

    pub fn info(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Info, summary, detail)
    }

    pub fn warn(summary: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(Severity::Warn, summary, detail)
    }

    /// Error toast with the conventional "Error" summary.
    pub fn error(detail: impl Into<String>) -> Self {
        Self::new(Severity::Error, "Error", detail)
    }
}

/// Views a controller can send the user to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Order confirmation / order history.
    CustomerOrders,
    /// Admin merchant list.
    Admin,
    /// Products view with a rendered filter query.
    Products { query: String },
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::CustomerOrders => "/customer/orders".to_string(),
            Route::Admin => "/admin".to_string(),
            Route::Products { query } if query.is_empty() => "/customer/products".to_string(),
            Route::Products { query } => format!("/customer/products?{query}"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Receives toasts and navigation requests.
pub trait Notifier: Send + Sync {
    fn toast(&self, toast: Toast);

    fn navigate(&self, route: Route);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn toast(&self, _toast: Toast) {}

    fn navigate(&self, _route: Route) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::CustomerOrders.path(), "/customer/orders");
        assert_eq!(
            Route::Products {
                query: "searchText=milo".to_string()
            }
            .to_string(),
            "/customer/products?searchText=milo"
        );
    }
}
