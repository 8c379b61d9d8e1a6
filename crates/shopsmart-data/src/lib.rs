//! REST client for the ShopSmart backends.
//!
//! This crate provides:
//! - `ApiClient` - reqwest client with per-service timeout and cancellation
//! - `ServiceTag` - which backend a request targets, and its default timeout
//! - `ApiConfig` / `TimeoutConfig` - addresses and timeout overrides
//! - `Endpoints` - route construction with encoded path segments
//! - Service traits and `RestBackend`, their HTTP implementation

mod client;
mod config;
mod endpoints;
mod error;
mod rest;
mod service;
mod services;
mod timeout;
pub mod wire;

pub use client::*;
pub use config::*;
pub use endpoints::*;
pub use error::*;
pub use rest::*;
pub use service::*;
pub use services::*;
pub use timeout::*;

/// Re-exported so callers need not depend on tokio-util directly.
pub use tokio_util::sync::CancellationToken;
