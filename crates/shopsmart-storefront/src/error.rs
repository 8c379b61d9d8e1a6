//! Storefront error type.

use shopsmart_auth::AuthError;
use shopsmart_commerce::CommerceError;
use shopsmart_data::FetchError;
use thiserror::Error;

use crate::messages::GENERIC_FAILURE;

/// Errors surfaced by storefront controllers.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Rejected locally before any request.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// The backend call failed or never completed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Session or login problem.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl StorefrontError {
    /// Check if this was caught client-side and can be fixed by the user
    /// in place.
    pub fn is_validation(&self) -> bool {
        match self {
            StorefrontError::Commerce(err) => err.is_validation(),
            StorefrontError::Auth(err) => err.is_validation(),
            StorefrontError::Fetch(_) => false,
        }
    }

    /// Text suitable for a toast or an inline message.
    pub fn user_message(&self) -> String {
        match self {
            StorefrontError::Commerce(err) => err.to_string(),
            StorefrontError::Auth(err) => err.to_string(),
            StorefrontError::Fetch(_) => GENERIC_FAILURE.to_string(),
        }
    }

    /// HTTP status, when the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            StorefrontError::Fetch(err) => err.status(),
            _ => None,
        }
    }
}
