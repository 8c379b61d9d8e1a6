//! Backend service interfaces.
//!
//! Controllers depend on these traits rather than on HTTP, so tests can swap
//! in in-memory fakes. Every call takes the cancellation token of the
//! session it belongs to.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use shopsmart_commerce::catalog::{Category, ProductDetails, ProductSearch, ProductSummary};
use shopsmart_commerce::checkout::CheckoutRequest;
use shopsmart_commerce::customer::{CustomerProfile, CustomerRewards};
use shopsmart_commerce::merchant::Merchant;
use shopsmart_commerce::{CustomerId, MerchantId, ProductId, UserId};

use crate::error::FetchError;
use crate::wire::{CartItemsResponse, VerifyOtpResponse};

/// Categories, product details and search.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn categories(&self, cancel: &CancellationToken) -> Result<Vec<Category>, FetchError>;

    async fn product_details(
        &self,
        merchant_id: &MerchantId,
        product_id: &ProductId,
        cancel: &CancellationToken,
    ) -> Result<ProductDetails, FetchError>;

    async fn search_products(
        &self,
        search: &ProductSearch,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProductSummary>, FetchError>;
}

/// The server-side cart.
#[async_trait]
pub trait CartService: Send + Sync {
    async fn cart_items(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CartItemsResponse, FetchError>;

    async fn delete_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;

    async fn empty_cart(
        &self,
        customer_id: &CustomerId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;
}

/// Customer profile and rewards.
#[async_trait]
pub trait CustomerService: Send + Sync {
    async fn profile(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerProfile, FetchError>;

    async fn rewards(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerRewards, FetchError>;
}

/// Order placement.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Place an order for the customer's current cart. `Ok` means accepted.
    async fn create_order(
        &self,
        request: &CheckoutRequest,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;
}

/// Merchant administration.
#[async_trait]
pub trait MerchantService: Send + Sync {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Merchant>, FetchError>;

    async fn get(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<Merchant, FetchError>;

    async fn create(&self, merchant: &Merchant, cancel: &CancellationToken)
        -> Result<(), FetchError>;

    async fn update(
        &self,
        merchant_id: &MerchantId,
        merchant: &Merchant,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;

    async fn blacklist(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;

    async fn unblacklist(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;

    async fn delete(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError>;
}

/// Admin OTP login.
#[async_trait]
pub trait LoginService: Send + Sync {
    async fn generate_otp(&self, email: &str, cancel: &CancellationToken)
        -> Result<(), FetchError>;

    async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        cancel: &CancellationToken,
    ) -> Result<VerifyOtpResponse, FetchError>;
}
