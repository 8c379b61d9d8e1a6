//! HTTP implementation of the service traits.

use async_trait::async_trait;
use reqwest::Method;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use shopsmart_commerce::catalog::{Category, ProductDetails, ProductSearch, ProductSummary};
use shopsmart_commerce::checkout::CheckoutRequest;
use shopsmart_commerce::customer::{CustomerProfile, CustomerRewards};
use shopsmart_commerce::merchant::Merchant;
use shopsmart_commerce::{Currency, CustomerId, MerchantId, ProductId, UserId};

use crate::client::ApiClient;
use crate::config::ApiConfig;
use crate::endpoints::Endpoints;
use crate::error::FetchError;
use crate::service::ServiceTag;
use crate::services::{
    CartService, CatalogService, CustomerService, LoginService, MerchantService, OrderService,
};
use crate::wire::{
    CartItemsResponse, DeleteFromCartRequest, GenerateOtpRequest, ProductResponse,
    ProductSummaryResponse, RewardsResponse, VerifyOtpRequest, VerifyOtpResponse,
};

/// Talks to the real backends over REST.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: ApiClient,
    endpoints: Endpoints,
}

impl RestBackend {
    /// Build a backend from config.
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let endpoints = Endpoints::from_config(&config)?;
        let client = ApiClient::new(config)?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn currency(&self) -> Currency {
        self.client.config().currency
    }
}

#[async_trait]
impl CatalogService for RestBackend {
    async fn categories(&self, cancel: &CancellationToken) -> Result<Vec<Category>, FetchError> {
        self.client
            .get_json(self.endpoints.categories()?, ServiceTag::Catalog, cancel)
            .await
    }

    async fn product_details(
        &self,
        merchant_id: &MerchantId,
        product_id: &ProductId,
        cancel: &CancellationToken,
    ) -> Result<ProductDetails, FetchError> {
        let url = self.endpoints.product(merchant_id, product_id)?;
        let product: ProductResponse = self
            .client
            .get_json(url, ServiceTag::Catalog, cancel)
            .await?;
        Ok(product.into_details(self.currency()))
    }

    async fn search_products(
        &self,
        search: &ProductSearch,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProductSummary>, FetchError> {
        let rows: Vec<ProductSummaryResponse> = self
            .client
            .send_json(
                Method::POST,
                self.endpoints.product_filter()?,
                search,
                ServiceTag::Catalog,
                cancel,
            )
            .await?;
        let currency = self.currency();
        debug!(results = rows.len(), "product search");
        Ok(rows.into_iter().map(|r| r.into_summary(currency)).collect())
    }
}

#[async_trait]
impl CartService for RestBackend {
    async fn cart_items(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CartItemsResponse, FetchError> {
        self.client
            .get_json(self.endpoints.cart_items(user_id)?, ServiceTag::Cart, cancel)
            .await
    }

    async fn delete_from_cart(
        &self,
        user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        let body = DeleteFromCartRequest {
            product_id: product_id.clone(),
            quantity,
        };
        self.client
            .send(
                Method::PUT,
                self.endpoints.delete_from_cart(user_id)?,
                Some(&body),
                ServiceTag::Cart,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn empty_cart(
        &self,
        customer_id: &CustomerId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::DELETE,
                self.endpoints.empty_cart(customer_id)?,
                None::<&()>,
                ServiceTag::Cart,
                cancel,
            )
            .await
            .map(drop)
    }
}

#[async_trait]
impl CustomerService for RestBackend {
    async fn profile(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerProfile, FetchError> {
        self.client
            .get_json(self.endpoints.customer(user_id)?, ServiceTag::Customer, cancel)
            .await
    }

    async fn rewards(
        &self,
        user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerRewards, FetchError> {
        let rewards: RewardsResponse = self
            .client
            .get_json(
                self.endpoints.customer_rewards(user_id)?,
                ServiceTag::Customer,
                cancel,
            )
            .await?;
        Ok(rewards.into_rewards(self.currency()))
    }
}

#[async_trait]
impl OrderService for RestBackend {
    async fn create_order(
        &self,
        request: &CheckoutRequest,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        let url = self.endpoints.create_order(
            &request.customer_id,
            request.apply_reward_points,
            request.requires_delivery,
        )?;
        self.client
            .send(Method::PUT, url, None::<&()>, ServiceTag::Order, cancel)
            .await
            .map(drop)
    }
}

#[async_trait]
impl MerchantService for RestBackend {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Merchant>, FetchError> {
        self.client
            .get_json(self.endpoints.merchants(), ServiceTag::Merchant, cancel)
            .await
    }

    async fn get(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<Merchant, FetchError> {
        self.client
            .get_json(
                self.endpoints.merchant(merchant_id)?,
                ServiceTag::Merchant,
                cancel,
            )
            .await
    }

    async fn create(
        &self,
        merchant: &Merchant,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::POST,
                self.endpoints.create_merchant()?,
                Some(merchant),
                ServiceTag::Merchant,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn update(
        &self,
        merchant_id: &MerchantId,
        merchant: &Merchant,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::PUT,
                self.endpoints.update_merchant(merchant_id)?,
                Some(merchant),
                ServiceTag::Merchant,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn blacklist(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::PUT,
                self.endpoints.blacklist_merchant(merchant_id)?,
                None::<&()>,
                ServiceTag::Merchant,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn unblacklist(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::PUT,
                self.endpoints.unblacklist_merchant(merchant_id)?,
                None::<&()>,
                ServiceTag::Merchant,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn delete(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.client
            .send(
                Method::DELETE,
                self.endpoints.delete_merchant(merchant_id)?,
                None::<&()>,
                ServiceTag::Merchant,
                cancel,
            )
            .await
            .map(drop)
    }
}

#[async_trait]
impl LoginService for RestBackend {
    async fn generate_otp(
        &self,
        email: &str,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        let body = GenerateOtpRequest {
            email: email.to_string(),
        };
        self.client
            .send(
                Method::POST,
                self.endpoints.generate_otp()?,
                Some(&body),
                ServiceTag::Login,
                cancel,
            )
            .await
            .map(drop)
    }

    async fn verify_otp(
        &self,
        email: &str,
        otp: &str,
        cancel: &CancellationToken,
    ) -> Result<VerifyOtpResponse, FetchError> {
        let body = VerifyOtpRequest::new(email, otp);
        let bytes = self
            .client
            .send(
                Method::POST,
                self.endpoints.verify_otp()?,
                Some(&body),
                ServiceTag::Login,
                cancel,
            )
            .await?;

        // The login service may answer with plain text; only the status matters then.
        match serde_json::from_slice(&bytes) {
            Ok(response) => Ok(response),
            Err(err) => {
                debug!(error = %err, "verify reply is not JSON, treating as bare success");
                Ok(VerifyOtpResponse::default())
            }
        }
    }
}
