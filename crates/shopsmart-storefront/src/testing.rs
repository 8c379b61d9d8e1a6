//! In-memory backend and notifier for controller tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use shopsmart_commerce::catalog::{Category, ProductDetails, ProductSearch, ProductSummary};
use shopsmart_commerce::checkout::CheckoutRequest;
use shopsmart_commerce::customer::{CustomerProfile, CustomerRewards};
use shopsmart_commerce::merchant::Merchant;
use shopsmart_commerce::{Currency, CustomerId, MerchantId, Money, ProductId, UserId};
use shopsmart_data::wire::{CartItem, CartItemsResponse, VerifyOtpResponse};
use shopsmart_data::{
    CancellationToken, CartService, CatalogService, CustomerService, FetchError, LoginService,
    MerchantService, OrderService,
};

use crate::notify::{Notifier, Route, Toast};

#[derive(Default)]
struct FakeState {
    cart: CartItemsResponse,
    products: HashMap<ProductId, ProductDetails>,
    profile: Option<CustomerProfile>,
    rewards: Option<CustomerRewards>,
    categories: Vec<Category>,
    products_found: Vec<ProductSummary>,
    merchants: Vec<Merchant>,
    verified_user: Option<UserId>,
    failures: HashMap<&'static str, u16>,
    hanging: HashSet<&'static str>,
    calls: Vec<&'static str>,
    orders: Vec<CheckoutRequest>,
    deletions: Vec<(ProductId, i64)>,
    created: Vec<Merchant>,
    updated: Vec<Merchant>,
    otp_emails: Vec<String>,
}

/// Backend double implementing every service trait.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
}

fn sgd(minor: i64) -> Money {
    Money::from_minor(minor, Currency::SGD)
}

impl FakeBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A customer with S$5.00 of rewards and an empty cart.
    pub fn with_customer() -> Arc<Self> {
        let backend = Self::new();
        {
            let mut state = backend.state.lock().unwrap();
            state.profile = Some(CustomerProfile::new("Mei Ling", 500.into()));
            state.rewards = Some(CustomerRewards::new(sgd(500)));
        }
        backend
    }

    /// The customer plus a cart of 2 x S$10.00 and 1 x S$5.50.
    pub fn with_cart() -> Arc<Self> {
        let backend = Self::with_customer();
        {
            let mut state = backend.state.lock().unwrap();
            state.products.insert(
                ProductId::new("p-1"),
                ProductDetails {
                    product_name: "Kaya Jar".to_string(),
                    unit_price: sgd(1000),
                    image_url: None,
                },
            );
            state.products.insert(
                ProductId::new("p-2"),
                ProductDetails {
                    product_name: "Kopi Beans".to_string(),
                    unit_price: sgd(550),
                    image_url: Some("https://img.test/kopi.png".to_string()),
                },
            );
        }
        backend.set_cart_items(&[("p-1", 2), ("p-2", 1)]);
        backend
    }

    pub fn set_cart_items(&self, items: &[(&str, i64)]) {
        let mut state = self.state.lock().unwrap();
        state.cart = CartItemsResponse {
            merchant_id: Some(MerchantId::new("m-1")),
            cart_items: items
                .iter()
                .map(|(id, quantity)| CartItem {
                    product_id: ProductId::new(*id),
                    quantity: *quantity,
                })
                .collect(),
        };
    }

    /// Make product lookups for `id` fail.
    pub fn forget_product(&self, id: &str) {
        self.state.lock().unwrap().products.remove(&ProductId::new(id));
    }

    pub fn set_categories(&self, categories: Vec<Category>) {
        self.state.lock().unwrap().categories = categories;
    }

    pub fn set_merchants(&self, merchants: Vec<Merchant>) {
        self.state.lock().unwrap().merchants = merchants;
    }

    pub fn set_verified_user(&self, user_id: Option<UserId>) {
        self.state.lock().unwrap().verified_user = user_id;
    }

    /// Fail every call to `op` with HTTP 503.
    pub fn fail(&self, op: &'static str) {
        self.fail_with(op, 503);
    }

    pub fn fail_with(&self, op: &'static str, status: u16) {
        self.state.lock().unwrap().failures.insert(op, status);
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().unwrap().failures.remove(op);
    }

    /// Never answer `op`; the call ends only when its token is cancelled.
    pub fn hang(&self, op: &'static str) {
        self.state.lock().unwrap().hanging.insert(op);
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| **c == op)
            .count()
    }

    pub fn orders(&self) -> Vec<CheckoutRequest> {
        self.state.lock().unwrap().orders.clone()
    }

    pub fn deletions(&self) -> Vec<(ProductId, i64)> {
        self.state.lock().unwrap().deletions.clone()
    }

    pub fn created(&self) -> Vec<Merchant> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn updated(&self) -> Vec<Merchant> {
        self.state.lock().unwrap().updated.clone()
    }

    pub fn otp_emails(&self) -> Vec<String> {
        self.state.lock().unwrap().otp_emails.clone()
    }

    async fn enter(&self, op: &'static str, token: &CancellationToken) -> Result<(), FetchError> {
        let (failure, hanging) = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(op);
            (state.failures.get(op).copied(), state.hanging.contains(op))
        };
        if hanging {
            token.cancelled().await;
            return Err(FetchError::Cancelled);
        }
        if token.is_cancelled() {
            return Err(FetchError::Cancelled);
        }
        match failure {
            Some(status) => Err(FetchError::Http {
                status,
                url: format!("fake://{op}"),
            }),
            None => Ok(()),
        }
    }

    fn not_found(op: &str) -> FetchError {
        FetchError::Http {
            status: 404,
            url: format!("fake://{op}"),
        }
    }
}

#[async_trait]
impl CatalogService for FakeBackend {
    async fn categories(&self, cancel: &CancellationToken) -> Result<Vec<Category>, FetchError> {
        self.enter("categories", cancel).await?;
        Ok(self.state.lock().unwrap().categories.clone())
    }

    async fn product_details(
        &self,
        _merchant_id: &MerchantId,
        product_id: &ProductId,
        cancel: &CancellationToken,
    ) -> Result<ProductDetails, FetchError> {
        self.enter("product_details", cancel).await?;
        self.state
            .lock()
            .unwrap()
            .products
            .get(product_id)
            .cloned()
            .ok_or_else(|| Self::not_found("product_details"))
    }

    async fn search_products(
        &self,
        _search: &ProductSearch,
        cancel: &CancellationToken,
    ) -> Result<Vec<ProductSummary>, FetchError> {
        self.enter("search_products", cancel).await?;
        Ok(self.state.lock().unwrap().products_found.clone())
    }
}

#[async_trait]
impl CartService for FakeBackend {
    async fn cart_items(
        &self,
        _user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CartItemsResponse, FetchError> {
        self.enter("cart_items", cancel).await?;
        Ok(self.state.lock().unwrap().cart.clone())
    }

    async fn delete_from_cart(
        &self,
        _user_id: &UserId,
        product_id: &ProductId,
        quantity: i64,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("delete_from_cart", cancel).await?;
        let mut state = self.state.lock().unwrap();
        state.cart.cart_items.retain(|i| &i.product_id != product_id);
        state.deletions.push((product_id.clone(), quantity));
        Ok(())
    }

    async fn empty_cart(
        &self,
        _customer_id: &CustomerId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("empty_cart", cancel).await?;
        self.state.lock().unwrap().cart.cart_items.clear();
        Ok(())
    }
}

#[async_trait]
impl CustomerService for FakeBackend {
    async fn profile(
        &self,
        _user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerProfile, FetchError> {
        self.enter("profile", cancel).await?;
        self.state
            .lock()
            .unwrap()
            .profile
            .clone()
            .ok_or_else(|| Self::not_found("profile"))
    }

    async fn rewards(
        &self,
        _user_id: &UserId,
        cancel: &CancellationToken,
    ) -> Result<CustomerRewards, FetchError> {
        self.enter("rewards", cancel).await?;
        self.state
            .lock()
            .unwrap()
            .rewards
            .ok_or_else(|| Self::not_found("rewards"))
    }
}

#[async_trait]
impl OrderService for FakeBackend {
    async fn create_order(
        &self,
        request: &CheckoutRequest,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("create_order", cancel).await?;
        let mut state = self.state.lock().unwrap();
        state.orders.push(request.clone());
        state.cart.cart_items.clear();
        Ok(())
    }
}

#[async_trait]
impl MerchantService for FakeBackend {
    async fn list(&self, cancel: &CancellationToken) -> Result<Vec<Merchant>, FetchError> {
        self.enter("list_merchants", cancel).await?;
        Ok(self.state.lock().unwrap().merchants.clone())
    }

    async fn get(
        &self,
        merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<Merchant, FetchError> {
        self.enter("get_merchant", cancel).await?;
        self.state
            .lock()
            .unwrap()
            .merchants
            .iter()
            .find(|m| m.merchant_id.as_ref() == Some(merchant_id))
            .cloned()
            .ok_or_else(|| Self::not_found("get_merchant"))
    }

    async fn create(
        &self,
        merchant: &Merchant,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("create_merchant", cancel).await?;
        self.state.lock().unwrap().created.push(merchant.clone());
        Ok(())
    }

    async fn update(
        &self,
        _merchant_id: &MerchantId,
        merchant: &Merchant,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("update_merchant", cancel).await?;
        self.state.lock().unwrap().updated.push(merchant.clone());
        Ok(())
    }

    async fn blacklist(
        &self,
        _merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("blacklist", cancel).await
    }

    async fn unblacklist(
        &self,
        _merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("unblacklist", cancel).await
    }

    async fn delete(
        &self,
        _merchant_id: &MerchantId,
        cancel: &CancellationToken,
    ) -> Result<(), FetchError> {
        self.enter("delete_merchant", cancel).await
    }
}

#[async_trait]
impl LoginService for FakeBackend {
    async fn generate_otp(&self, email: &str, cancel: &CancellationToken) -> Result<(), FetchError> {
        self.enter("generate_otp", cancel).await?;
        self.state.lock().unwrap().otp_emails.push(email.to_string());
        Ok(())
    }

    async fn verify_otp(
        &self,
        _email: &str,
        _otp: &str,
        cancel: &CancellationToken,
    ) -> Result<VerifyOtpResponse, FetchError> {
        self.enter("verify_otp", cancel).await?;
        Ok(VerifyOtpResponse {
            user_id: self.state.lock().unwrap().verified_user.clone(),
            message: None,
        })
    }
}

/// Keeps every toast and navigation for assertions.
#[derive(Default)]
pub(crate) struct RecordingNotifier {
    toasts: Mutex<Vec<Toast>>,
    routes: Mutex<Vec<Route>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap().clone()
    }

    pub fn last_toast(&self) -> Option<Toast> {
        self.toasts.lock().unwrap().last().cloned()
    }

    pub fn routes(&self) -> Vec<Route> {
        self.routes.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn toast(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }

    fn navigate(&self, route: Route) {
        self.routes.lock().unwrap().push(route);
    }
}
