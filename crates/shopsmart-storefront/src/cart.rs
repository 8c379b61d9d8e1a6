//! Cart page controller: refresh, reward toggle, removal, clear and checkout.

use std::sync::Arc;

use futures::future::join_all;
use shopsmart_auth::Session;
use shopsmart_commerce::cart::{Cart, CartLine, CartSummary, RewardDiscount};
use shopsmart_commerce::checkout::{Checkout, CheckoutState};
use shopsmart_commerce::{CommerceError, Currency, ProductId};
use shopsmart_data::wire::CartItemsResponse;
use shopsmart_data::{CancellationToken, FetchError};
use tracing::{debug, info, warn};

use crate::customer::CustomerCache;
use crate::error::StorefrontError;
use crate::messages::{
    CLEAR_CART_FAILED, LOAD_CART_FAILED, ORDER_FAILED, ORDER_PLACED_DETAIL, ORDER_PLACED_SUMMARY,
    REMOVE_ITEM_FAILED,
};
use crate::notify::{Notifier, Route, Toast};
use crate::services::Services;

/// What a checkout call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// The backend accepted the order.
    Placed,
    /// An earlier submission is still unresolved; nothing was sent.
    InProgress,
}

/// Owns the customer's cart view for one session.
pub struct CartController {
    services: Services,
    notifier: Arc<dyn Notifier>,
    session: Session,
    cart: Cart,
    rewards: RewardDiscount,
    requires_delivery: bool,
    checkout: Checkout,
    customer: CustomerCache,
}

impl CartController {
    pub fn new(
        services: Services,
        notifier: Arc<dyn Notifier>,
        session: Session,
        currency: Currency,
    ) -> Self {
        Self {
            services,
            notifier,
            session,
            cart: Cart::new(currency),
            rewards: RewardDiscount::new(),
            requires_delivery: false,
            checkout: Checkout::new(),
            customer: CustomerCache::new(),
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn customer(&self) -> &CustomerCache {
        &self.customer
    }

    pub fn checkout_state(&self) -> &CheckoutState {
        self.checkout.state()
    }

    pub fn uses_reward_points(&self) -> bool {
        self.rewards.is_enabled()
    }

    pub fn requires_delivery(&self) -> bool {
        self.requires_delivery
    }

    /// Fetch customer details (once per session) and pick up the reward amount.
    pub async fn load_customer(&mut self) -> Result<(), StorefrontError> {
        self.customer
            .load(self.services.customer.as_ref(), &self.session)
            .await?;
        if let Some(rewards) = self.customer.rewards() {
            self.rewards.set_reward_amount(rewards.reward_amount)?;
        }
        Ok(())
    }

    /// Replace the local lines with the backend's cart.
    ///
    /// Product details are looked up concurrently. A failed lookup keeps the
    /// line as "Not available" with no price. Every item the backend reports
    /// becomes a line; if one cannot (a non-positive quantity) the refresh
    /// fails. A failed refresh leaves the current lines untouched.
    pub async fn refresh(&mut self) -> Result<(), StorefrontError> {
        let user_id = self.session.customer_id()?.clone();
        let token = self.session.request_token()?;

        let snapshot = match self.services.cart.cart_items(&user_id, &token).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                self.notifier.toast(Toast::error(LOAD_CART_FAILED));
                return Err(err.into());
            }
        };

        let lines = self.resolve_lines(&snapshot, &token).await;
        if token.is_cancelled() {
            return Err(FetchError::Cancelled.into());
        }
        let lines = match lines {
            Ok(lines) => lines,
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "backend cart rejected");
                self.notifier.toast(Toast::error(LOAD_CART_FAILED));
                return Err(err.into());
            }
        };

        self.cart.replace(snapshot.merchant_id, lines)?;
        info!(user_id = %user_id, lines = self.cart.line_count(), "cart refreshed");
        self.settle_abandoned_checkout()?;
        Ok(())
    }

    async fn resolve_lines(
        &self,
        snapshot: &CartItemsResponse,
        token: &CancellationToken,
    ) -> Result<Vec<CartLine>, CommerceError> {
        let catalog = self.services.catalog.as_ref();
        let lookups = snapshot.cart_items.iter().map(|item| async move {
            let details = match &snapshot.merchant_id {
                Some(merchant_id) => catalog
                    .product_details(merchant_id, &item.product_id, token)
                    .await
                    .map_err(|err| {
                        warn!(product_id = %item.product_id, error = %err, "product lookup failed");
                    })
                    .ok(),
                None => None,
            };
            (item, details)
        });

        join_all(lookups)
            .await
            .into_iter()
            .map(|(item, details)| {
                let priced = details.and_then(|d| {
                    CartLine::from_details(item.product_id.clone(), item.quantity, d)
                        .map_err(|err| {
                            warn!(product_id = %item.product_id, error = %err, "unusable product details");
                        })
                        .ok()
                });
                match priced {
                    Some(line) => Ok(line),
                    None => CartLine::unavailable(item.product_id.clone(), item.quantity),
                }
            })
            .collect()
    }

    /// Resolve a submission whose future was dropped before the backend
    /// answered. The server cart tells us what happened: the backend empties
    /// it when it accepts an order.
    fn settle_abandoned_checkout(&mut self) -> Result<(), CommerceError> {
        if !self.checkout.is_submitting() {
            return Ok(());
        }
        if self.cart.is_empty() {
            info!("abandoned checkout was accepted by the backend");
            self.checkout.succeed()?;
            self.rewards.reset();
            self.customer.invalidate();
        } else {
            warn!("abandoned checkout was not accepted by the backend");
            self.checkout.fail(ORDER_FAILED)?;
        }
        Ok(())
    }

    /// Current pricing for the lines and toggles.
    pub fn summary(&self) -> Result<CartSummary, StorefrontError> {
        Ok(self.cart.summarize(&self.rewards, self.requires_delivery)?)
    }

    /// Apply or remove the reward discount.
    pub fn set_use_reward_points(&mut self, enabled: bool) -> Result<CartSummary, StorefrontError> {
        if self.rewards.set_enabled(enabled) {
            debug!(enabled, "reward points toggled");
        }
        self.summary()
    }

    pub fn toggle_reward_points(&mut self) -> Result<CartSummary, StorefrontError> {
        let enabled = !self.rewards.is_enabled();
        self.set_use_reward_points(enabled)
    }

    pub fn set_requires_delivery(&mut self, requires_delivery: bool) -> Result<CartSummary, StorefrontError> {
        self.requires_delivery = requires_delivery;
        self.summary()
    }

    /// Place an order for the current cart.
    ///
    /// While a submission is unresolved this does nothing and sends nothing.
    /// On acceptance the cart and discount state are cleared and the user is
    /// sent to their orders. On failure the cart is kept.
    pub async fn checkout(&mut self) -> Result<CheckoutOutcome, StorefrontError> {
        if self.checkout.is_submitting() {
            debug!("checkout ignored, submission in progress");
            return Ok(CheckoutOutcome::InProgress);
        }

        let customer_id = self.session.customer_id()?.clone();
        let token = self.session.request_token()?;
        let request =
            self.checkout
                .begin(customer_id, &self.cart, &self.rewards, self.requires_delivery)?;

        match self.services.orders.create_order(&request, &token).await {
            Ok(()) => {
                self.checkout.succeed()?;
                self.cart.clear();
                self.rewards.reset();
                self.customer.invalidate();
                info!(customer_id = %request.customer_id, "order placed");
                self.notifier
                    .toast(Toast::success(ORDER_PLACED_SUMMARY, ORDER_PLACED_DETAIL));
                self.notifier.navigate(Route::CustomerOrders);
                Ok(CheckoutOutcome::Placed)
            }
            Err(err) => {
                warn!(customer_id = %request.customer_id, error = %err, "order rejected");
                self.checkout.fail(ORDER_FAILED)?;
                self.notifier.toast(Toast::error(ORDER_FAILED));
                Err(err.into())
            }
        }
    }

    /// Remove every line for a product once the backend confirms.
    ///
    /// Returns false, without contacting the backend, when the product is
    /// not in the cart.
    pub async fn remove_product(&mut self, product_id: &ProductId) -> Result<bool, StorefrontError> {
        let Some(line) = self.cart.line_for(product_id) else {
            debug!(product_id = %product_id, "remove ignored, not in cart");
            return Ok(false);
        };
        let quantity = line.quantity;

        if self.checkout.is_submitting() {
            return Err(CommerceError::CheckoutInProgress.into());
        }

        let user_id = self.session.customer_id()?.clone();
        let token = self.session.request_token()?;
        match self
            .services
            .cart
            .delete_from_cart(&user_id, product_id, quantity, &token)
            .await
        {
            Ok(()) => {
                self.cart.remove_product(product_id);
                debug!(product_id = %product_id, "cart line removed");
                Ok(true)
            }
            Err(err) => {
                self.notifier.toast(Toast::error(REMOVE_ITEM_FAILED));
                Err(err.into())
            }
        }
    }

    /// Empty the cart once the backend confirms.
    pub async fn clear(&mut self) -> Result<(), StorefrontError> {
        if self.checkout.is_submitting() {
            return Err(CommerceError::CheckoutInProgress.into());
        }

        let customer_id = self.session.customer_id()?.clone();
        let token = self.session.request_token()?;
        match self.services.cart.empty_cart(&customer_id, &token).await {
            Ok(()) => {
                self.cart.clear();
                debug!("cart cleared");
                Ok(())
            }
            Err(err) => {
                self.notifier.toast(Toast::error(CLEAR_CART_FAILED));
                Err(err.into())
            }
        }
    }

    /// End the session: cancel in-flight requests and drop customer data.
    pub fn end_session(&mut self) {
        self.session.teardown();
        self.customer.invalidate();
        self.rewards.reset();
        self.cart.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;
    use crate::testing::{FakeBackend, RecordingNotifier};
    use shopsmart_auth::UserType;
    use shopsmart_commerce::cart::UNAVAILABLE_PRODUCT_NAME;
    use shopsmart_commerce::{CustomerId, Money, UserId};
    use std::time::Duration;

    fn sgd(minor: i64) -> Money {
        Money::from_minor(minor, Currency::SGD)
    }

    fn controller(backend: &Arc<FakeBackend>) -> (CartController, Arc<RecordingNotifier>, Session) {
        let notifier = Arc::new(RecordingNotifier::default());
        let session = Session::establish(UserId::new("u-1"), UserType::Customer);
        let controller = CartController::new(
            Services::from_backend(backend.clone()),
            notifier.clone(),
            session.clone(),
            Currency::SGD,
        );
        (controller, notifier, session)
    }

    async fn loaded(backend: &Arc<FakeBackend>) -> (CartController, Arc<RecordingNotifier>, Session) {
        let (mut controller, notifier, session) = controller(backend);
        controller.refresh().await.unwrap();
        controller.load_customer().await.unwrap();
        (controller, notifier, session)
    }

    #[tokio::test]
    async fn test_refresh_prices_lines() {
        let backend = FakeBackend::with_cart();
        let (controller, _, _) = loaded(&backend).await;

        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(controller.summary().unwrap().subtotal, sgd(2550));
        assert_eq!(backend.call_count("product_details"), 2);
    }

    #[tokio::test]
    async fn test_failed_lookup_degrades_line() {
        let backend = FakeBackend::with_cart();
        backend.forget_product("p-2");
        let (controller, _, _) = loaded(&backend).await;

        let line = controller.cart().line_for(&ProductId::new("p-2")).unwrap();
        assert_eq!(line.product_name, UNAVAILABLE_PRODUCT_NAME);
        assert_eq!(controller.summary().unwrap().subtotal, sgd(2000));
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_lines() {
        let backend = FakeBackend::with_cart();
        let (mut controller, notifier, _) = loaded(&backend).await;

        backend.fail("cart_items");
        assert!(controller.refresh().await.is_err());
        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(notifier.last_toast().unwrap().detail, LOAD_CART_FAILED);
    }

    #[tokio::test]
    async fn test_refresh_keeps_bulk_quantities() {
        let backend = FakeBackend::with_cart();
        backend.set_cart_items(&[("p-1", 10_000), ("p-2", 1)]);
        let (mut controller, _, _) = loaded(&backend).await;

        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(controller.summary().unwrap().subtotal, sgd(10_000_550));

        assert!(controller.remove_product(&ProductId::new("p-1")).await.unwrap());
        assert_eq!(backend.call_count("delete_from_cart"), 1);
        assert_eq!(backend.deletions(), vec![(ProductId::new("p-1"), 10_000)]);
    }

    #[tokio::test]
    async fn test_invalid_backend_item_fails_refresh() {
        let backend = FakeBackend::with_cart();
        let (mut controller, notifier, _) = loaded(&backend).await;

        backend.set_cart_items(&[("p-1", 0), ("p-2", 1)]);
        let err = controller.refresh().await.unwrap_err();

        assert!(matches!(err, StorefrontError::Commerce(CommerceError::InvalidQuantity(0))));
        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(controller.summary().unwrap().subtotal, sgd(2550));
        assert_eq!(notifier.last_toast().unwrap().detail, LOAD_CART_FAILED);
    }

    #[tokio::test]
    async fn test_reward_toggle_has_no_drift() {
        let backend = FakeBackend::with_cart();
        let (mut controller, _, _) = loaded(&backend).await;

        for _ in 0..5 {
            let on = controller.set_use_reward_points(true).unwrap();
            assert_eq!(on.total, sgd(2050));
            assert_eq!(on.total.display(), "S$20.50");
            let off = controller.set_use_reward_points(false).unwrap();
            assert_eq!(off.total, sgd(2550));
        }
        assert_eq!(controller.toggle_reward_points().unwrap().total, sgd(2050));
        assert!(controller.uses_reward_points());
    }

    #[tokio::test]
    async fn test_checkout_success() {
        let backend = FakeBackend::with_cart();
        let (mut controller, notifier, _) = loaded(&backend).await;
        controller.set_use_reward_points(true).unwrap();
        controller.set_requires_delivery(true).unwrap();

        let outcome = controller.checkout().await.unwrap();

        assert_eq!(outcome, CheckoutOutcome::Placed);
        assert_eq!(controller.checkout_state(), &CheckoutState::Succeeded);
        assert!(controller.cart().is_empty());
        assert!(!controller.uses_reward_points());
        assert!(!controller.customer().is_loaded());
        assert_eq!(
            backend.orders(),
            vec![shopsmart_commerce::checkout::CheckoutRequest::new(
                CustomerId::new("u-1"),
                true,
                true
            )]
        );
        let toast = notifier.last_toast().unwrap();
        assert_eq!(toast.severity, Severity::Success);
        assert_eq!(toast.summary, ORDER_PLACED_SUMMARY);
        assert_eq!(notifier.routes(), vec![Route::CustomerOrders]);
    }

    #[tokio::test]
    async fn test_checkout_rejection_keeps_cart() {
        let backend = FakeBackend::with_cart();
        backend.fail("create_order");
        let (mut controller, notifier, _) = loaded(&backend).await;

        let err = controller.checkout().await.unwrap_err();

        assert!(matches!(err, StorefrontError::Fetch(_)));
        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(
            controller.checkout_state(),
            &CheckoutState::Failed {
                message: ORDER_FAILED.to_string()
            }
        );
        assert_eq!(notifier.last_toast().unwrap().detail, ORDER_FAILED);
        assert!(notifier.routes().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_sends_nothing() {
        let backend = FakeBackend::with_customer();
        let (mut controller, _, _) = loaded(&backend).await;

        let err = controller.checkout().await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.call_count("create_order"), 0);
        assert_eq!(controller.checkout_state(), &CheckoutState::Idle);
    }

    #[tokio::test]
    async fn test_checkout_while_submitting_sends_nothing() {
        let backend = FakeBackend::with_cart();
        backend.hang("create_order");
        let (mut controller, _, _) = loaded(&backend).await;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), controller.checkout()).await;
        assert!(abandoned.is_err());
        assert_eq!(controller.checkout_state(), &CheckoutState::Submitting);

        let second = controller.checkout().await.unwrap();
        assert_eq!(second, CheckoutOutcome::InProgress);
        assert_eq!(backend.call_count("create_order"), 1);

        // Clearing is refused too while the outcome is unknown.
        assert!(controller.clear().await.is_err());
        assert_eq!(backend.call_count("empty_cart"), 0);
    }

    #[tokio::test]
    async fn test_refresh_settles_abandoned_checkout() {
        let backend = FakeBackend::with_cart();
        backend.hang("create_order");
        let (mut controller, _, _) = loaded(&backend).await;
        let _ = tokio::time::timeout(Duration::from_millis(20), controller.checkout()).await;

        backend.set_cart_items(&[]);
        controller.refresh().await.unwrap();

        assert_eq!(controller.checkout_state(), &CheckoutState::Succeeded);
        assert!(controller.cart().is_empty());
    }

    #[tokio::test]
    async fn test_teardown_cancels_pending_checkout() {
        let backend = FakeBackend::with_cart();
        backend.hang("create_order");
        let (mut controller, _, session) = loaded(&backend).await;

        let (result, _) = tokio::join!(controller.checkout(), async {
            tokio::time::sleep(Duration::from_millis(20)).await;
            session.teardown();
        });

        match result {
            Err(StorefrontError::Fetch(err)) => assert!(err.is_cancelled()),
            other => panic!("expected cancellation, got {other:?}"),
        }
        assert_eq!(controller.cart().line_count(), 2);
        assert!(matches!(
            controller.checkout_state(),
            CheckoutState::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn test_remove_missing_product_is_noop() {
        let backend = FakeBackend::with_cart();
        let (mut controller, notifier, _) = loaded(&backend).await;
        let before = controller.cart().clone();

        let removed = controller
            .remove_product(&ProductId::new("nope"))
            .await
            .unwrap();

        assert!(!removed);
        assert_eq!(controller.cart(), &before);
        assert_eq!(backend.call_count("delete_from_cart"), 0);
        assert!(notifier.toasts().is_empty());
    }

    #[tokio::test]
    async fn test_remove_after_confirmation() {
        let backend = FakeBackend::with_cart();
        let (mut controller, _, _) = loaded(&backend).await;

        assert!(controller
            .remove_product(&ProductId::new("p-1"))
            .await
            .unwrap());

        assert!(!controller.cart().contains(&ProductId::new("p-1")));
        assert_eq!(backend.deletions(), vec![(ProductId::new("p-1"), 2)]);
        assert_eq!(controller.summary().unwrap().subtotal, sgd(550));
    }

    #[tokio::test]
    async fn test_remove_failure_keeps_line() {
        let backend = FakeBackend::with_cart();
        backend.fail("delete_from_cart");
        let (mut controller, notifier, _) = loaded(&backend).await;

        assert!(controller
            .remove_product(&ProductId::new("p-1"))
            .await
            .is_err());

        assert!(controller.cart().contains(&ProductId::new("p-1")));
        assert_eq!(notifier.last_toast().unwrap().detail, REMOVE_ITEM_FAILED);
    }

    #[tokio::test]
    async fn test_clear() {
        let backend = FakeBackend::with_cart();
        backend.fail("empty_cart");
        let (mut controller, notifier, _) = loaded(&backend).await;

        assert!(controller.clear().await.is_err());
        assert_eq!(controller.cart().line_count(), 2);
        assert_eq!(notifier.last_toast().unwrap().detail, CLEAR_CART_FAILED);

        backend.recover("empty_cart");
        controller.clear().await.unwrap();
        assert!(controller.cart().is_empty());
    }

    #[tokio::test]
    async fn test_end_session() {
        let backend = FakeBackend::with_cart();
        let (mut controller, _, _) = loaded(&backend).await;

        controller.end_session();

        assert!(controller.cart().is_empty());
        assert!(!controller.customer().is_loaded());
        assert!(matches!(
            controller.refresh().await,
            Err(StorefrontError::Auth(_))
        ));
    }
}
