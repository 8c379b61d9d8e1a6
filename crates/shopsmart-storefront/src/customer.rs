//! Per-session cache of customer details.

use futures::future::try_join;
use shopsmart_auth::Session;
use shopsmart_commerce::customer::{CustomerProfile, CustomerRewards};
use shopsmart_data::CustomerService;
use tracing::debug;

use crate::error::StorefrontError;

/// Customer profile and rewards, fetched once and kept until invalidated.
#[derive(Debug, Clone, Default)]
pub struct CustomerCache {
    profile: Option<CustomerProfile>,
    rewards: Option<CustomerRewards>,
}

impl CustomerCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch profile and rewards unless both are cached.
    ///
    /// Returns whether a fetch happened.
    pub async fn load(
        &mut self,
        service: &dyn CustomerService,
        session: &Session,
    ) -> Result<bool, StorefrontError> {
        if self.is_loaded() {
            return Ok(false);
        }

        let user_id = session.customer_id()?;
        let token = session.request_token()?;
        let (profile, rewards) =
            try_join(service.profile(user_id, &token), service.rewards(user_id, &token)).await?;

        debug!(user_id = %user_id, reward_amount = %rewards.reward_amount, "customer details cached");
        self.profile = Some(profile);
        self.rewards = Some(rewards);
        Ok(true)
    }

    pub fn is_loaded(&self) -> bool {
        self.profile.is_some() && self.rewards.is_some()
    }

    pub fn profile(&self) -> Option<&CustomerProfile> {
        self.profile.as_ref()
    }

    pub fn rewards(&self) -> Option<&CustomerRewards> {
        self.rewards.as_ref()
    }

    /// Drop cached details; the next `load` fetches again.
    pub fn invalidate(&mut self) {
        self.profile = None;
        self.rewards = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeBackend;
    use shopsmart_auth::UserType;
    use shopsmart_commerce::UserId;

    #[tokio::test]
    async fn test_fetches_once_until_invalidated() {
        let backend = FakeBackend::with_customer();
        let session = Session::establish(UserId::new("u-1"), UserType::Customer);
        let mut cache = CustomerCache::new();

        assert!(cache.load(backend.as_ref(), &session).await.unwrap());
        assert!(!cache.load(backend.as_ref(), &session).await.unwrap());
        assert_eq!(backend.call_count("profile"), 1);
        assert_eq!(backend.call_count("rewards"), 1);
        assert_eq!(cache.profile().unwrap().name, "Mei Ling");

        cache.invalidate();
        assert!(cache.load(backend.as_ref(), &session).await.unwrap());
        assert_eq!(backend.call_count("profile"), 2);
    }

    #[tokio::test]
    async fn test_admin_session_refused() {
        let backend = FakeBackend::with_customer();
        let session = Session::establish(UserId::new("a-1"), UserType::Admin);
        let mut cache = CustomerCache::new();

        let err = cache.load(backend.as_ref(), &session).await.unwrap_err();
        assert!(matches!(err, StorefrontError::Auth(_)));
        assert_eq!(backend.call_count("profile"), 0);
    }

    #[tokio::test]
    async fn test_failed_fetch_caches_nothing() {
        let backend = FakeBackend::with_customer();
        backend.fail("rewards");
        let session = Session::establish(UserId::new("u-1"), UserType::Customer);
        let mut cache = CustomerCache::new();

        assert!(cache.load(backend.as_ref(), &session).await.is_err());
        assert!(!cache.is_loaded());
    }
}
