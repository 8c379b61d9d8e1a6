//! Merchant administration for signed-in admins.
//!
//! The local merchant list only changes after the backend confirms a
//! mutation. Form problems come back as validation errors for inline
//! display; backend failures are also toasted.

use std::sync::Arc;

use shopsmart_auth::{Session, UserType};
use shopsmart_commerce::merchant::{FormMode, Merchant, MerchantDirectory, MerchantForm};
use shopsmart_commerce::MerchantId;
use shopsmart_data::{CancellationToken, FetchError};
use tracing::{info, warn};

use crate::error::StorefrontError;
use crate::messages::{
    GENERIC_FAILURE, MERCHANT_BAD_DATA, MERCHANT_BLOCKED, MERCHANT_CREATED, MERCHANT_DELETED,
    MERCHANT_UNBLOCKED, MERCHANT_UPDATED,
};
use crate::notify::{Notifier, Route, Toast};
use crate::services::Services;

pub struct AdminConsole {
    services: Services,
    notifier: Arc<dyn Notifier>,
    session: Session,
    directory: MerchantDirectory,
}

impl AdminConsole {
    pub fn new(services: Services, notifier: Arc<dyn Notifier>, session: Session) -> Self {
        Self {
            services,
            notifier,
            session,
            directory: MerchantDirectory::default(),
        }
    }

    pub fn directory(&self) -> &MerchantDirectory {
        &self.directory
    }

    fn admin_token(&self) -> Result<CancellationToken, StorefrontError> {
        self.session.require(UserType::Admin)?;
        Ok(self.session.request_token()?)
    }

    /// Fetch the full merchant list.
    pub async fn load_merchants(&mut self) -> Result<&MerchantDirectory, StorefrontError> {
        let token = self.admin_token()?;
        match self.services.merchants.list(&token).await {
            Ok(merchants) => {
                info!(count = merchants.len(), "merchants loaded");
                self.directory.replace(merchants);
                Ok(&self.directory)
            }
            Err(err) => Err(self.report(err, "list merchants")),
        }
    }

    /// Fetch one merchant, e.g. to prefill the update form.
    pub async fn get(&self, merchant_id: &MerchantId) -> Result<Merchant, StorefrontError> {
        let token = self.admin_token()?;
        self.services
            .merchants
            .get(merchant_id, &token)
            .await
            .map_err(|err| self.report(err, "get merchant"))
    }

    pub async fn edit_form(&self, merchant_id: &MerchantId) -> Result<MerchantForm, StorefrontError> {
        Ok(MerchantForm::from_merchant(&self.get(merchant_id).await?))
    }

    /// Validate the form and create a merchant.
    pub async fn create(&mut self, form: &MerchantForm) -> Result<(), StorefrontError> {
        let merchant = form.to_merchant(FormMode::Create, None)?;
        let token = self.admin_token()?;

        if let Err(err) = self.services.merchants.create(&merchant, &token).await {
            warn!(error = %err, "create merchant failed");
            self.notifier.toast(Toast::error(save_failure_message(&err)));
            return Err(err.into());
        }

        info!(name = %merchant.name, "merchant created");
        self.notifier.toast(Toast::success("Success", MERCHANT_CREATED));
        self.notifier.navigate(Route::Admin);
        Ok(())
    }

    /// Validate the form and update an existing merchant.
    ///
    /// The blacklisted flag is not editable here. It is carried over from
    /// the listed record, or from a fresh fetch when the merchant has not
    /// been listed.
    pub async fn update(
        &mut self,
        merchant_id: &MerchantId,
        form: &MerchantForm,
    ) -> Result<(), StorefrontError> {
        let mut merchant = form.to_merchant(FormMode::Update, Some(merchant_id.clone()))?;
        let token = self.admin_token()?;
        merchant.blacklisted = match self.directory.get(merchant_id) {
            Some(listed) => listed.blacklisted,
            None => self.get(merchant_id).await?.blacklisted,
        };

        if let Err(err) = self
            .services
            .merchants
            .update(merchant_id, &merchant, &token)
            .await
        {
            warn!(merchant_id = %merchant_id, error = %err, "update merchant failed");
            self.notifier.toast(Toast::error(save_failure_message(&err)));
            return Err(err.into());
        }

        info!(merchant_id = %merchant_id, "merchant updated");
        self.directory.upsert(merchant);
        self.notifier.toast(Toast::success("Updated", MERCHANT_UPDATED));
        self.notifier.navigate(Route::Admin);
        Ok(())
    }

    pub async fn blacklist(&mut self, merchant_id: &MerchantId) -> Result<(), StorefrontError> {
        let token = self.admin_token()?;
        self.services
            .merchants
            .blacklist(merchant_id, &token)
            .await
            .map_err(|err| self.report(err, "blacklist merchant"))?;

        self.directory.set_blacklisted(merchant_id, true);
        info!(merchant_id = %merchant_id, "merchant blacklisted");
        self.notifier.toast(Toast::success("Blocked", MERCHANT_BLOCKED));
        Ok(())
    }

    pub async fn unblacklist(&mut self, merchant_id: &MerchantId) -> Result<(), StorefrontError> {
        let token = self.admin_token()?;
        self.services
            .merchants
            .unblacklist(merchant_id, &token)
            .await
            .map_err(|err| self.report(err, "unblacklist merchant"))?;

        self.directory.set_blacklisted(merchant_id, false);
        info!(merchant_id = %merchant_id, "merchant unblacklisted");
        self.notifier.toast(Toast::info("Unblocked", MERCHANT_UNBLOCKED));
        Ok(())
    }

    pub async fn delete(&mut self, merchant_id: &MerchantId) -> Result<(), StorefrontError> {
        let token = self.admin_token()?;
        self.services
            .merchants
            .delete(merchant_id, &token)
            .await
            .map_err(|err| self.report(err, "delete merchant"))?;

        self.directory.remove(merchant_id);
        info!(merchant_id = %merchant_id, "merchant deleted");
        self.notifier.toast(Toast::success("Deleted", MERCHANT_DELETED));
        Ok(())
    }

    fn report(&self, err: FetchError, action: &str) -> StorefrontError {
        warn!(action, error = %err, "merchant request failed");
        let err = StorefrontError::from(err);
        self.notifier.toast(Toast::error(err.user_message()));
        err
    }
}

/// A 500 on save means the backend rejected the submitted data.
fn save_failure_message(err: &FetchError) -> &'static str {
    match err.status() {
        Some(500) => MERCHANT_BAD_DATA,
        _ => GENERIC_FAILURE,
    }
}
