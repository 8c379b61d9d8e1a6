//! Category list and product search for the customer's products view.

use std::sync::Arc;

use shopsmart_auth::Session;
use shopsmart_commerce::catalog::{category_options, CategoryOption, ProductSearch, ProductSummary};
use shopsmart_data::Endpoints;
use tracing::{debug, warn};

use crate::error::StorefrontError;
use crate::notify::{Notifier, Route, Toast};
use crate::services::Services;

pub struct CatalogBrowser {
    services: Services,
    notifier: Arc<dyn Notifier>,
    session: Session,
    endpoints: Endpoints,
}

impl CatalogBrowser {
    pub fn new(
        services: Services,
        notifier: Arc<dyn Notifier>,
        session: Session,
        endpoints: Endpoints,
    ) -> Self {
        Self {
            services,
            notifier,
            session,
            endpoints,
        }
    }

    /// Category choices for the filter, "All" first.
    pub async fn category_options(&self) -> Result<Vec<CategoryOption>, StorefrontError> {
        let token = self.session.request_token()?;
        let categories = self.services.catalog.categories(&token).await?;
        debug!(count = categories.len(), "categories loaded");
        Ok(category_options(&categories))
    }

    /// Validate a filter and switch the products view to it.
    ///
    /// Invalid filters are returned to the caller without navigating.
    pub fn apply_filter(&self, search: &ProductSearch) -> Result<Route, StorefrontError> {
        search.validate()?;
        let route = Route::Products {
            query: self.endpoints.products_view_query(search),
        };
        self.notifier.navigate(route.clone());
        Ok(route)
    }

    /// Run a validated filter against the product service.
    pub async fn search(
        &self,
        search: &ProductSearch,
    ) -> Result<Vec<ProductSummary>, StorefrontError> {
        search.validate()?;
        let token = self.session.request_token()?;
        match self.services.catalog.search_products(search, &token).await {
            Ok(products) => {
                debug!(count = products.len(), "product search finished");
                Ok(products)
            }
            Err(err) => {
                warn!(error = %err, "product search failed");
                let err = StorefrontError::from(err);
                self.notifier.toast(Toast::error(err.user_message()));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeBackend, RecordingNotifier};
    use shopsmart_auth::UserType;
    use shopsmart_commerce::catalog::Category;
    use shopsmart_commerce::{CategoryId, UserId};
    use shopsmart_data::ApiConfig;

    fn browser(backend: &Arc<FakeBackend>) -> (CatalogBrowser, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::default());
        let mut config = ApiConfig::new("http://central.test");
        config.product_base_url = "http://products.test".to_string();
        let browser = CatalogBrowser::new(
            Services::from_backend(backend.clone()),
            notifier.clone(),
            Session::establish(UserId::new("u-1"), UserType::Customer),
            Endpoints::from_config(&config).unwrap(),
        );
        (browser, notifier)
    }

    #[tokio::test]
    async fn test_category_options_start_with_all() {
        let backend = FakeBackend::new();
        backend.set_categories(vec![Category::new("c-1", "Drinks")]);
        let (browser, _) = browser(&backend);

        let options = browser.category_options().await.unwrap();
        assert_eq!(options.len(), 2);
        assert_eq!(options[0].value, None);
        assert_eq!(options[1].value, Some(CategoryId::new("c-1")));
    }

    #[tokio::test]
    async fn test_invalid_filter_sends_nothing() {
        let backend = FakeBackend::new();
        let (browser, notifier) = browser(&backend);
        let search = ProductSearch::new().with_price_range(Some(10.into()), Some(2.into()));

        assert!(browser.search(&search).await.unwrap_err().is_validation());
        assert!(browser.apply_filter(&search).is_err());
        assert_eq!(backend.call_count("search_products"), 0);
        assert!(notifier.routes().is_empty());
    }

    #[test]
    fn test_apply_filter_navigates() {
        let backend = FakeBackend::new();
        let (browser, notifier) = browser(&backend);

        browser
            .apply_filter(&ProductSearch::new().with_text("milo"))
            .unwrap();
        assert_eq!(
            notifier.routes(),
            vec![Route::Products {
                query: "categoryId=&maxPrice=&minPrice=&pincode=&searchText=milo".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn test_search_failure_toasts() {
        let backend = FakeBackend::new();
        backend.fail("search_products");
        let (browser, notifier) = browser(&backend);

        assert!(browser.search(&ProductSearch::new()).await.is_err());
        assert_eq!(notifier.toasts().len(), 1);
    }
}
