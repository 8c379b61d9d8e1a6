//! The set of backend services a storefront talks to.

use std::sync::Arc;

use shopsmart_data::{
    CartService, CatalogService, CustomerService, LoginService, MerchantService, OrderService,
};

/// Shared handles to every backend service.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<dyn CatalogService>,
    pub cart: Arc<dyn CartService>,
    pub customer: Arc<dyn CustomerService>,
    pub orders: Arc<dyn OrderService>,
    pub merchants: Arc<dyn MerchantService>,
    pub login: Arc<dyn LoginService>,
}

impl Services {
    /// Use one backend for every service.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: CatalogService
            + CartService
            + CustomerService
            + OrderService
            + MerchantService
            + LoginService
            + 'static,
    {
        Self {
            catalog: backend.clone(),
            cart: backend.clone(),
            customer: backend.clone(),
            orders: backend.clone(),
            merchants: backend.clone(),
            login: backend,
        }
    }
}
