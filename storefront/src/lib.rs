pub mod config;
pub mod flash_sale;
pub mod models;
pub mod pricing;
pub mod services;

use config::Settings;
use flash_sale::SlotSchedule;
use pricing::CheckoutPricing;
use services::{
    AuthClient, CartClient, CatalogClient, CheckoutClient, FlashSaleClient, VoucherClient,
};
use std::sync::Arc;
use storefront_core::{ApiClient, ClientError, InMemorySessionStore, SessionStore};

/// Service clients sharing one backend connection and one session.
#[derive(Clone)]
pub struct Storefront {
    pub api: Arc<ApiClient>,
    pub auth: AuthClient,
    pub cart: CartClient,
    pub catalog: CatalogClient,
    pub vouchers: VoucherClient,
    pub checkout: CheckoutClient,
    pub flash_sales: FlashSaleClient,
}

impl Storefront {
    pub fn new(settings: &Settings, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let schedule = SlotSchedule::from_settings(&settings.flash_sale)?;
        let pricing = CheckoutPricing::new(settings.loyalty.point_value);
        let api = Arc::new(ApiClient::new(settings.backend.clone(), store)?);

        Ok(Self {
            auth: AuthClient::new(api.clone()),
            cart: CartClient::new(api.clone()),
            catalog: CatalogClient::new(api.clone()),
            vouchers: VoucherClient::new(api.clone()),
            checkout: CheckoutClient::new(api.clone(), pricing),
            flash_sales: FlashSaleClient::new(api.clone(), schedule),
            api,
        })
    }

    /// Builds the clients over a fresh in-memory session.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClientError> {
        Self::new(settings, Arc::new(InMemorySessionStore::new()))
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        self.api.session_store()
    }
}
