use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError};

use crate::models::{Product, ProductPage};

/// Read-only product catalog. Public, so requests go out without credentials.
#[derive(Clone)]
pub struct CatalogClient {
    api: Arc<ApiClient>,
}

impl CatalogClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn products(&self, page: u32, page_size: u32) -> Result<ProductPage, ClientError> {
        self.api
            .send_json(
                ApiRequest::get("/products")
                    .anonymous()
                    .query("page", page)
                    .query("page_size", page_size),
            )
            .await
    }

    pub async fn product(&self, product_id: &str) -> Result<Product, ClientError> {
        self.api
            .send_json(ApiRequest::get(format!("/products/{}", product_id)).anonymous())
            .await
    }
}
