use serde_json::json;
use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError};

use crate::models::CartSnapshot;

/// Every call returns the cart as the backend now holds it, with each line
/// checked before it can reach pricing.
#[derive(Clone)]
pub struct CartClient {
    api: Arc<ApiClient>,
}

impl CartClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn cart(&self) -> Result<CartSnapshot, ClientError> {
        self.fetch(ApiRequest::get("/cart")).await
    }

    pub async fn add_item(&self, product_id: &str, quantity: u32) -> Result<CartSnapshot, ClientError> {
        ensure_quantity(quantity)?;
        let request = ApiRequest::post("/cart/items")
            .json(&json!({ "product_id": product_id, "quantity": quantity }))?;
        self.fetch(request).await
    }

    pub async fn update_quantity(
        &self,
        product_id: &str,
        quantity: u32,
    ) -> Result<CartSnapshot, ClientError> {
        ensure_quantity(quantity)?;
        let request = ApiRequest::put(format!("/cart/items/{}", product_id))
            .json(&json!({ "quantity": quantity }))?;
        self.fetch(request).await
    }

    pub async fn remove_item(&self, product_id: &str) -> Result<CartSnapshot, ClientError> {
        self.fetch(ApiRequest::delete(format!("/cart/items/{}", product_id)))
            .await
    }

    async fn fetch(&self, request: ApiRequest) -> Result<CartSnapshot, ClientError> {
        let cart: CartSnapshot = self.api.send_json(request).await?;
        cart.validate_lines()?;
        Ok(cart)
    }
}

fn ensure_quantity(quantity: u32) -> Result<(), ClientError> {
    if quantity == 0 {
        return Err(ClientError::InvalidRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(())
}
