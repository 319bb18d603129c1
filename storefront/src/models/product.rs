use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: u64,
    #[serde(default, alias = "salePrice")]
    pub sale_price: Option<u64>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default, alias = "imageUrl")]
    pub image_url: Option<String>,
}

impl Product {
    /// Sale price when one applies, else the list price.
    pub fn effective_price(&self) -> u64 {
        match self.sale_price {
            Some(sale) if sale < self.price => sale,
            _ => self.price,
        }
    }
}

/// Product list response with pagination.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductPage {
    pub items: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashSaleItem {
    #[serde(alias = "productId")]
    pub product_id: String,
    pub name: String,
    #[serde(alias = "originalPrice")]
    pub original_price: u64,
    #[serde(alias = "flashPrice")]
    pub flash_price: u64,
    pub quantity: u32,
    #[serde(default)]
    pub sold: u32,
}

impl FlashSaleItem {
    pub fn remaining(&self) -> u32 {
        self.quantity.saturating_sub(self.sold)
    }

    /// Whole-percent discount shown on the badge.
    pub fn discount_percent(&self) -> u64 {
        if self.original_price == 0 || self.flash_price >= self.original_price {
            return 0;
        }
        (self.original_price - self.flash_price) * 100 / self.original_price
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlashSale {
    #[serde(alias = "startTime")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "endTime")]
    pub ends_at: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<FlashSaleItem>,
}
