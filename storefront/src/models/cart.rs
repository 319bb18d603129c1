use serde::{Deserialize, Serialize};
use storefront_core::ClientError;
use validator::Validate;

/// One cart line. Prices are in the smallest currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct CartLine {
    #[serde(alias = "productId")]
    #[validate(length(min = 1))]
    pub product_id: String,
    #[serde(alias = "unitPrice", alias = "price")]
    pub unit_price: u64,
    #[validate(range(min = 1))]
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: impl Into<String>, unit_price: u64, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            unit_price,
            quantity,
        }
    }
}

/// Ordered snapshot of the cart at the time it was fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    #[serde(default, alias = "items")]
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn new(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Every line must have a product and a quantity of at least one.
    pub fn validate_lines(&self) -> Result<(), ClientError> {
        for line in &self.lines {
            line.validate().map_err(|e| {
                ClientError::InvalidRequest(format!("cart line {}: {}", line.product_id, e))
            })?;
        }
        Ok(())
    }
}
