use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherKind {
    /// `value` is a percentage of the subtotal.
    #[serde(alias = "PERCENT", alias = "percentage")]
    Percent,
    /// `value` is a fixed amount in the smallest currency unit.
    #[serde(alias = "AMOUNT", alias = "fixed")]
    Amount,
}

/// Voucher as returned by the validation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voucher {
    pub code: String,
    #[serde(rename = "type")]
    pub kind: VoucherKind,
    pub value: u64,
    #[serde(alias = "startDate")]
    pub starts_at: DateTime<Utc>,
    #[serde(alias = "endDate")]
    pub ends_at: DateTime<Utc>,
    /// Redemptions left.
    #[serde(alias = "quantity")]
    pub remaining: u32,
    #[serde(default, alias = "minOrderValue")]
    pub min_order_value: u64,
    /// Upper bound for percent vouchers.
    #[serde(default, alias = "maxDiscount")]
    pub max_discount: Option<u64>,
}
