//! Checkout pricing preview.
//!
//! Pure functions evaluated in a fixed order: subtotal, voucher discount,
//! points discount, final total. The backend recomputes the charged amount;
//! these numbers are for display only. Money is an integer in the smallest
//! currency unit.

pub mod points;
pub mod voucher;

pub use points::{PointsOutcome, apply_points};
pub use voucher::{VoucherOutcome, VoucherRejection, apply_voucher};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::{CartSnapshot, Voucher};

pub type Amount = u64;

/// Sum of `unit_price * quantity` over all lines; 0 for an empty cart.
pub fn compute_subtotal(cart: &CartSnapshot) -> Amount {
    cart.lines.iter().fold(0, |total: Amount, line| {
        total.saturating_add(line.unit_price.saturating_mul(Amount::from(line.quantity)))
    })
}

/// `max(0, subtotal - voucher_discount - points_discount)`.
pub fn finalize(subtotal: Amount, voucher_discount: Amount, points_discount: Amount) -> Amount {
    subtotal
        .saturating_sub(voucher_discount)
        .saturating_sub(points_discount)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricingResult {
    pub subtotal: Amount,
    pub voucher_discount: Amount,
    pub points_used: u64,
    pub points_discount: Amount,
    pub final_total: Amount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_rejection: Option<VoucherRejection>,
}

#[derive(Debug, Clone, Copy)]
pub struct CheckoutPricing {
    point_value: Amount,
}

impl CheckoutPricing {
    /// `point_value` is what one loyalty point is worth.
    pub fn new(point_value: Amount) -> Self {
        Self { point_value }
    }

    pub fn point_value(&self) -> Amount {
        self.point_value
    }

    /// Points are spent on what is left after the voucher discount.
    pub fn quote(
        &self,
        cart: &CartSnapshot,
        voucher: Option<&Voucher>,
        available_points: u64,
        use_points: bool,
        now: DateTime<Utc>,
    ) -> PricingResult {
        let subtotal = compute_subtotal(cart);

        let voucher_outcome = match voucher {
            Some(voucher) => apply_voucher(subtotal, voucher, now),
            None => VoucherOutcome::none(),
        };

        let points = apply_points(
            subtotal - voucher_outcome.discount,
            available_points,
            self.point_value,
            use_points,
        );

        PricingResult {
            subtotal,
            voucher_discount: voucher_outcome.discount,
            points_used: points.points_used,
            points_discount: points.discount,
            final_total: finalize(subtotal, voucher_outcome.discount, points.discount),
            voucher_rejection: voucher_outcome.rejection,
        }
    }
}
