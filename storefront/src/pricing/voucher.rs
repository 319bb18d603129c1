use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use super::Amount;
use crate::models::{Voucher, VoucherKind};

/// Why a voucher gives no discount. Shown to the customer next to the code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum VoucherRejection {
    #[error("voucher is not active until {starts_at}")]
    NotStarted { starts_at: DateTime<Utc> },

    #[error("voucher expired at {ends_at}")]
    Expired { ends_at: DateTime<Utc> },

    #[error("voucher has been fully redeemed")]
    OutOfStock,

    #[error("order subtotal must be at least {required} to use this voucher")]
    BelowMinimumOrder { required: Amount },

    /// The backend refused the code outright.
    #[error("voucher not accepted: {message}")]
    NotAccepted { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoucherOutcome {
    pub discount: Amount,
    pub rejection: Option<VoucherRejection>,
}

impl VoucherOutcome {
    pub fn none() -> Self {
        Self {
            discount: 0,
            rejection: None,
        }
    }

    fn rejected(rejection: VoucherRejection) -> Self {
        Self {
            discount: 0,
            rejection: Some(rejection),
        }
    }
}

/// Checks the validity window (inclusive at both ends), remaining quantity
/// and minimum order value.
pub fn check_voucher(
    subtotal: Amount,
    voucher: &Voucher,
    now: DateTime<Utc>,
) -> Result<(), VoucherRejection> {
    if now < voucher.starts_at {
        return Err(VoucherRejection::NotStarted {
            starts_at: voucher.starts_at,
        });
    }
    if now > voucher.ends_at {
        return Err(VoucherRejection::Expired {
            ends_at: voucher.ends_at,
        });
    }
    if voucher.remaining == 0 {
        return Err(VoucherRejection::OutOfStock);
    }
    if subtotal < voucher.min_order_value {
        return Err(VoucherRejection::BelowMinimumOrder {
            required: voucher.min_order_value,
        });
    }
    Ok(())
}

/// Discount for a voucher already known to be usable.
///
/// Percent discounts are floored, then capped by `max_discount`; every result
/// is clamped to the subtotal.
pub fn voucher_discount(subtotal: Amount, voucher: &Voucher) -> Amount {
    let raw = match voucher.kind {
        VoucherKind::Percent => {
            let percent = u128::from(subtotal) * u128::from(voucher.value) / 100;
            let percent = Amount::try_from(percent).unwrap_or(Amount::MAX);
            match voucher.max_discount {
                Some(cap) => percent.min(cap),
                None => percent,
            }
        }
        VoucherKind::Amount => voucher.value,
    };
    raw.min(subtotal)
}

pub fn apply_voucher(subtotal: Amount, voucher: &Voucher, now: DateTime<Utc>) -> VoucherOutcome {
    match check_voucher(subtotal, voucher, now) {
        Ok(()) => VoucherOutcome {
            discount: voucher_discount(subtotal, voucher),
            rejection: None,
        },
        Err(rejection) => {
            tracing::debug!(code = %voucher.code, reason = %rejection, "Voucher not applicable");
            VoucherOutcome::rejected(rejection)
        }
    }
}
