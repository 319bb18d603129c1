use chrono::{DateTime, Utc};
use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError};
use validator::Validate;

use super::{AuthClient, CartClient, VoucherClient};
use crate::models::{CheckoutRequest, OrderPlacement, PaymentConfirmation};
use crate::pricing::{CheckoutPricing, PricingResult, VoucherRejection};

#[derive(Clone)]
pub struct CheckoutClient {
    api: Arc<ApiClient>,
    auth: AuthClient,
    cart: CartClient,
    vouchers: VoucherClient,
    pricing: CheckoutPricing,
}

impl CheckoutClient {
    pub fn new(api: Arc<ApiClient>, pricing: CheckoutPricing) -> Self {
        Self {
            auth: AuthClient::new(api.clone()),
            cart: CartClient::new(api.clone()),
            vouchers: VoucherClient::new(api.clone()),
            api,
            pricing,
        }
    }

    /// Prices the current cart. A code the backend refuses is reported in
    /// `voucher_rejection` instead of failing the preview.
    pub async fn preview(
        &self,
        voucher_code: Option<&str>,
        use_points: bool,
        now: DateTime<Utc>,
    ) -> Result<PricingResult, ClientError> {
        let cart = self.cart.cart().await?;

        let available_points = if use_points {
            self.auth.profile().await?.points
        } else {
            0
        };

        let mut not_accepted = None;
        let voucher = match voucher_code.map(str::trim).filter(|code| !code.is_empty()) {
            Some(code) => match self.vouchers.validate(code).await {
                Ok(voucher) => Some(voucher),
                Err(ClientError::Rejected { message, .. }) => {
                    tracing::info!(code = %code, "Voucher not accepted: {}", message);
                    not_accepted = Some(VoucherRejection::NotAccepted { message });
                    None
                }
                Err(e) => return Err(e),
            },
            None => None,
        };

        let mut result =
            self.pricing
                .quote(&cart, voucher.as_ref(), available_points, use_points, now);
        if not_accepted.is_some() {
            result.voucher_rejection = not_accepted;
        }

        tracing::debug!(
            subtotal = result.subtotal,
            final_total = result.final_total,
            "Checkout preview computed"
        );

        Ok(result)
    }

    pub async fn place_order(
        &self,
        request: &CheckoutRequest,
    ) -> Result<OrderPlacement, ClientError> {
        request
            .validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let placement: OrderPlacement = self
            .api
            .send_json(ApiRequest::post("/orders/checkout").json(request)?)
            .await?;

        tracing::info!(
            order_id = %placement.order_id,
            total = placement.total,
            redirect = placement.requires_redirect(),
            "Order placed"
        );

        Ok(placement)
    }

    /// Forwards the payment gateway's signed return query untouched so the
    /// backend can verify the signature.
    pub async fn confirm_payment_return(
        &self,
        query: &str,
    ) -> Result<PaymentConfirmation, ClientError> {
        let query = query.trim_start_matches('?');
        if query.is_empty() {
            return Err(ClientError::InvalidRequest(
                "payment return query is empty".to_string(),
            ));
        }

        let confirmation: PaymentConfirmation = self
            .api
            .send_json(ApiRequest::get("/payments/return").raw_query(query))
            .await?;

        if confirmation.success {
            tracing::info!(order_id = %confirmation.order_id, "Payment confirmed");
        } else {
            tracing::warn!(order_id = %confirmation.order_id, "Payment failed");
        }

        Ok(confirmation)
    }
}
