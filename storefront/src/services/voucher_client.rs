use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError};

use crate::models::Voucher;

#[derive(Clone)]
pub struct VoucherClient {
    api: Arc<ApiClient>,
}

impl VoucherClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    /// Looks the code up. Unknown codes come back as `Rejected`; window,
    /// quantity and minimum-order checks happen in pricing.
    pub async fn validate(&self, code: &str) -> Result<Voucher, ClientError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(ClientError::InvalidRequest("voucher code is empty".to_string()));
        }

        self.api
            .send_json(ApiRequest::get("/vouchers/validate").query("code", code))
            .await
    }
}
