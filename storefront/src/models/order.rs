use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    /// Cash on delivery.
    Cod,
    /// Redirect to the external payment gateway.
    Online,
}

#[derive(Debug, Clone, Serialize, Validate)]
pub struct CheckoutRequest {
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voucher_code: Option<String>,
    pub use_points: bool,
    #[validate(length(min = 1, max = 255))]
    pub shipping_address: String,
    #[validate(length(min = 8, max = 15))]
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 500))]
    pub note: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OrderPlacement {
    #[serde(alias = "orderId")]
    pub order_id: String,
    pub status: String,
    /// Amount the backend will charge.
    #[serde(alias = "totalAmount")]
    pub total: u64,
    /// Present for online payment; the client must send the user there.
    #[serde(default, alias = "paymentUrl")]
    pub payment_url: Option<String>,
}

impl OrderPlacement {
    pub fn requires_redirect(&self) -> bool {
        self.payment_url.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfirmation {
    #[serde(alias = "orderId")]
    pub order_id: String,
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> CheckoutRequest {
        CheckoutRequest {
            payment_method: PaymentMethod::Online,
            voucher_code: None,
            use_points: true,
            shipping_address: "12 Nguyen Hue, District 1".to_string(),
            phone: "0901234567".to_string(),
            note: None,
        }
    }

    #[test]
    fn test_serializes_payment_method() {
        let body = serde_json::to_value(request()).unwrap();
        assert_eq!(body["payment_method"], json!("ONLINE"));
        assert!(body.get("voucher_code").is_none());
    }

    #[test]
    fn test_validation() {
        assert!(request().validate().is_ok());

        let mut missing_address = request();
        missing_address.shipping_address = String::new();
        assert!(missing_address.validate().is_err());

        let mut short_phone = request();
        short_phone.phone = "123".to_string();
        assert!(short_phone.validate().is_err());
    }

    #[test]
    fn test_online_placement_requires_redirect() {
        let placement: OrderPlacement = serde_json::from_value(json!({
            "orderId": "o-1",
            "status": "PENDING_PAYMENT",
            "totalAmount": 400000,
            "paymentUrl": "https://pay.example.com/checkout?token=abc"
        }))
        .unwrap();
        assert!(placement.requires_redirect());

        let cod: OrderPlacement = serde_json::from_value(json!({
            "order_id": "o-2",
            "status": "PENDING",
            "total": 400000
        }))
        .unwrap();
        assert!(!cod.requires_redirect());
    }
}
