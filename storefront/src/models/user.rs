use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    #[serde(default, alias = "fullName")]
    pub name: Option<String>,
    /// Loyalty points available for checkout.
    #[serde(default, alias = "loyaltyPoints")]
    pub points: u64,
}

impl UserProfile {
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => self.email.split('@').next().unwrap_or("User"),
        }
    }
}

#[derive(Debug, Serialize, Validate)]
pub struct LoginRequest<'a> {
    #[validate(email)]
    pub email: &'a str,
    #[validate(length(min = 1))]
    pub password: &'a str,
}
