use secrecy::Secret;
use serde::Deserialize;
use storefront_core::config::{BackendSettings, TelemetrySettings};

use crate::flash_sale::FlashSaleSettings;

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub backend: BackendSettings,
    #[serde(default)]
    pub loyalty: LoyaltySettings,
    #[serde(default)]
    pub flash_sale: FlashSaleSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
    /// Account the binary signs in with.
    #[serde(default)]
    pub credentials: Option<CredentialSettings>,
}

#[derive(Deserialize, Clone, Debug)]
pub struct LoyaltySettings {
    /// Value of one loyalty point in the smallest currency unit.
    #[serde(default = "default_point_value")]
    pub point_value: u64,
}

fn default_point_value() -> u64 {
    10_000
}

impl Default for LoyaltySettings {
    fn default() -> Self {
        Self {
            point_value: default_point_value(),
        }
    }
}

#[derive(Deserialize, Clone)]
pub struct CredentialSettings {
    pub email: String,
    pub password: Secret<String>,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {}", e))
    })?;

    // Check if we're already in the storefront directory or need to navigate to it
    let configuration_directory = if base_path.ends_with("storefront") {
        base_path.join("config")
    } else {
        base_path.join("storefront").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_optional_sections() {
        let settings: Settings = config::Config::builder()
            .set_override("backend.url", "http://localhost:8080/api")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.backend.timeout_ms, 5000);
        assert_eq!(settings.loyalty.point_value, 10_000);
        assert_eq!(settings.flash_sale.utc_offset_minutes, 420);
        assert_eq!(settings.telemetry.log_level, "info");
        assert!(settings.credentials.is_none());
    }
}
