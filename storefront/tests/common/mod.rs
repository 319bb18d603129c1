//! Shared helpers for storefront integration tests.

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose};
use chrono::{DateTime, TimeZone, Utc};
use serde_json::json;
use std::sync::Arc;
use storefront::Storefront;
use storefront::config::{LoyaltySettings, Settings};
use storefront::flash_sale::FlashSaleSettings;
use storefront_core::config::{BackendSettings, TelemetrySettings};
use storefront_core::{InMemorySessionStore, Session, SessionStore};
use wiremock::MockServer;

pub const FUTURE_EXP: i64 = 4_102_444_800;

pub fn jwt(sub: &str, role: &str) -> String {
    let payload = json!({ "sub": sub, "exp": FUTURE_EXP, "role": role });
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.sig",
        general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Mid-January 2026, inside every test voucher window.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

pub fn settings_for(server: &MockServer) -> Settings {
    Settings {
        backend: BackendSettings::new(server.uri()),
        loyalty: LoyaltySettings {
            point_value: 10_000,
        },
        flash_sale: FlashSaleSettings::default(),
        telemetry: TelemetrySettings::default(),
        credentials: None,
    }
}

pub fn anonymous_store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::new())
}

pub fn signed_in_store(access_token: &str) -> Arc<InMemorySessionStore> {
    let store = anonymous_store();
    store.set(
        Session::from_tokens(access_token.to_string(), "refresh-1".to_string())
            .expect("test token must decode"),
    );
    store
}

pub fn storefront_for(server: &MockServer, store: Arc<InMemorySessionStore>) -> Storefront {
    Storefront::new(&settings_for(server), store).expect("storefront must build")
}
