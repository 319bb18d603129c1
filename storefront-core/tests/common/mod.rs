//! Shared helpers for storefront-core integration tests.

#![allow(dead_code)]

use base64::{Engine as _, engine::general_purpose};
use serde_json::json;
use std::sync::Arc;
use storefront_core::config::BackendSettings;
use storefront_core::{ApiClient, InMemorySessionStore, Session, SessionStore};
use wiremock::MockServer;

pub const REFRESH_PATH: &str = "/auth/refresh-token";

/// Far enough in the future that claims never look expired in tests.
pub const FUTURE_EXP: i64 = 4_102_444_800;

/// Unsigned JWT carrying `sub`, `exp` and a `jti` that makes each token unique.
pub fn jwt(sub: &str, jti: &str) -> String {
    let payload = json!({ "sub": sub, "exp": FUTURE_EXP, "jti": jti, "role": "USER" });
    format!(
        "eyJhbGciOiJIUzI1NiJ9.{}.sig",
        general_purpose::URL_SAFE_NO_PAD.encode(payload.to_string())
    )
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn signed_in_store(access_token: &str, refresh_token: &str) -> Arc<InMemorySessionStore> {
    let store = Arc::new(InMemorySessionStore::new());
    store.set(
        Session::from_tokens(access_token.to_string(), refresh_token.to_string())
            .expect("test token must decode"),
    );
    store
}

pub fn client_for(server: &MockServer, store: Arc<InMemorySessionStore>) -> ApiClient {
    client_with(BackendSettings::new(server.uri()), store)
}

pub fn client_with(settings: BackendSettings, store: Arc<InMemorySessionStore>) -> ApiClient {
    ApiClient::new(settings, store).expect("client must build")
}
