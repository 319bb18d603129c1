use secrecy::{ExposeSecret, Secret};
use serde_json::json;
use std::sync::Arc;
use storefront_core::{ApiClient, ApiRequest, ClientError, Session, SessionEvent, TokenPair};
use validator::Validate;

use crate::models::{LoginRequest, UserProfile};

#[derive(Clone)]
pub struct AuthClient {
    api: Arc<ApiClient>,
}

impl AuthClient {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub fn current_session(&self) -> Option<Arc<Session>> {
        self.api.session_store().get()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_session()
            .is_some_and(|session| session.is_authenticated())
    }

    /// Signs in and replaces whatever session was stored.
    pub async fn login(
        &self,
        email: &str,
        password: &Secret<String>,
    ) -> Result<Arc<Session>, ClientError> {
        let payload = LoginRequest {
            email,
            password: password.expose_secret(),
        };
        payload
            .validate()
            .map_err(|e| ClientError::InvalidRequest(e.to_string()))?;

        let tokens: TokenPair = self
            .api
            .send_json(ApiRequest::post("/auth/login").anonymous().json(&payload)?)
            .await?;

        let refresh_token = tokens
            .refresh_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ClientError::Decode("login response missing refresh token".to_string()))?;
        let session = Session::from_tokens(tokens.access_token, refresh_token)?;
        let subject = session.subject().to_string();

        let store = self.api.session_store();
        store.set(session);
        store.notify(SessionEvent::SignedIn {
            subject: subject.clone(),
        });

        tracing::info!(user_id = %subject, "User logged in successfully");

        store
            .get()
            .ok_or_else(|| ClientError::SessionInvalid("session cleared during login".to_string()))
    }

    /// Revokes the refresh token on the backend when possible; the local
    /// session is cleared regardless of the outcome.
    pub async fn logout(&self) {
        let store = self.api.session_store();

        if let Some(session) = store.get() {
            let request = ApiRequest::post("/auth/logout")
                .json(&json!({ "refresh_token": session.refresh_token() }));

            let outcome = match request {
                Ok(request) => self.api.send_unit(request).await,
                Err(e) => Err(e),
            };

            match outcome {
                Ok(()) => tracing::info!("Token revoked successfully"),
                Err(e) => tracing::error!("Failed to revoke token during logout: {}", e),
            }
        }

        store.clear();
        store.notify(SessionEvent::SignedOut);
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.api.send_json(ApiRequest::get("/users/me")).await
    }
}
