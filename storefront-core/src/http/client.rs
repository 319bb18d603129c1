use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::refresh::TokenRefresher;
use super::request::{ApiRequest, Credentials};
use crate::config::BackendSettings;
use crate::error::ClientError;
use crate::observability::TracedClientExt;
use crate::session::SessionStore;

/// HTTP client for the storefront backend.
///
/// Attaches the session bearer to every request and recovers from an expired
/// access token with one refresh followed by exactly one retry.
pub struct ApiClient {
    client: Client,
    settings: BackendSettings,
    store: Arc<dyn SessionStore>,
    refresher: TokenRefresher,
}

impl ApiClient {
    pub fn new(settings: BackendSettings, store: Arc<dyn SessionStore>) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(ClientError::Network)?;

        let refresher = TokenRefresher::new(
            client.clone(),
            settings.endpoint(&settings.refresh_path),
            store.clone(),
        );

        Ok(Self {
            client,
            settings,
            store,
            refresher,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.settings.url
    }

    pub fn session_store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Refreshes the session outside of a request, e.g. ahead of checkout.
    pub async fn refresh(&self) -> Result<String, ClientError> {
        let request_id = Uuid::new_v4().to_string();
        self.refresher.refresh(&request_id).await
    }

    /// Sends the request. Any status other than an unrecoverable 401 comes
    /// back unchanged as `Ok(response)`.
    pub async fn send(&self, request: ApiRequest) -> Result<Response, ClientError> {
        match request.cancel.clone() {
            Some(cancel) => {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => {
                        warn!(method = %request.method, path = %request.path, "Request cancelled");
                        Err(ClientError::Cancelled)
                    }
                    result = self.dispatch(&request) => result,
                }
            }
            None => self.dispatch(&request).await,
        }
    }

    /// Sends the request and decodes a successful JSON body. Error statuses
    /// become `Rejected` or `Server`.
    pub async fn send_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let response = ClientError::check(self.send(request).await?).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Like `send_json` for calls whose body the caller does not need.
    pub async fn send_unit(&self, request: ApiRequest) -> Result<(), ClientError> {
        ClientError::check(self.send(request).await?).await?;
        Ok(())
    }

    async fn dispatch(&self, request: &ApiRequest) -> Result<Response, ClientError> {
        let request_id = Uuid::new_v4().to_string();

        // An explicit Authorization header wins over the session default.
        let caller_authorized = request.headers.contains_key(AUTHORIZATION);

        let session_token = match request.credentials {
            Credentials::Session if !caller_authorized => self
                .store
                .get()
                .map(|session| session.access_token().to_string()),
            _ => None,
        };

        let response = self
            .execute(request, session_token.as_deref(), &request_id)
            .await?;

        if response.status() != StatusCode::UNAUTHORIZED {
            return Ok(response);
        }

        // Only the session's own token is ours to refresh.
        let Some(stale) = session_token else {
            return Ok(response);
        };

        info!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            "Access token rejected, refreshing before retry"
        );

        let fresh = self.refresher.refresh_after(&stale, &request_id).await?;
        let retried = self.execute(request, Some(&fresh), &request_id).await?;

        if retried.status() == StatusCode::UNAUTHORIZED {
            let reason = "access token rejected after refresh";
            self.refresher.invalidate(reason);
            return Err(ClientError::SessionInvalid(reason.to_string()));
        }

        debug!(request_id = %request_id, status = %retried.status(), "Retry completed");
        Ok(retried)
    }

    async fn execute(
        &self,
        request: &ApiRequest,
        session_token: Option<&str>,
        request_id: &str,
    ) -> Result<Response, ClientError> {
        let url = self.settings.endpoint(&request.path);

        let mut builder = self
            .client
            .traced_request(request.method.clone(), &url, request_id)
            .headers(request.headers.clone());

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        match (&request.credentials, session_token) {
            (Credentials::Bearer(token), _) => builder = builder.bearer_auth(token),
            (Credentials::Session, Some(token)) => builder = builder.bearer_auth(token),
            _ => {}
        }

        let response = builder.send().await.map_err(|e| {
            warn!(
                request_id = %request_id,
                url = %url,
                timeout = e.is_timeout(),
                "Failed to reach backend: {}",
                e
            );
            ClientError::Network(e)
        })?;

        debug!(
            request_id = %request_id,
            method = %request.method,
            path = %request.path,
            status = %response.status(),
            "Backend responded"
        );

        Ok(response)
    }
}
