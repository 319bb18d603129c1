use std::sync::Arc;

use reqwest::{Client, Method};
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{Instrument, debug, info, warn};

use crate::error::ClientError;
use crate::observability::TracedClientExt;
use crate::session::{Session, SessionEvent, SessionStore, TokenPair};

/// Exchanges the refresh token for a new pair.
///
/// Refreshes are serialized behind one gate. A caller that waited on the gate
/// and finds the store already holding a different access token uses that
/// token instead of spending the refresh token a second time.
///
/// The gate and the exchange run on a spawned task, so a caller that is
/// cancelled mid-refresh only stops waiting; the new pair is still stored.
#[derive(Clone)]
pub struct TokenRefresher {
    inner: Arc<RefreshState>,
}

struct RefreshState {
    client: Client,
    endpoint: String,
    store: Arc<dyn SessionStore>,
    gate: Mutex<()>,
}

impl TokenRefresher {
    pub fn new(client: Client, endpoint: String, store: Arc<dyn SessionStore>) -> Self {
        Self {
            inner: Arc::new(RefreshState {
                client,
                endpoint,
                store,
                gate: Mutex::new(()),
            }),
        }
    }

    /// Refreshes the current session unconditionally and returns the new
    /// access token.
    pub async fn refresh(&self, request_id: &str) -> Result<String, ClientError> {
        let state = self.inner.clone();
        let request_id = request_id.to_string();

        join(tokio::spawn(async move {
            let _guard = state.gate.lock().await;

            let Some(session) = state.store.get() else {
                return Err(ClientError::SessionInvalid("no active session".to_string()));
            };
            state.exchange(&session, &request_id).await
        }
        .in_current_span()))
        .await
    }

    /// Returns a usable access token after `stale` was rejected with a 401.
    pub async fn refresh_after(&self, stale: &str, request_id: &str) -> Result<String, ClientError> {
        let state = self.inner.clone();
        let stale = stale.to_string();
        let request_id = request_id.to_string();

        join(tokio::spawn(async move {
            let _guard = state.gate.lock().await;

            match state.store.get() {
                None => Err(ClientError::SessionInvalid(
                    "session ended while waiting for refresh".to_string(),
                )),
                Some(session) if session.access_token() != stale => {
                    debug!(request_id = %request_id, "Access token already refreshed by another request");
                    Ok(session.access_token().to_string())
                }
                Some(session) => state.exchange(&session, &request_id).await,
            }
        }
        .in_current_span()))
        .await
    }

    /// Clears the session and tells observers it is gone.
    pub fn invalidate(&self, reason: &str) {
        self.inner.invalidate(reason);
    }
}

async fn join(
    task: tokio::task::JoinHandle<Result<String, ClientError>>,
) -> Result<String, ClientError> {
    task.await
        .map_err(|e| ClientError::SessionInvalid(format!("refresh task failed: {}", e)))?
}

impl RefreshState {
    fn invalidate(&self, reason: &str) {
        warn!(reason = %reason, "Invalidating session");
        self.store.clear();
        self.store.notify(SessionEvent::Invalidated {
            reason: reason.to_string(),
        });
    }

    async fn exchange(&self, session: &Session, request_id: &str) -> Result<String, ClientError> {
        info!(request_id = %request_id, subject = %session.subject(), "Refreshing access token");

        match self.request_pair(session, request_id).await {
            Ok(pair) => match session.rotate(pair) {
                Ok(next) => {
                    let access_token = next.access_token().to_string();
                    self.store.set(next);
                    self.store.notify(SessionEvent::Refreshed);
                    info!(request_id = %request_id, "Access token refreshed");
                    Ok(access_token)
                }
                Err(e) => {
                    let reason = format!("refresh returned an unreadable token: {}", e);
                    self.invalidate(&reason);
                    Err(ClientError::SessionInvalid(reason))
                }
            },
            Err(reason) => {
                self.invalidate(&reason);
                Err(ClientError::SessionInvalid(reason))
            }
        }
    }

    async fn request_pair(&self, session: &Session, request_id: &str) -> Result<TokenPair, String> {
        let response = self
            .client
            .traced_request(Method::POST, &self.endpoint, request_id)
            .json(&json!({ "refresh_token": session.refresh_token() }))
            .send()
            .await
            .map_err(|e| format!("refresh request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("refresh rejected with status {}", status));
        }

        response
            .json::<TokenPair>()
            .await
            .map_err(|e| format!("refresh response unreadable: {}", e))
    }
}
