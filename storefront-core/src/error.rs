use reqwest::{Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::session::ClaimsError;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Backend unreachable: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Session invalid: {0}")]
    SessionInvalid(String),

    #[error("Rejected ({status}): {message}")]
    Rejected { status: StatusCode, message: String },

    #[error("Server error ({status}): {message}")]
    Server { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl From<ClaimsError> for ClientError {
    fn from(err: ClaimsError) -> Self {
        ClientError::Decode(err.to_string())
    }
}

impl ClientError {
    /// Errors after which the caller should send the user back to login.
    pub fn is_session_ending(&self) -> bool {
        matches!(self, ClientError::SessionInvalid(_))
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Rejected { status, .. } | ClientError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Passes successful responses through and turns error statuses into
    /// `Rejected` (4xx) or `Server` (5xx), keeping the backend's message.
    pub async fn check(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() || status.is_redirection() || status.is_informational() {
            return Ok(response);
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                tracing::debug!(status = %status, "Failed to read error body: {}", e);
                String::new()
            }
        };
        let message = extract_message(&body);

        if status.is_server_error() {
            tracing::error!(status = %status, message = %message, "Backend server error");
            Err(ClientError::Server { status, message })
        } else {
            tracing::warn!(status = %status, message = %message, "Backend rejected request");
            Err(ClientError::Rejected { status, message })
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "error", alias = "detail")]
    message: String,
}

/// Prefers `message`/`error`/`detail` from a JSON body, else the raw text.
fn extract_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.message,
        Err(_) => body.trim().to_string(),
    }
}
