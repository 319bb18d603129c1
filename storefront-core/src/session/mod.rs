//! Session state: the token pair, claims derived from the access token, and
//! the store that shares it with every outbound request.

pub mod claims;
pub mod store;

pub use claims::{Claims, ClaimsError, decode_claims};
pub use store::{InMemorySessionStore, SessionEvent, SessionStore};

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

/// Token pair as returned by the login and refresh endpoints.
#[derive(Deserialize)]
pub struct TokenPair {
    #[serde(alias = "accessToken")]
    pub access_token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
}

/// Authenticated session. Replaced wholesale on refresh, never mutated.
#[derive(Clone)]
pub struct Session {
    access_token: Secret<String>,
    refresh_token: Secret<String>,
    claims: Claims,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("subject", &self.claims.sub)
            .field("exp", &self.claims.exp)
            .field("roles", &self.claims.roles)
            .finish_non_exhaustive()
    }
}

impl Session {
    pub fn from_tokens(access_token: String, refresh_token: String) -> Result<Self, ClaimsError> {
        let claims = decode_claims(&access_token)?;
        Ok(Self {
            access_token: Secret::new(access_token),
            refresh_token: Secret::new(refresh_token),
            claims,
        })
    }

    /// Builds the session that follows a refresh. A response without a new
    /// refresh token keeps the current one.
    pub fn rotate(&self, pair: TokenPair) -> Result<Self, ClaimsError> {
        let refresh_token = pair
            .refresh_token
            .unwrap_or_else(|| self.refresh_token.expose_secret().clone());
        Self::from_tokens(pair.access_token, refresh_token)
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }

    pub fn refresh_token(&self) -> &str {
        self.refresh_token.expose_secret()
    }

    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    pub fn subject(&self) -> &str {
        &self.claims.sub
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.claims.exp, 0)
    }

    /// True while the access token's `exp` lies after `now`.
    pub fn is_authenticated_at(&self, now: DateTime<Utc>) -> bool {
        self.claims.exp > now.timestamp()
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated_at(Utc::now())
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.claims
            .roles
            .iter()
            .any(|granted| granted.eq_ignore_ascii_case(role))
    }

    pub fn is_admin(&self) -> bool {
        self.has_role("admin")
    }
}
