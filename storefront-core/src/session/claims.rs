use base64::{Engine as _, engine::general_purpose};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClaimsError {
    #[error("Invalid JWT format")]
    Format,
    #[error("Failed to decode JWT payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("Failed to parse JWT claims: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, alias = "role", deserialize_with = "one_or_many")]
    pub roles: Vec<String>,
}

/// Accepts either `"role": "ADMIN"` or `"roles": ["ADMIN", "STAFF"]`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(role) => vec![role],
        OneOrMany::Many(roles) => roles,
    })
}

/// Decode JWT claims without validation.
///
/// The backend verifies the signature on every call; the client only needs
/// `exp` and roles to derive its own session state.
pub fn decode_claims(token: &str) -> Result<Claims, ClaimsError> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(ClaimsError::Format);
    }

    // Some issuers pad the payload segment.
    let payload = general_purpose::URL_SAFE_NO_PAD.decode(parts[1].trim_end_matches('='))?;

    Ok(serde_json::from_slice(&payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "eyJhbGciOiJIUzI1NiJ9.{}.signature",
            general_purpose::URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_decode_claims() {
        // Payload: {"sub":"user_123","email":"test@example.com","exp":9999999999,"iat":1736500000,"jti":"abc123"}
        let token = "eyJhbGciOiJSUzI1NiIsInR5cCI6IkpXVCJ9.eyJzdWIiOiJ1c2VyXzEyMyIsImVtYWlsIjoidGVzdEBleGFtcGxlLmNvbSIsImV4cCI6OTk5OTk5OTk5OSwiaWF0IjoxNzM2NTAwMDAwLCJqdGkiOiJhYmMxMjMifQ.signature";

        let claims = decode_claims(token).unwrap();
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.email.as_deref(), Some("test@example.com"));
        assert_eq!(claims.exp, 9999999999);
        assert_eq!(claims.iat, Some(1736500000));
        assert!(claims.roles.is_empty());
    }

    #[test]
    fn test_single_role_claim() {
        let claims = decode_claims(&token_with(r#"{"sub":"1","exp":10,"role":"ADMIN"}"#)).unwrap();
        assert_eq!(claims.roles, vec!["ADMIN".to_string()]);
    }

    #[test]
    fn test_role_list_claim() {
        let claims =
            decode_claims(&token_with(r#"{"sub":"1","exp":10,"roles":["STAFF","USER"]}"#)).unwrap();
        assert_eq!(claims.roles, vec!["STAFF".to_string(), "USER".to_string()]);
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert!(matches!(decode_claims("not-a-jwt"), Err(ClaimsError::Format)));
        assert!(matches!(
            decode_claims("a.!!!.c"),
            Err(ClaimsError::Base64(_))
        ));
        assert!(matches!(
            decode_claims(&token_with(r#"{"sub":"1"}"#)),
            Err(ClaimsError::Json(_))
        ));
    }
}
