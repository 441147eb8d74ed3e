//! Vendor credentials and an explicit access-token cache.
//!
//! Nothing here performs network I/O. The adapter that talks to the token
//! endpoint owns a [`CachedToken`] and asks it for a token before each call.

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::engine::OcrError;

pub const API_KEY_VAR: &str = "BAIDU_OCR_API_KEY";
pub const SECRET_KEY_VAR: &str = "BAIDU_OCR_SECRET_KEY";

/// Tokens are treated as expired this long before the vendor says they are.
pub const EXPIRY_MARGIN_SECS: i64 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiCredentials {
    pub api_key: String,
    pub secret_key: String,
}

impl ApiCredentials {
    pub fn new(api_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret_key: secret_key.into(),
        }
    }

    pub fn from_env() -> Result<Self, OcrError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads both keys through `lookup`; blank values count as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, OcrError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(OcrError::MissingCredentials(name))
        };
        Ok(Self::new(read(API_KEY_VAR)?, read(SECRET_KEY_VAR)?))
    }

    /// Query parameters for the client-credentials token request.
    pub fn token_request_params(&self) -> [(&'static str, &str); 3] {
        [
            ("grant_type", "client_credentials"),
            ("client_id", self.api_key.as_str()),
            ("client_secret", self.secret_key.as_str()),
        ]
    }
}

/// Body of a successful token endpoint response.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

#[derive(Debug, Clone, Default)]
pub struct CachedToken {
    entry: Option<(String, DateTime<Utc>)>,
}

impl CachedToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&mut self, grant: TokenGrant, now: DateTime<Utc>) {
        let expires_at = now + Duration::seconds(grant.expires_in - EXPIRY_MARGIN_SECS);
        self.entry = Some((grant.access_token, expires_at));
    }

    /// The cached token, if it is still valid at `now`.
    pub fn token_at(&self, now: DateTime<Utc>) -> Option<&str> {
        match &self.entry {
            Some((token, expires_at)) if now < *expires_at => Some(token.as_str()),
            _ => None,
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|(_, at)| *at)
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn grant(expires_in: i64) -> TokenGrant {
        TokenGrant {
            access_token: "24.abc".to_string(),
            expires_in,
        }
    }

    #[test]
    fn test_token_expires_early() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let mut cache = CachedToken::new();
        assert!(cache.token_at(now).is_none());

        cache.store(grant(3600), now);
        assert_eq!(cache.token_at(now), Some("24.abc"));
        assert_eq!(cache.token_at(now + Duration::seconds(3299)), Some("24.abc"));
        assert!(cache.token_at(now + Duration::seconds(3300)).is_none());

        cache.clear();
        assert!(cache.expires_at().is_none());
    }

    #[test]
    fn test_short_lived_grant_is_never_valid() {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap();
        let mut cache = CachedToken::new();
        cache.store(grant(120), now);
        assert!(cache.token_at(now).is_none());
    }

    #[test]
    fn test_credentials_from_lookup() {
        let creds = ApiCredentials::from_lookup(|name| match name {
            API_KEY_VAR => Some("key".to_string()),
            SECRET_KEY_VAR => Some("secret".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(creds.token_request_params()[1], ("client_id", "key"));

        let err = ApiCredentials::from_lookup(|name| match name {
            API_KEY_VAR => Some("key".to_string()),
            _ => Some("  ".to_string()),
        })
        .unwrap_err();
        assert!(matches!(err, OcrError::MissingCredentials(SECRET_KEY_VAR)));
    }
}
