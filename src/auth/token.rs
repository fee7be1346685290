//! Bearer tokens held by the application

use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// A token this close to its expiry is already treated as expired
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

/// Bearer token obtained by one of the grant flows
///
/// Built with [`Token::new`] and the `with_*` / [`expiring_in`](Self::expiring_in)
/// setters; the authorization scheme is always `Bearer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// Value sent in the `Authorization` header
    pub access_token: String,

    /// Refresh token, if the flow issued one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    /// Scopes the token was granted for, in request order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,

    /// Unix seconds; `None` means the lifetime is unknown
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<u64>,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs()
}

impl Token {
    /// Token with no refresh token, no scopes and unknown lifetime
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: None,
            scopes: Vec::new(),
            expires_at: None,
        }
    }

    /// Attach a refresh token
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = Some(refresh_token.into());
        self
    }

    /// Record the granted scopes
    #[must_use]
    pub fn with_scopes<I, S>(mut self, scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes = scopes.into_iter().map(Into::into).collect();
        self
    }

    /// Expire `seconds` from now, clamped to the far future
    #[must_use]
    pub fn expiring_in(mut self, seconds: u64) -> Self {
        self.expires_at = Some(now_secs().saturating_add(seconds));
        self
    }

    /// Whether the token expires within the next minute or already has
    #[must_use]
    pub fn is_expired(&self) -> bool {
        self.expires_at
            .is_some_and(|expires_at| now_secs().saturating_add(EXPIRY_MARGIN.as_secs()) >= expires_at)
    }

    /// Whether `scope` was granted
    #[must_use]
    pub fn grants(&self, scope: &str) -> bool {
        self.scopes.iter().any(|granted| granted == scope)
    }

    /// `Authorization` header value
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.access_token)
    }

    /// Time left before expiry; `None` if expired or the lifetime is unknown
    #[must_use]
    pub fn remaining_validity(&self) -> Option<Duration> {
        let expires_at = self.expires_at?;
        let now = now_secs();
        (expires_at > now).then(|| Duration::from_secs(expires_at - now))
    }
}
