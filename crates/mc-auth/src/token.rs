//! Token endpoint wire types and the in-memory cached token.
//!
//! Token values are redacted in Debug output.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Server lifetime assumed when the token endpoint omits `expires_in`.
///
/// After [`EXPIRY_MARGIN_SECS`] the token is cached for 1140 seconds.
pub const DEFAULT_EXPIRES_IN_SECS: i64 = 1200;

/// Safety margin subtracted from the server-declared lifetime so the cache
/// always expires before the upstream token does.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

/// Upper bound applied to server-declared lifetimes before date arithmetic.
const MAX_LIFETIME_SECS: i64 = 365 * 24 * 60 * 60;

/// Client-credentials grant body posted to `/v2/token`.
#[derive(Clone, Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub grant_type: &'static str,
    pub client_id: &'a str,
    pub client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<&'a str>,
}

impl std::fmt::Debug for TokenRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenRequest")
            .field("grant_type", &self.grant_type)
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("account_id", &self.account_id)
            .finish()
    }
}

/// Token endpoint response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    /// Access token. Absent or empty means the grant failed.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
    /// REST host for the tenant, as reported by the auth server.
    #[serde(default)]
    pub rest_instance_url: Option<String>,
    /// SOAP host for the tenant, as reported by the auth server.
    #[serde(default)]
    pub soap_instance_url: Option<String>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &self.access_token.as_ref().map(|_| "[REDACTED]"))
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .field("scope", &self.scope)
            .field("rest_instance_url", &self.rest_instance_url)
            .field("soap_instance_url", &self.soap_instance_url)
            .finish()
    }
}

impl TokenResponse {
    /// Server-declared lifetime, or [`DEFAULT_EXPIRES_IN_SECS`] when omitted.
    pub fn lifetime_secs(&self) -> i64 {
        self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS)
    }
}

/// An access token held in memory together with its local expiry.
///
/// Replaced wholesale on refresh, never mutated in place.
#[derive(Clone)]
pub struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for CachedToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedToken")
            .field("value", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl CachedToken {
    /// Cache a token acquired at `acquired_at` with a server lifetime of `expires_in` seconds.
    pub fn new(value: impl Into<String>, expires_in: i64, acquired_at: DateTime<Utc>) -> Self {
        Self {
            value: value.into(),
            expires_at: acquired_at
                + Duration::seconds(expires_in.clamp(0, MAX_LIFETIME_SECS) - EXPIRY_MARGIN_SECS),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True while the recorded expiry is strictly after `now`.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}
