//! Installed-package credentials.
//!
//! The client secret is redacted in Debug output.

use busbar_mc_client::{Error, ErrorKind, Result};

/// Client-credentials configuration for one Marketing Cloud installed package.
///
/// Immutable once built; shared by the token, REST, and SOAP paths.
#[derive(Clone)]
pub struct McCredentials {
    client_id: String,
    client_secret: String,
    auth_base_uri: String,
    rest_base_uri: String,
    account_id: Option<String>,
}

impl std::fmt::Debug for McCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("McCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("auth_base_uri", &self.auth_base_uri)
            .field("rest_base_uri", &self.rest_base_uri)
            .field("account_id", &self.account_id)
            .finish()
    }
}

impl McCredentials {
    /// Create new credentials.
    ///
    /// Trailing slashes on the base URIs are trimmed.
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        auth_base_uri: impl Into<String>,
        rest_base_uri: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            auth_base_uri: auth_base_uri.into().trim_end_matches('/').to_string(),
            rest_base_uri: rest_base_uri.into().trim_end_matches('/').to_string(),
            account_id: None,
        }
    }

    /// Target a specific business unit (MID).
    pub fn with_account_id(mut self, account_id: impl Into<String>) -> Self {
        let account_id = account_id.into();
        self.account_id = Some(account_id).filter(|id| !id.trim().is_empty());
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub(crate) fn client_secret(&self) -> &str {
        &self.client_secret
    }

    /// Base URI of the authentication host, e.g. `https://xyz.auth.marketingcloudapis.com`.
    pub fn auth_base_uri(&self) -> &str {
        &self.auth_base_uri
    }

    /// Base URI of the REST host, e.g. `https://xyz.rest.marketingcloudapis.com`.
    pub fn rest_base_uri(&self) -> &str {
        &self.rest_base_uri
    }

    pub fn account_id(&self) -> Option<&str> {
        self.account_id.as_deref()
    }

    /// Token endpoint URL.
    pub fn token_url(&self) -> String {
        format!("{}/v2/token", self.auth_base_uri)
    }

    /// Load credentials from environment variables.
    ///
    /// Required environment variables:
    /// - `MC_CLIENT_ID`
    /// - `MC_CLIENT_SECRET`
    /// - `MC_AUTH_BASE_URI`
    /// - `MC_REST_BASE_URI`
    ///
    /// Optional:
    /// - `MC_ACCOUNT_ID`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| Error::new(ErrorKind::EnvVar(name.to_string())))
        };

        let mut creds = Self::new(
            required("MC_CLIENT_ID")?,
            required("MC_CLIENT_SECRET")?,
            required("MC_AUTH_BASE_URI")?,
            required("MC_REST_BASE_URI")?,
        );
        if let Some(account_id) = lookup("MC_ACCOUNT_ID") {
            creds = creds.with_account_id(account_id);
        }

        Ok(creds)
    }
}
