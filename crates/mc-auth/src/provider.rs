//! Access token acquisition with an in-memory cache.
//!
//! The provider owns the only shared mutable state in the client: the cached
//! token. Reads take a shared lock; refreshes are serialized by a separate
//! async mutex and re-check the cache once acquired, so a burst of callers
//! behind an expired token produces a single token request.

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use busbar_mc_client::{render_error_body, Error, ErrorKind, McHttpClient, Result};

use crate::credentials::McCredentials;
use crate::token::{CachedToken, TokenRequest, TokenResponse};

const GRANT_TYPE: &str = "client_credentials";

/// Issues bearer tokens for the REST and SOAP paths.
pub struct TokenProvider {
    credentials: McCredentials,
    http: McHttpClient,
    cache: RwLock<Option<CachedToken>>,
    refresh: Mutex<()>,
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl TokenProvider {
    /// Create a provider with an empty cache.
    pub fn new(credentials: McCredentials, http: McHttpClient) -> Self {
        Self {
            credentials,
            http,
            cache: RwLock::new(None),
            refresh: Mutex::new(()),
        }
    }

    pub fn credentials(&self) -> &McCredentials {
        &self.credentials
    }

    /// The transport used for token and API calls.
    pub fn http(&self) -> &McHttpClient {
        &self.http
    }

    /// Return a valid access token, fetching a new one if the cache is empty or expired.
    #[instrument(skip(self))]
    pub async fn get_access_token(&self) -> Result<String> {
        if let Some(token) = self.cached_token(Utc::now()).await {
            return Ok(token);
        }

        let _refresh = self.refresh.lock().await;

        // Another caller may have refreshed while we waited.
        if let Some(token) = self.cached_token(Utc::now()).await {
            debug!("Using token refreshed by a concurrent caller");
            return Ok(token);
        }

        let token = self.fetch_token().await?;
        let value = token.value().to_string();
        *self.cache.write().await = Some(token);

        Ok(value)
    }

    /// Drop the cached token so the next call fetches a fresh one.
    pub async fn invalidate(&self) {
        if self.cache.write().await.take().is_some() {
            debug!("Cached access token invalidated");
        }
    }

    /// Expiry of the cached token, if one is held.
    pub async fn cached_expiry(&self) -> Option<DateTime<Utc>> {
        self.cache.read().await.as_ref().map(CachedToken::expires_at)
    }

    async fn cached_token(&self, now: DateTime<Utc>) -> Option<String> {
        self.cache
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now))
            .map(|token| token.value().to_string())
    }

    /// Perform the client-credentials grant, bypassing the cache.
    #[instrument(skip(self), fields(client_id = %self.credentials.client_id()))]
    pub async fn fetch_token(&self) -> Result<CachedToken> {
        let body = TokenRequest {
            grant_type: GRANT_TYPE,
            client_id: self.credentials.client_id(),
            client_secret: self.credentials.client_secret(),
            account_id: self.credentials.account_id(),
        };

        let request = self
            .http
            .post(self.credentials.token_url())
            .timeout(self.http.config().auth_timeout)
            .json(&body)?;

        let acquired_at = Utc::now();
        let response = self.http.execute(request).await.map_err(|err| {
            warn!(error = %err, "Token request failed before a response was received");
            Error::with_source(
                ErrorKind::Auth {
                    status: None,
                    message: err.to_string(),
                },
                err,
            )
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|err| {
            Error::with_source(
                ErrorKind::Auth {
                    status: Some(status),
                    message: err.to_string(),
                },
                err,
            )
        })?;

        if !(200..300).contains(&status) {
            warn!(status, "Token endpoint rejected the request");
            return Err(Error::auth(Some(status), render_error_body(&text)));
        }

        let parsed: TokenResponse = serde_json::from_str(&text).map_err(|err| {
            Error::with_source(
                ErrorKind::Auth {
                    status: Some(status),
                    message: format!("token response could not be decoded: {err}"),
                },
                err,
            )
        })?;

        let access_token = parsed
            .access_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| {
                Error::auth(Some(status), "token response did not include an access_token")
            })?;

        let token = CachedToken::new(access_token, parsed.lifetime_secs(), acquired_at);
        info!(expires_at = %token.expires_at(), "Access token acquired");

        Ok(token)
    }
}
