//! Single entry point sharing one transport and token cache across REST and SOAP.

use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use busbar_mc_auth::{McCredentials, TokenProvider};
use busbar_mc_client::{ClientConfig, McHttpClient, Result};
use busbar_mc_rest::{RestClient, RestRequest};
use busbar_mc_soap::{SoapClient, SoapRequest};

/// Marketing Cloud client shared by every REST and SOAP call in a process.
///
/// Cloning is cheap: clones share the transport and the token cache.
#[derive(Debug, Clone)]
pub struct MarketingCloudClient {
    tokens: Arc<TokenProvider>,
    rest: RestClient,
    soap: SoapClient,
}

impl MarketingCloudClient {
    /// Build the transport and token provider.
    ///
    /// An unusable proxy URL is logged and ignored; it never fails construction.
    pub fn new(credentials: McCredentials, config: ClientConfig) -> Result<Self> {
        let http = McHttpClient::new(config)?;
        info!(
            rest_base_uri = %credentials.rest_base_uri(),
            proxied = http.is_proxied(),
            "Marketing Cloud client initialized"
        );

        let tokens = Arc::new(TokenProvider::new(credentials, http));
        Ok(Self {
            rest: RestClient::new(Arc::clone(&tokens)),
            soap: SoapClient::new(Arc::clone(&tokens)),
            tokens,
        })
    }

    /// Build a client from `MC_*` environment variables.
    ///
    /// See [`McCredentials::from_env`] and [`ClientConfig::from_env`] for the
    /// variables read.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a client through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let credentials = McCredentials::from_lookup(&lookup)?;
        Self::new(credentials, ClientConfig::from_lookup(&lookup))
    }

    /// Perform an authenticated REST call.
    pub async fn dispatch_rest(&self, request: RestRequest) -> Result<Value> {
        self.rest.dispatch(request).await
    }

    /// Perform an authenticated SOAP call and return the raw response envelope.
    pub async fn dispatch_soap(&self, request: SoapRequest) -> Result<String> {
        self.soap.dispatch(request).await
    }

    /// A valid access token, from cache when possible.
    pub async fn get_access_token(&self) -> Result<String> {
        self.tokens.get_access_token().await
    }

    pub fn credentials(&self) -> &McCredentials {
        self.tokens.credentials()
    }

    pub fn token_provider(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    pub fn rest(&self) -> &RestClient {
        &self.rest
    }

    pub fn soap(&self) -> &SoapClient {
        &self.soap
    }
}
