//! Core HTTP transport with proxy routing and TLS enforcement.

use tracing::{debug, info, instrument, warn};

use crate::config::ClientConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::request::{RequestBody, RequestBuilder};
use crate::response::Response;

/// HTTP transport shared by the token, REST, and SOAP paths.
///
/// Built once and reused for every call so connections are pooled. Cloning
/// is cheap and clones share the same pool.
#[derive(Debug, Clone)]
pub struct McHttpClient {
    inner: reqwest::Client,
    config: ClientConfig,
    proxied: bool,
}

impl McHttpClient {
    /// Create a new HTTP client.
    ///
    /// A malformed proxy setting is logged and ignored rather than failing
    /// construction.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .user_agent(&config.user_agent)
            .gzip(true)
            .deflate(true);

        let proxy = config
            .resolve_proxy()
            .and_then(|spec| match spec.to_reqwest() {
                Ok(proxy) => {
                    info!(proxy = %spec.url(), "Routing requests through proxy");
                    Some(proxy)
                }
                Err(err) => {
                    warn!(error = %err, "Ignoring proxy configuration, connecting directly");
                    None
                }
            });

        let proxied = proxy.is_some();
        builder = match proxy {
            Some(proxy) => builder.proxy(proxy),
            None => builder.no_proxy(),
        };

        if config.accept_invalid_certs {
            warn!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let inner = builder
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            config,
            proxied,
        })
    }

    /// Create a new HTTP client with default configuration.
    pub fn default_client() -> Result<Self> {
        Self::new(ClientConfig::default())
    }

    /// Get the client configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether traffic is routed through a forward proxy.
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// Create a request builder.
    pub fn request(&self, method: reqwest::Method, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, url)
    }

    /// Create a POST request builder.
    pub fn post(&self, url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(reqwest::Method::POST, url)
    }

    /// Execute a single request.
    ///
    /// Any status code is returned as a [`Response`]; only transport failures
    /// (connect, timeout, body) become errors. Callers classify non-2xx
    /// responses themselves.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let url = request.full_url()?;
        let mut req = self.inner.request(request.method.clone(), url);

        if let Some(ref token) = request.bearer_token {
            req = req.bearer_auth(token);
        }

        for (name, value) in &request.headers {
            req = req.header(name.as_str(), value.as_str());
        }

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        if let Some(body) = request.body {
            req = match body {
                RequestBody::Json(value) => req.body(serde_json::to_vec(&value)?),
                RequestBody::Text(text) => req.body(text),
            };
        }

        if self.config.enable_tracing {
            debug!("Sending request");
        }

        let response = req.send().await?;

        if self.config.enable_tracing {
            let status = response.status().as_u16();
            let content_length = response.content_length();

            if response.status().is_success() {
                debug!(status, content_length, "Response received");
            } else {
                info!(status, content_length, "Non-success response");
            }
        }

        Ok(Response::new(response))
    }
}
