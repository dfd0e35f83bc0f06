//! Client configuration.

use std::time::Duration;

use tracing::warn;

use crate::proxy::ProxySpec;

/// Configuration for the HTTP transport.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Timeout applied to each REST and SOAP call.
    pub timeout: Duration,
    /// Timeout applied to token endpoint calls.
    pub auth_timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Pool idle timeout.
    pub pool_idle_timeout: Duration,
    /// Maximum idle connections per host.
    pub pool_max_idle_per_host: usize,
    /// User-Agent header value.
    pub user_agent: String,
    /// Forward proxy URL, e.g. `http://proxy.corp:8080`.
    pub proxy_url: Option<String>,
    /// Skip TLS certificate verification. Never enable outside of testing.
    pub accept_invalid_certs: bool,
    /// Whether to enable request/response tracing.
    pub enable_tracing: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            auth_timeout: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            pool_idle_timeout: Duration::from_secs(90),
            pool_max_idle_per_host: 10,
            user_agent: crate::USER_AGENT.to_string(),
            proxy_url: None,
            accept_invalid_certs: false,
            enable_tracing: true,
        }
    }
}

impl ClientConfig {
    /// Create a new client config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Load transport settings from environment variables.
    ///
    /// Optional environment variables:
    /// - `MC_PROXY_URL` - forward proxy for all outbound calls
    /// - `MC_TLS_REJECT_UNAUTHORIZED` - only `false` or `0` disables
    ///   certificate verification
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load transport settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut builder = Self::builder();

        if let Some(proxy_url) = lookup("MC_PROXY_URL").filter(|v| !v.trim().is_empty()) {
            builder = builder.with_proxy_url(proxy_url);
        }
        if let Some(flag) = lookup("MC_TLS_REJECT_UNAUTHORIZED") {
            builder = builder.danger_accept_invalid_certs(matches!(flag.trim(), "false" | "0"));
        }

        builder.build()
    }

    /// Derive the proxy to route through.
    ///
    /// An unusable `proxy_url` is logged and treated as "no proxy".
    pub fn resolve_proxy(&self) -> Option<ProxySpec> {
        let raw = self.proxy_url.as_deref()?.trim();
        if raw.is_empty() {
            return None;
        }

        match ProxySpec::parse(raw) {
            Ok(spec) => Some(spec),
            Err(err) => {
                warn!(error = %err, "Ignoring proxy configuration, connecting directly");
                None
            }
        }
    }
}

/// Builder for ClientConfig.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the REST/SOAP request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set the token endpoint timeout.
    pub fn with_auth_timeout(mut self, timeout: Duration) -> Self {
        self.config.auth_timeout = timeout;
        self
    }

    /// Set connection timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.config.connect_timeout = timeout;
        self
    }

    /// Set pool idle timeout.
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.config.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.config.pool_max_idle_per_host = max;
        self
    }

    /// Set custom User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Route every call through a forward proxy.
    pub fn with_proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.config.proxy_url = Some(proxy_url.into());
        self
    }

    /// Disable TLS certificate verification.
    pub fn danger_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Enable or disable request/response tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.config.enable_tracing = enabled;
        self
    }

    /// Build the client configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}
