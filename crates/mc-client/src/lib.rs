//! # mc-client
//!
//! Core HTTP transport for the Marketing Cloud APIs.
//!
//! This crate provides the pieces every other busbar-mc crate builds on:
//! - A pooled HTTP client with TLS verification enforced by default
//! - Optional forward proxy routing with graceful fallback on bad settings
//! - Request/response wrappers with per-call timeouts
//! - The shared error taxonomy (auth, REST, SOAP, config, transport)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    MarketingCloudClient                     │
//! │            (busbar-mc-rest, busbar-mc-soap)                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TokenProvider                          │
//! │  - Cached access token, single-flight refresh               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      McHttpClient                           │
//! │  - Proxy, TLS, pooling, timeouts                            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_mc_client::{ClientConfig, McHttpClient};
//!
//! let http = McHttpClient::new(
//!     ClientConfig::builder()
//!         .with_proxy_url("http://proxy.corp:3128")
//!         .build(),
//! )?;
//! let response = http.execute(http.post(url).json_value(body)).await?;
//! ```

mod client;
mod config;
mod error;
mod proxy;
mod request;
mod response;
pub mod security;

pub use client::McHttpClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use error::{Error, ErrorKind, Result};
pub use proxy::{ProxySpec, DEFAULT_PROXY_PORT};
pub use request::{QueryValue, RequestBody, RequestBuilder, RequestMethod};
pub use response::{decode_body, render_error_body, Response};

/// User-Agent string for the client
pub const USER_AGENT: &str = concat!("busbar-mc-api/", env!("CARGO_PKG_VERSION"));
