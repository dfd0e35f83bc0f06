//! # mc-auth
//!
//! Marketing Cloud authentication: OAuth 2.0 client-credentials grant with an
//! in-memory token cache.
//!
//! ## Security
//!
//! - The client secret and access tokens are redacted in Debug output
//! - Tracing spans skip credential parameters
//! - Tokens are never persisted; a restart always fetches a fresh one
//!
//! ## Caching
//!
//! A token is cached until `expires_in - 60` seconds after it was acquired.
//! When the server omits `expires_in` the token is cached for 1140 seconds.
//! Concurrent callers behind an expired token share a single refresh.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_mc_auth::{McCredentials, TokenProvider};
//! use busbar_mc_client::McHttpClient;
//!
//! let creds = McCredentials::from_env()?;
//! let provider = TokenProvider::new(creds, McHttpClient::default_client()?);
//! let token = provider.get_access_token().await?;
//! ```

mod credentials;
mod provider;
mod token;

pub use credentials::McCredentials;
pub use provider::TokenProvider;
pub use token::{CachedToken, TokenResponse, DEFAULT_EXPIRES_IN_SECS, EXPIRY_MARGIN_SECS};

pub use busbar_mc_client::{Error, ErrorKind, Result};
