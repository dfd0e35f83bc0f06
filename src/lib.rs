//! # busbar-mc-api
//!
//! A Salesforce Marketing Cloud API client library for Rust.
//!
//! One client holds the installed-package credentials, a single HTTP
//! transport (optionally behind a forward proxy), and an in-memory access
//! token shared by the REST and SOAP surfaces.
//!
//! ## Security
//!
//! - Client secrets and access tokens are redacted in Debug output
//! - Tracing spans skip credential and token parameters
//! - TLS verification is on unless explicitly disabled
//!
//! ## Crates
//!
//! - **busbar-mc-client** - Transport, proxy routing, TLS policy, error taxonomy
//! - **busbar-mc-auth** - OAuth 2.0 client credentials with token caching
//! - **busbar-mc-rest** - REST dispatch with bearer authentication
//! - **busbar-mc-soap** - SOAP dispatch with `<fueloauth>` injection
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use busbar_mc_api::{MarketingCloudClient, RestRequest, SoapRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MarketingCloudClient::from_env()?;
//!
//!     let rows = client
//!         .dispatch_rest(
//!             RestRequest::get("data/v1/customobjectdata/key/Subscribers/rowset")
//!                 .with_query("$pageSize", 50),
//!         )
//!         .await?;
//!     println!("{rows}");
//!
//!     let xml = client
//!         .dispatch_soap(SoapRequest::new("Retrieve", std::fs::read_to_string("retrieve.xml")?))
//!         .await?;
//!     println!("{xml}");
//!
//!     Ok(())
//! }
//! ```

// Re-export all crates for convenient access
#[cfg(feature = "auth")]
pub use busbar_mc_auth as auth;
#[cfg(feature = "client")]
pub use busbar_mc_client as client;
#[cfg(feature = "rest")]
pub use busbar_mc_rest as rest;
#[cfg(feature = "soap")]
pub use busbar_mc_soap as soap;

// Re-export commonly used types at the top level
#[cfg(feature = "auth")]
pub use busbar_mc_auth::{McCredentials, TokenProvider};
#[cfg(feature = "client")]
pub use busbar_mc_client::{ClientConfig, Error, ErrorKind, McHttpClient, Result};
#[cfg(feature = "rest")]
pub use busbar_mc_rest::{RestClient, RestRequest};
#[cfg(feature = "soap")]
pub use busbar_mc_soap::{SoapClient, SoapRequest};

#[cfg(all(feature = "rest", feature = "soap"))]
mod facade;

#[cfg(all(feature = "rest", feature = "soap"))]
pub use facade::MarketingCloudClient;
