//! # mc-rest
//!
//! Marketing Cloud REST API dispatch.
//!
//! Every call carries `Authorization: Bearer <token>` from the shared
//! [`TokenProvider`](busbar_mc_auth::TokenProvider). Endpoints are resolved
//! against the REST base URI unless they are already absolute.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_mc_rest::{RestClient, RestRequest};
//!
//! let rest = RestClient::new(tokens.clone());
//! let rows = rest
//!     .dispatch(RestRequest::get("data/v1/customobjectdata/key/Orders/rowset").with_query("$page", 1))
//!     .await?;
//! ```

mod client;
mod request;

pub use client::{resolve_endpoint, RestClient};
pub use request::RestRequest;

pub use busbar_mc_client::{Error, ErrorKind, QueryValue, RequestMethod, Result};
