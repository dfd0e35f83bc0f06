//! # mc-soap
//!
//! Marketing Cloud SOAP API dispatch.
//!
//! The SOAP endpoint does not read `Authorization`; the access token is placed
//! in the envelope header as `<fueloauth>`. Envelopes are edited in place so
//! caller-authored XML is otherwise sent unchanged.
//!
//! ## Example
//!
//! ```rust,ignore
//! use busbar_mc_soap::{SoapClient, SoapRequest};
//!
//! let soap = SoapClient::new(tokens.clone());
//! let xml = soap.dispatch(SoapRequest::new("Retrieve", envelope)).await?;
//! ```

mod client;
mod envelope;
mod request;

pub use client::SoapClient;
pub use envelope::{extract_status_message, inject_token, soap_endpoint, TOKEN_ELEMENT};
pub use request::SoapRequest;

pub use busbar_mc_client::{Error, ErrorKind, Result};
