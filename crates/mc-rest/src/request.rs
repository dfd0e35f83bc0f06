//! REST request shape accepted from the calling tool layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use busbar_mc_client::{QueryValue, RequestMethod};

/// One REST call: `{method, endpoint, body?, queryParams?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestRequest {
    pub method: RequestMethod,
    /// Path relative to the REST base URI, or an absolute `http(s)://` URL.
    pub endpoint: String,
    /// JSON payload. Only sent for POST, PUT, and PATCH.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
    #[serde(
        default,
        rename = "queryParams",
        alias = "query",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub query: BTreeMap<String, QueryValue>,
}

impl RestRequest {
    pub fn new(method: RequestMethod, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            query: BTreeMap::new(),
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(RequestMethod::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(RequestMethod::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(RequestMethod::Put, endpoint)
    }

    pub fn patch(endpoint: impl Into<String>) -> Self {
        Self::new(RequestMethod::Patch, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(RequestMethod::Delete, endpoint)
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }
}
