//! Authenticated REST dispatch.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, instrument, warn};

use busbar_mc_auth::TokenProvider;
use busbar_mc_client::{render_error_body, Error, ErrorKind, Result};

use crate::request::RestRequest;

/// Marketing Cloud REST API client.
///
/// Shares its [`TokenProvider`] (and therefore the token cache and the
/// transport) with any other client built from the same provider.
#[derive(Debug, Clone)]
pub struct RestClient {
    tokens: Arc<TokenProvider>,
}

impl RestClient {
    pub fn new(tokens: Arc<TokenProvider>) -> Self {
        Self { tokens }
    }

    pub fn token_provider(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    /// Resolve an endpoint against the REST base URI.
    ///
    /// Absolute `http(s)://` URLs are used as-is; anything else is treated as
    /// a path and gets a leading `/` if it lacks one.
    pub fn url(&self, endpoint: &str) -> String {
        resolve_endpoint(self.tokens.credentials().rest_base_uri(), endpoint)
    }

    /// Perform one authenticated REST call and return the decoded payload.
    #[instrument(skip(self, request), fields(method = %request.method, endpoint = %request.endpoint))]
    pub async fn dispatch(&self, request: RestRequest) -> Result<Value> {
        let token = self.tokens.get_access_token().await?;
        let http = self.tokens.http();

        let mut builder = http
            .request(request.method.to_reqwest(), self.url(&request.endpoint))
            .bearer_auth(token)
            .header("Content-Type", "application/json")
            .timeout(http.config().timeout);

        for (name, value) in &request.query {
            builder = builder.query(name.as_str(), value);
        }

        match request.body {
            Some(body) if request.method.allows_body() => {
                builder = builder.json_value(body);
            }
            Some(_) => debug!("Dropping request body for {} request", request.method),
            None => {}
        }

        let response = http.execute(builder).await.map_err(|err| {
            warn!(error = %err, "REST request failed before a response was received");
            Error::with_source(
                ErrorKind::Api {
                    status: None,
                    message: err.to_string(),
                },
                err,
            )
        })?;

        let status = response.status();
        if !response.is_success() {
            let text = response
                .text()
                .await
                .map_err(|err| body_read_error(status, err))?;
            warn!(status, "REST request returned an error status");
            return Err(Error::api(Some(status), render_error_body(&text)));
        }

        response
            .json_value()
            .await
            .map_err(|err| body_read_error(status, err))
    }

    /// GET an endpoint.
    pub async fn get(&self, endpoint: &str) -> Result<Value> {
        self.dispatch(RestRequest::get(endpoint)).await
    }

    /// POST a JSON body to an endpoint.
    pub async fn post(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.dispatch(RestRequest::post(endpoint).with_body(body)).await
    }

    /// PUT a JSON body to an endpoint.
    pub async fn put(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.dispatch(RestRequest::put(endpoint).with_body(body)).await
    }

    /// PATCH a JSON body to an endpoint.
    pub async fn patch(&self, endpoint: &str, body: Value) -> Result<Value> {
        self.dispatch(RestRequest::patch(endpoint).with_body(body)).await
    }

    /// DELETE an endpoint.
    pub async fn delete(&self, endpoint: &str) -> Result<Value> {
        self.dispatch(RestRequest::delete(endpoint)).await
    }
}

fn body_read_error(status: u16, err: Error) -> Error {
    warn!(status, error = %err, "REST response body could not be read");
    Error::with_source(
        ErrorKind::Api {
            status: Some(status),
            message: format!("response body could not be read: {err}"),
        },
        err,
    )
}

/// Join `endpoint` onto `base` unless it is already absolute.
pub fn resolve_endpoint(base: &str, endpoint: &str) -> String {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        endpoint.to_string()
    } else if endpoint.starts_with('/') {
        format!("{}{}", base.trim_end_matches('/'), endpoint)
    } else {
        format!("{}/{}", base.trim_end_matches('/'), endpoint)
    }
}
