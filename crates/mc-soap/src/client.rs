//! Authenticated SOAP dispatch.

use std::sync::Arc;

use tracing::{debug, instrument, warn};

use busbar_mc_auth::TokenProvider;
use busbar_mc_client::{Error, ErrorKind, Result};

use crate::envelope::{extract_status_message, inject_token, soap_endpoint};
use crate::request::SoapRequest;

const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Marketing Cloud SOAP API client.
///
/// The token travels inside the envelope as `<fueloauth>`; no
/// `Authorization` header is sent.
#[derive(Debug, Clone)]
pub struct SoapClient {
    tokens: Arc<TokenProvider>,
}

impl SoapClient {
    pub fn new(tokens: Arc<TokenProvider>) -> Self {
        Self { tokens }
    }

    pub fn token_provider(&self) -> &Arc<TokenProvider> {
        &self.tokens
    }

    /// SOAP service URL for the configured tenant.
    pub fn endpoint(&self) -> String {
        soap_endpoint(self.tokens.credentials().rest_base_uri())
    }

    /// Send one SOAP call and return the raw response envelope.
    #[instrument(skip(self, request), fields(action = %request.soap_action))]
    pub async fn dispatch(&self, request: SoapRequest) -> Result<String> {
        let token = self.tokens.get_access_token().await?;
        let envelope = inject_token(&request.soap_xml_body, &token)?;
        let http = self.tokens.http();

        let endpoint = self.endpoint();
        debug!(endpoint = %endpoint, "Sending SOAP request");

        let builder = http
            .post(endpoint)
            .header(SOAP_ACTION_HEADER, request.soap_action)
            .timeout(http.config().timeout)
            .xml(envelope);

        let response = http.execute(builder).await?;

        let status = response.status();
        let status_text = response.status_text().to_string();
        let body = response.text().await?;

        if !(200..300).contains(&status) {
            let status_message = extract_status_message(&body);
            warn!(status, status_message = ?status_message, "SOAP request returned an error status");
            return Err(Error::new(ErrorKind::Soap {
                status,
                status_text,
                body,
                status_message,
            }));
        }

        Ok(body)
    }

    /// Convenience wrapper around [`dispatch`](Self::dispatch).
    pub async fn call(&self, soap_action: &str, envelope: &str) -> Result<String> {
        self.dispatch(SoapRequest::new(soap_action, envelope)).await
    }
}
