//! SOAP request shape accepted from the calling tool layer.

use serde::{Deserialize, Serialize};

/// One SOAP call: the action name and a complete envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoapRequest {
    /// Value sent in the `SOAPAction` header, e.g. `Retrieve`.
    pub soap_action: String,
    /// Caller-authored envelope. The token is injected before sending.
    pub soap_xml_body: String,
}

impl SoapRequest {
    pub fn new(soap_action: impl Into<String>, soap_xml_body: impl Into<String>) -> Self {
        Self {
            soap_action: soap_action.into(),
            soap_xml_body: soap_xml_body.into(),
        }
    }
}
