//! SOAP dispatch through the facade.

use super::common::{mock_tenant, mount_token};
use busbar_mc_api::{ErrorKind, SoapRequest};
use serde_json::json;
use wiremock::matchers::{body_string, body_string_contains, header, method, path};
use wiremock::{Mock, ResponseTemplate};

const RETRIEVE_WITH_HEADER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/" xmlns="http://exacttarget.com/wsdl/partnerAPI">
  <soapenv:Header></soapenv:Header>
  <soapenv:Body>
    <RetrieveRequestMsg>
      <RetrieveRequest>
        <ObjectType>DataExtension</ObjectType>
        <Properties>CustomerKey</Properties>
      </RetrieveRequest>
    </RetrieveRequestMsg>
  </soapenv:Body>
</soapenv:Envelope>"#;

const RETRIEVE_WITHOUT_HEADER: &str = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"><SOAP-ENV:Body><RetrieveRequestMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"/></SOAP-ENV:Body></SOAP-ENV:Envelope>"#;

#[tokio::test]
async fn test_soap_existing_header_receives_token() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("POST"))
        .and(path("/Service.asmx"))
        .and(header("SOAPAction", "Retrieve"))
        .and(body_string_contains(
            "<soapenv:Header><fueloauth>tok</fueloauth></soapenv:Header>",
        ))
        .and(body_string_contains("<ObjectType>DataExtension</ObjectType>"))
        .and(|req: &wiremock::Request| !req.headers.contains_key("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<RetrieveResponseMsg/>"))
        .expect(1)
        .mount(&server)
        .await;

    let request: SoapRequest = serde_json::from_value(json!({
        "soapAction": "Retrieve",
        "soapXmlBody": RETRIEVE_WITH_HEADER
    }))
    .unwrap();

    let body = client.dispatch_soap(request).await.unwrap();
    assert_eq!(body, "<RetrieveResponseMsg/>");
}

#[tokio::test]
async fn test_soap_header_is_synthesized() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    let expected = r#"<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/"><SOAP-ENV:Header><fueloauth>tok</fueloauth></SOAP-ENV:Header><SOAP-ENV:Body><RetrieveRequestMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"/></SOAP-ENV:Body></SOAP-ENV:Envelope>"#;

    Mock::given(method("POST"))
        .and(path("/Service.asmx"))
        .and(body_string(expected))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(1)
        .mount(&server)
        .await;

    client
        .dispatch_soap(SoapRequest::new("Retrieve", RETRIEVE_WITHOUT_HEADER))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_soap_fault_surfaces_status_message() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("POST"))
        .and(path("/Service.asmx"))
        .respond_with(ResponseTemplate::new(500).set_body_string(
            "<soap:Envelope><soap:Body><CreateResponse><Results>\
             <StatusCode>Error</StatusCode>\
             <StatusMessage>Unable to save Subscriber</StatusMessage>\
             </Results></CreateResponse></soap:Body></soap:Envelope>",
        ))
        .mount(&server)
        .await;

    let err = client
        .dispatch_soap(SoapRequest::new("Create", RETRIEVE_WITH_HEADER))
        .await
        .unwrap_err();

    assert!(err.is_soap_error());
    match err.kind {
        ErrorKind::Soap {
            status,
            status_message,
            body,
            ..
        } => {
            assert_eq!(status, 500);
            assert_eq!(status_message.as_deref(), Some("Unable to save Subscriber"));
            assert!(body.contains("<StatusCode>Error</StatusCode>"));
        }
        other => panic!("unexpected error kind: {other:?}"),
    }
}
