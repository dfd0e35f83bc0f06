//! Tests against a real Marketing Cloud tenant. Ignored by default.

use busbar_mc_api::{MarketingCloudClient, RestRequest, SoapRequest};

fn live_client() -> MarketingCloudClient {
    super::common::init_tracing();
    MarketingCloudClient::from_env().unwrap_or_else(|err| {
        panic!("live tests need MC_CLIENT_ID, MC_CLIENT_SECRET, MC_AUTH_BASE_URI and MC_REST_BASE_URI: {err}")
    })
}

#[tokio::test]
#[ignore]
async fn test_live_token_context() {
    let client = live_client();

    let context = client
        .dispatch_rest(RestRequest::get("/platform/v1/tokenContext"))
        .await
        .expect("tokenContext should succeed");

    assert!(context.get("enterprise").is_some(), "unexpected payload: {context}");
}

#[tokio::test]
#[ignore]
async fn test_live_soap_system_status() {
    let client = live_client();

    let envelope = r#"<?xml version="1.0" encoding="UTF-8"?>
<s:Envelope xmlns:s="http://www.w3.org/2003/05/soap-envelope">
  <s:Body>
    <SystemStatusRequestMsg xmlns="http://exacttarget.com/wsdl/partnerAPI"/>
  </s:Body>
</s:Envelope>"#;

    let response = client
        .dispatch_soap(SoapRequest::new("SystemStatus", envelope))
        .await
        .expect("SystemStatus should succeed");

    assert!(response.contains("SystemStatusResponseMsg"), "unexpected payload: {response}");
}
