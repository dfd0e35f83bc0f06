//! One token serves every surface until it expires.

use super::common::{mock_tenant, mount_token};
use busbar_mc_api::{RestRequest, SoapRequest};
use futures::future::join_all;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

const ENVELOPE: &str =
    r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/"><s:Body/></s:Envelope>"#;

#[tokio::test]
async fn test_rest_and_soap_share_one_token() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "shared", 1).await;

    Mock::given(method("GET"))
        .and(path("/platform/v1/tokenContext"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"enterprise": {"id": 1}})))
        .expect(2)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/Service.asmx"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<ok/>"))
        .expect(2)
        .mount(&server)
        .await;

    client
        .dispatch_rest(RestRequest::get("/platform/v1/tokenContext"))
        .await
        .unwrap();
    client
        .dispatch_soap(SoapRequest::new("Describe", ENVELOPE))
        .await
        .unwrap();

    // Clones share the cache too.
    let clone = client.clone();
    clone
        .dispatch_rest(RestRequest::get("/platform/v1/tokenContext"))
        .await
        .unwrap();
    clone
        .dispatch_soap(SoapRequest::new("Describe", ENVELOPE))
        .await
        .unwrap();

    assert_eq!(client.get_access_token().await.unwrap(), "shared");
}

#[tokio::test]
async fn test_concurrent_calls_fetch_one_token() {
    let (server, client) = mock_tenant().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"access_token": "burst", "expires_in": 1080}))
                .set_delay(std::time::Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/data/v1/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
        .expect(8)
        .mount(&server)
        .await;

    let calls = (0..8).map(|_| {
        let client = client.clone();
        async move { client.dispatch_rest(RestRequest::get("/data/v1/ping")).await }
    });

    for result in join_all(calls).await {
        assert_eq!(result.unwrap(), json!({"ok": true}));
    }
}

#[tokio::test]
async fn test_auth_failure_reaches_both_surfaces() {
    let (server, client) = mock_tenant().await;

    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid_client",
            "error_description": "Client authentication failed."
        })))
        .expect(2)
        .mount(&server)
        .await;

    let rest_err = client
        .dispatch_rest(RestRequest::get("/data/v1/ping"))
        .await
        .unwrap_err();
    let soap_err = client
        .dispatch_soap(SoapRequest::new("Retrieve", ENVELOPE))
        .await
        .unwrap_err();

    for err in [rest_err, soap_err] {
        assert!(err.is_auth_error());
        assert_eq!(err.status(), Some(401));
        assert!(err.to_string().contains("invalid_client"));
    }
}
