//! REST dispatch through the facade.

use super::common::{mock_tenant, mount_token};
use busbar_mc_api::RestRequest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn test_rest_request_from_tool_payload() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("GET"))
        .and(path("/data/v1/customobjectdata/key/Subscribers/rowset"))
        .and(header("Authorization", "Bearer tok"))
        .and(query_param("$pageSize", "50"))
        .and(query_param("$filter", "Status eq 'Active'"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "pageSize": 50,
            "items": [{"keys": {"email": "a@example.com"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request: RestRequest = serde_json::from_value(json!({
        "method": "GET",
        "endpoint": "data/v1/customobjectdata/key/Subscribers/rowset",
        "queryParams": {"$pageSize": 50, "$filter": "Status eq 'Active'"}
    }))
    .unwrap();

    let result = client.dispatch_rest(request).await.unwrap();
    assert_eq!(result["items"][0]["keys"]["email"], "a@example.com");
}

#[tokio::test]
async fn test_rest_post_and_put() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("POST"))
        .and(path("/interaction/v1/events"))
        .and(body_json(json!({"ContactKey": "c-1", "EventDefinitionKey": "evt"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"eventInstanceId": "e-1"})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/hub/v1/dataevents/key:Orders/rows/id:7"))
        .and(body_json(json!({"values": {"status": "shipped"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"values": {"status": "shipped"}})))
        .expect(1)
        .mount(&server)
        .await;

    let created = client
        .dispatch_rest(
            RestRequest::post("/interaction/v1/events")
                .with_body(json!({"ContactKey": "c-1", "EventDefinitionKey": "evt"})),
        )
        .await
        .unwrap();
    assert_eq!(created["eventInstanceId"], "e-1");

    let updated = client
        .dispatch_rest(
            RestRequest::put("/hub/v1/dataevents/key:Orders/rows/id:7")
                .with_body(json!({"values": {"status": "shipped"}})),
        )
        .await
        .unwrap();
    assert_eq!(updated["values"]["status"], "shipped");
}

#[tokio::test]
async fn test_rest_non_json_success_is_returned_as_text() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("GET"))
        .and(path("/platform/v1/endpoints"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&server)
        .await;

    let result = client
        .dispatch_rest(RestRequest::get("platform/v1/endpoints"))
        .await
        .unwrap();
    assert_eq!(result, json!("plain text"));
}

#[tokio::test]
async fn test_rest_error_is_reported_verbatim() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("DELETE"))
        .and(path("/asset/v1/content/assets/99"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Asset not found",
            "errorcode": 10002
        })))
        .mount(&server)
        .await;

    let err = client
        .dispatch_rest(RestRequest::delete("/asset/v1/content/assets/99"))
        .await
        .unwrap_err();

    assert!(err.is_api_error());
    assert_eq!(err.status(), Some(404));
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("Asset not found"));
    assert!(msg.contains("10002"));
}

#[tokio::test]
async fn test_repeated_get_returns_identical_results() {
    let (server, client) = mock_tenant().await;
    mount_token(&server, "tok", 1).await;

    Mock::given(method("GET"))
        .and(path("/data/v1/customobjectdata/key/Orders/rowset"))
        .and(query_param("$page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "items": [{"keys": {"id": 1}}, {"keys": {"id": 2}}]
        })))
        .expect(2)
        .mount(&server)
        .await;

    let request = RestRequest::get("data/v1/customobjectdata/key/Orders/rowset").with_query("$page", 1);

    let first = client.dispatch_rest(request.clone()).await.unwrap();
    let second = client.dispatch_rest(request).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first["count"], 2);
}
