use busbar_mc_api::{ClientConfig, McCredentials, MarketingCloudClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Route test logs through the test writer; `RUST_LOG=debug` shows them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A mock tenant serving auth, REST, and SOAP from one server.
///
/// The REST base URI is the server root, so SOAP calls land on `/Service.asmx`.
pub async fn mock_tenant() -> (MockServer, MarketingCloudClient) {
    init_tracing();

    let server = MockServer::start().await;
    let creds = McCredentials::new("test-client", "test-secret", server.uri(), server.uri());
    let client = MarketingCloudClient::new(creds, ClientConfig::default())
        .expect("client should build");

    (server, client)
}

/// Mount a token endpoint that must be hit exactly `times` times.
pub async fn mount_token(server: &MockServer, token: &str, times: u64) {
    Mock::given(method("POST"))
        .and(path("/v2/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": token,
            "expires_in": 1080,
            "token_type": "Bearer"
        })))
        .expect(times)
        .mount(server)
        .await;
}
