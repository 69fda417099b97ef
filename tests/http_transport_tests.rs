#![cfg(feature = "http-client")]

use std::sync::Arc;

use serde_json::json;
use switchboard_console::{
    ApiGateway, ConsoleConfig, ConsoleError, Endpoint, EndpointTable, HttpTransport, Status,
};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> ApiGateway {
    ConsoleConfig::default()
        .with_base_url(format!("{}/_switchboard", server.uri()))
        .http_gateway()
        .unwrap()
}

#[tokio::test]
async fn posts_form_and_decodes_switch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_switchboard/status"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("key=beta"))
        .and(body_string_contains("status=3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "key": "beta",
                "label": "Beta",
                "description": null,
                "status": 3,
                "status_label": "Active for everyone",
                "conditions": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let switch = gateway(&server)
        .update_status("beta", Status::ActiveForEveryone)
        .await
        .unwrap();
    assert_eq!(switch.key, "beta");
    assert_eq!(switch.status, Status::ActiveForEveryone);
    assert_eq!(switch.description(), "");
}

#[tokio::test]
async fn unsuccessful_envelope_is_application_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/_switchboard/add"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "data": "Switch with key beta already exists"
        })))
        .mount(&server)
        .await;

    let err = gateway(&server)
        .add_switch("Beta", "beta", "")
        .await
        .unwrap_err();
    match err {
        ConsoleError::Application(message) => {
            assert_eq!(message, "Switch with key beta already exists")
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn server_error_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = gateway(&server).delete_switch("beta").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Transport(_)));
}

#[tokio::test]
async fn non_json_body_is_transport_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
        .mount(&server)
        .await;

    let err = gateway(&server).history("beta").await.unwrap_err();
    assert!(matches!(err, ConsoleError::Transport(_)));
}

#[tokio::test]
async fn absolute_endpoint_overrides_base_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/audit/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [{ "status": 1 }, { "status": 3 }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let endpoints = EndpointTable {
        history: format!("{}/audit/history", server.uri()),
        ..Default::default()
    };
    let transport = HttpTransport::new(
        std::time::Duration::from_secs(5),
        std::time::Duration::from_secs(5),
    )
    .unwrap();
    let gateway = ApiGateway::new(Arc::new(transport), "http://unused.invalid", endpoints);
    assert_eq!(
        gateway.url(Endpoint::History),
        format!("{}/audit/history", server.uri())
    );
    assert_eq!(gateway.history("beta").await.unwrap().len(), 2);
}
