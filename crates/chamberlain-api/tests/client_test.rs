#![allow(clippy::unwrap_used)]
// Integration tests for `MyQClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chamberlain_api::{ClientConfig, Error, MyQClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

const GET_PATH: &str = "/api/v4/deviceattribute/getdeviceattribute";
const PUT_PATH: &str = "/api/v4/DeviceAttribute/PutDeviceAttribute";

async fn setup() -> (MockServer, MyQClient) {
    let server = MockServer::start().await;
    let config = ClientConfig {
        base_url: Url::parse(&server.uri()).unwrap(),
        device_id: "GW-1234".into(),
        username: "user@example.com".into(),
        password: "hunter2".to_string().into(),
        transport: TransportConfig::default(),
    };
    let client = MyQClient::with_client(reqwest::Client::new(), config);
    (server, client)
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device_attribute() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .and(query_param("myQDeviceId", "GW-1234"))
        .and(query_param("attributeName", "doorstate"))
        .and(basic_auth("user@example.com", "hunter2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "0",
            "ErrorMessage": "",
            "AttributeValue": "2"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let value = client.get_device_attribute("doorstate").await.unwrap();
    assert_eq!(value, 2);
}

#[tokio::test]
async fn test_get_device_attribute_passes_unknown_codes_through() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "0",
            "AttributeValue": "9"
        })))
        .mount(&server)
        .await;

    assert_eq!(client.get_device_attribute("doorstate").await.unwrap(), 9);
}

#[tokio::test]
async fn test_get_device_attribute_envelope_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "-3333",
            "ErrorMessage": "Device is offline"
        })))
        .mount(&server)
        .await;

    let result = client.get_device_attribute("doorstate").await;
    match result {
        Err(Error::Api { message, code, .. }) => {
            assert_eq!(message, "Device is offline");
            assert_eq!(code.as_deref(), Some("-3333"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_device_attribute_non_integer_value() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "0",
            "AttributeValue": "ajar"
        })))
        .mount(&server)
        .await;

    let result = client.get_device_attribute("doorstate").await;
    assert!(
        matches!(result, Err(Error::Deserialization { ref body, .. }) if body == "ajar"),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_unauthorized_maps_to_authentication() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.get_device_attribute("doorstate").await;
    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_is_transient() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client.get_device_attribute("doorstate").await.unwrap_err();
    assert!(err.is_transient(), "expected transient error, got: {err:?}");
}

#[tokio::test]
async fn test_malformed_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let result = client.get_device_attribute("doorstate").await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_set_device_attribute() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(PUT_PATH))
        .and(basic_auth("user@example.com", "hunter2"))
        .and(body_json(json!({
            "MyQDeviceId": "GW-1234",
            "AttributeName": "desireddoorstate",
            "AttributeValue": "1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "0",
            "ErrorMessage": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .set_device_attribute("desireddoorstate", 1)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_set_device_attribute_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(PUT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "216",
            "ErrorMessage": ""
        })))
        .mount(&server)
        .await;

    let err = client
        .set_device_attribute("desireddoorstate", 0)
        .await
        .unwrap_err();
    assert_eq!(err.return_code(), Some("216"));
    assert_eq!(err.to_string(), "MyQ API error: ReturnCode=216");
}

#[tokio::test]
async fn test_base_url_with_trailing_slash() {
    let server = MockServer::start().await;
    let config = ClientConfig {
        base_url: Url::parse(&format!("{}/", server.uri())).unwrap(),
        device_id: "GW-1234".into(),
        username: "user".into(),
        password: "pw".to_string().into(),
        transport: TransportConfig::default(),
    };
    let client = MyQClient::new(config).unwrap();

    Mock::given(method("GET"))
        .and(path(GET_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ReturnCode": "0",
            "AttributeValue": "1"
        })))
        .mount(&server)
        .await;

    assert_eq!(client.get_device_attribute("doorstate").await.unwrap(), 1);
}
