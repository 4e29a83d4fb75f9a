use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use axl_client::{AxlClient, AxlError, AxlResult, Entity, SoapTransport, TransportResponse};
use common::{axl_fault, axl_request, axl_return, setup_test_client, AXL_PATH};

/// Records every request and replies with a canned response.
struct StubTransport {
    endpoint: Url,
    reply: TransportResponse,
    sent: Mutex<Vec<(String, String)>>,
}

impl StubTransport {
    fn new(status: StatusCode, body: &str) -> Arc<Self> {
        Arc::new(Self {
            endpoint: Url::parse("https://stub.invalid:8443/axl/").unwrap(),
            reply: TransportResponse {
                status,
                body: body.to_string(),
            },
            sent: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SoapTransport for StubTransport {
    async fn send(&self, soap_action: &str, envelope: String) -> AxlResult<TransportResponse> {
        self.sent
            .lock()
            .unwrap()
            .push((soap_action.to_string(), envelope));
        Ok(self.reply.clone())
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

async fn stub_client(transport: Arc<StubTransport>) -> AxlClient {
    AxlClient::builder()
        .username("stub")
        .password("stub")
        .version("14.0")
        .transport(transport)
        .build()
        .await
        .unwrap()
}

#[tokio::test]
async fn test_stub_transport_receives_envelope() {
    let transport = StubTransport::new(
        StatusCode::OK,
        r#"<Envelope><Body><getSipProfileResponse><return><sipProfile><name>Standard SIP Profile</name></sipProfile></return></getSipProfileResponse></Body></Envelope>"#,
    );
    let client = stub_client(Arc::clone(&transport)).await;

    let reply = client
        .entity(Entity::SIP_PROFILE)
        .get("Standard SIP Profile")
        .send()
        .await
        .unwrap();

    assert!(reply.success);
    assert_eq!(reply.response, Some(json!({ "name": "Standard SIP Profile" })));
    assert_eq!(client.endpoint().as_str(), "https://stub.invalid:8443/axl/");

    let sent = transport.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let (soap_action, envelope) = &sent[0];
    assert_eq!(soap_action, "\"CUCM:DB ver=14.0 getSipProfile\"");
    assert!(envelope.contains(r#"xmlns:ns="http://www.cisco.com/AXL/API/14.0""#));
    assert!(envelope.contains("<ns:getSipProfile><name>Standard SIP Profile</name></ns:getSipProfile>"));
}

#[tokio::test]
async fn test_authentication_rejection_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AXL_PATH))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let result = client.phones().get("SEP1").send().await;

    match result {
        Err(AxlError::AuthenticationError(msg)) => assert!(msg.contains("401")),
        other => panic!("Expected AuthenticationError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_without_fault_is_an_error() {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;
    axl_request("listPhone")
        .respond_with(ResponseTemplate::new(503).set_body_string("AXL service unavailable"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;

    match client.phones().get("SEP1").send().await {
        Err(AxlError::HttpStatus { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "Internal Server Error");
        }
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
    match client.phones().list().send().await {
        Err(AxlError::HttpStatus { status, .. }) => assert_eq!(status, 503),
        other => panic!("Expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_reply_is_an_error() {
    let mock_server = MockServer::start().await;

    axl_request("getPhone")
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>login</body></html>"))
        .mount(&mock_server)
        .await;
    axl_request("getLine")
        .respond_with(ResponseTemplate::new(200).set_body_string("<Envelope><Body>"))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;

    assert!(matches!(
        client.phones().get("SEP1").send().await,
        Err(AxlError::MalformedResponse(_))
    ));
    assert!(client.lines().get("1000").send().await.is_err());
}

#[tokio::test]
async fn test_connection_failure_is_an_error() {
    // Reserve a port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = setup_test_client(&format!("http://127.0.0.1:{port}")).await;
    let result = client.phones().get("SEP1").send().await;
    assert!(matches!(result, Err(AxlError::HttpError(_))));
}

#[tokio::test]
async fn test_fault_never_raises() {
    let mock_server = MockServer::start().await;

    axl_request("removeLine")
        .respond_with(axl_fault(
            "removeLine",
            4022,
            "Cannot delete a directory number that is associated with a device",
        ))
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let reply = client
        .lines()
        .remove("1000")
        .partition("Internal-PT")
        .send()
        .await
        .unwrap();

    assert!(!reply.success);
    assert_eq!(reply.error.as_ref().and_then(|f| f.axl_code), Some(4022));

    match reply.into_result() {
        Err(AxlError::Fault(fault)) => assert!(fault.message.contains("directory number")),
        other => panic!("Expected Fault, got {other:?}"),
    }
}

#[tokio::test]
async fn test_headers_sent_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(AXL_PATH))
        .and(header("content-type", "text/xml; charset=utf-8"))
        .and(header("SOAPAction", "\"CUCM:DB ver=12.5 getCCMVersion\""))
        .respond_with(axl_return(
            "getCCMVersion",
            "<componentVersion><version>12.5.1.11900(146)</version></componentVersion>",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = setup_test_client(&mock_server.uri()).await;
    let version = client.system().ccm_version().version().await.unwrap();
    assert_eq!(version, "12.5.1.11900(146)");
}
