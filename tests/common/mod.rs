#![allow(dead_code)]

use axl_client::AxlClient;
use wiremock::matchers::{basic_auth, header, method, path};
use wiremock::MockBuilder;
use wiremock::{Mock, ResponseTemplate};

pub const AXL_PATH: &str = "/axl/";
pub const VERSION: &str = "12.5";
pub const USERNAME: &str = "axl-user";
pub const PASSWORD: &str = "axl-password";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a client pointed at the mock server, with no schema.
pub async fn setup_test_client(mock_server_uri: &str) -> AxlClient {
    init_logging();
    AxlClient::builder()
        .base_url(mock_server_uri)
        .username(USERNAME)
        .password(PASSWORD)
        .version(VERSION)
        .build()
        .await
        .expect("Failed to build AxlClient")
}

/// Matches an authenticated AXL POST for `operation`.
pub fn axl_request(operation: &str) -> MockBuilder {
    Mock::given(method("POST"))
        .and(path(AXL_PATH))
        .and(basic_auth(USERNAME, PASSWORD))
        .and(header(
            "SOAPAction",
            format!("\"CUCM:DB ver={VERSION} {operation}\"").as_str(),
        ))
}

/// A successful reply whose `return` element contains `return_xml`.
pub fn axl_return(operation: &str, return_xml: &str) -> ResponseTemplate {
    let body = format!(
        r#"<?xml version='1.0' encoding='UTF-8'?><soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><ns:{operation}Response xmlns:ns="http://www.cisco.com/AXL/API/{VERSION}"><return>{return_xml}</return></ns:{operation}Response></soapenv:Body></soapenv:Envelope>"#
    );
    ResponseTemplate::new(200).set_body_string(body)
}

/// A successful reply without a `return` element.
pub fn axl_no_return(operation: &str) -> ResponseTemplate {
    let body = format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><ns:{operation}Response xmlns:ns="http://www.cisco.com/AXL/API/{VERSION}"/></soapenv:Body></soapenv:Envelope>"#
    );
    ResponseTemplate::new(200).set_body_string(body)
}

/// An HTTP 500 reply carrying an AXL fault.
pub fn axl_fault(operation: &str, axl_code: i64, message: &str) -> ResponseTemplate {
    let body = format!(
        r#"<soapenv:Envelope xmlns:soapenv="http://schemas.xmlsoap.org/soap/envelope/"><soapenv:Body><soapenv:Fault><faultcode>soapenv:Server</faultcode><faultstring>{message}</faultstring><detail><axlError><axlcode>{axl_code}</axlcode><axlmessage>{message}</axlmessage><request>{operation}</request></axlError></detail></soapenv:Fault></soapenv:Body></soapenv:Envelope>"#
    );
    ResponseTemplate::new(500).set_body_string(body)
}
