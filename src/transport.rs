//! HTTP transport for SOAP envelopes.

use std::fmt;

use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::StatusCode;
use reqwest::Client as ReqwestClient;
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::AxlResult;

/// Raw HTTP reply to a SOAP request.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status of the reply.
    pub status: StatusCode,
    /// Response body, decoded as text.
    pub body: String,
}

/// Delivers one SOAP envelope to the AXL service.
///
/// The default implementation is [`HttpTransport`]. Alternative transports
/// (recording proxies, stubs in tests) can be installed with
/// [`AxlClientBuilder::transport`](crate::AxlClientBuilder::transport).
#[async_trait]
pub trait SoapTransport: Send + Sync {
    /// Posts `envelope` with the given `SOAPAction` header value.
    async fn send(&self, soap_action: &str, envelope: String) -> AxlResult<TransportResponse>;

    /// The URL requests are sent to.
    fn endpoint(&self) -> &Url;
}

/// Sends envelopes over HTTPS with basic authentication.
pub struct HttpTransport {
    http_client: ReqwestClient,
    endpoint: Url,
    username: String,
    password: SecretString,
}

impl HttpTransport {
    pub(crate) fn new(
        http_client: ReqwestClient,
        endpoint: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http_client,
            endpoint,
            username,
            password,
        }
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("username", &self.username)
            .finish()
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn send(&self, soap_action: &str, envelope: String) -> AxlResult<TransportResponse> {
        let response = self
            .http_client
            .post(self.endpoint.clone())
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header(ACCEPT, "text/xml")
            .header("SOAPAction", soap_action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }

    fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}
