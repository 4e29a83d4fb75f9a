use thiserror::Error;
pub use url::ParseError as UrlParseError;

use crate::models::fault::SoapFault;

/// Error types for the AXL client.
///
/// A SOAP fault returned by the server is not an error of the call itself: it
/// is reported inside [`AxlResponse`](crate::AxlResponse). The
/// [`AxlError::Fault`] variant only appears when a caller converts a response
/// into a `Result`.
#[derive(Error, Debug)]
pub enum AxlError {
    /// The server rejected the credentials at the HTTP level.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a status that carries no SOAP fault.
    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// Error parsing URL.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] UrlParseError),

    /// The response body is not well-formed XML.
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// The response is XML but not a SOAP envelope we understand.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The server returned a SOAP fault.
    #[error("SOAP fault: {0}")]
    Fault(SoapFault),

    /// The operation is not declared by the loaded WSDL.
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// The arguments cannot be encoded as an operation body.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// The WSDL could not be interpreted.
    #[error("Schema error: {0}")]
    SchemaError(String),

    /// Reading a local file failed.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),
}

/// Result type for AXL operations.
pub type AxlResult<T> = Result<T, AxlError>;
