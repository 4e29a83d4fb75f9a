use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A SOAP fault returned by the AXL service.
///
/// AXL faults carry a generic `faultcode`/`faultstring` pair and, for most
/// application errors, an `axlError` detail with a numeric code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoapFault {
    /// The SOAP `faultcode`, e.g. `soapenv:Server`.
    pub code: String,
    /// The SOAP `faultstring`.
    pub message: String,
    /// `detail/axlError/axlcode`, when present and numeric.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axl_code: Option<i64>,
    /// `detail/axlError/axlmessage`, when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub axl_message: Option<String>,
    /// The whole `detail` element as JSON.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl SoapFault {
    /// Creates a fault with only a code and a message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            axl_code: None,
            axl_message: None,
            detail: None,
        }
    }
}

impl fmt::Display for SoapFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axl_code {
            Some(code) => write!(f, "{} ({}, axl code {})", self.message, self.code, code),
            None => write!(f, "{} ({})", self.message, self.code),
        }
    }
}
