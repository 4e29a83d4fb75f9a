use serde::Serialize;
use serde_json::Value;

use crate::models::fault::SoapFault;
use crate::operations::Operation;
use crate::{AxlError, AxlResult};

/// Uniform result envelope returned by every AXL operation.
///
/// - `success` is true only when the operation's `return` element was truthy.
/// - `response` is the documented sub-field of `return` (for example `phone`
///   for `getPhone`) or the whole `return` for action operations.
/// - `error` holds the SOAP fault when the server raised one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxlResponse {
    /// Whether the operation returned a non-empty result.
    pub success: bool,

    /// The unwrapped payload, if any.
    pub response: Option<Value>,

    /// The SOAP fault raised by the server, if any.
    pub error: Option<SoapFault>,
}

impl AxlResponse {
    /// Envelope for a call whose `return` was empty or absent.
    pub fn empty() -> Self {
        Self {
            success: false,
            response: None,
            error: None,
        }
    }

    /// Envelope for a call that raised a SOAP fault.
    pub fn from_fault(fault: SoapFault) -> Self {
        Self {
            success: false,
            response: None,
            error: Some(fault),
        }
    }

    /// Shapes the `return` element of `operation` into an envelope.
    pub fn from_return(operation: &Operation, value: Option<Value>) -> Self {
        let value = match value {
            Some(value) if is_truthy(&value) => value,
            _ => return Self::empty(),
        };

        let response = match operation.response_field() {
            Some(field) => match value {
                Value::Object(mut map) => map.remove(field),
                _ => None,
            },
            None => Some(value),
        };

        let response = if operation.is_many() {
            Some(into_array(response))
        } else {
            response
        };

        Self {
            success: true,
            response,
            error: None,
        }
    }

    /// Returns true if the server raised a SOAP fault.
    pub fn is_fault(&self) -> bool {
        self.error.is_some()
    }

    /// Converts the envelope into a `Result`, turning a fault into
    /// [`AxlError::Fault`].
    pub fn into_result(self) -> AxlResult<Option<Value>> {
        match self.error {
            Some(fault) => Err(AxlError::Fault(fault)),
            None => Ok(self.response),
        }
    }
}

/// Truthiness of a `return` value: absent, null and empty values are false.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(b) => *b,
        Value::Number(_) => true,
    }
}

fn into_array(value: Option<Value>) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(items),
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(other) => Value::Array(vec![other]),
    }
}
