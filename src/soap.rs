//! SOAP 1.1 envelope construction and decoding for AXL.

use serde_json::Value;

use crate::models::fault::SoapFault;
use crate::xml::{self, Element};
use crate::{AxlError, AxlResult};

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

/// Decoded body of a SOAP reply.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Reply {
    /// The operation's `return` element, if it had one.
    Return(Option<Value>),
    /// The server raised a fault.
    Fault(SoapFault),
}

/// Value of the `SOAPAction` header AXL expects for `operation`.
pub(crate) fn soap_action(version: &str, operation: &str) -> String {
    format!("\"CUCM:DB ver={version} {operation}\"")
}

/// Builds the request envelope for `operation` with `args` as its children.
///
/// `args` must be a JSON object (or `null` for operations without
/// parameters). The operation name and every key must be valid XML names.
pub(crate) fn build_envelope(namespace: &str, operation: &str, args: &Value) -> AxlResult<String> {
    if !xml::is_name(operation) {
        return Err(AxlError::UnknownOperation(operation.to_string()));
    }

    let mut out = String::with_capacity(256);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push_str(r#"<soapenv:Envelope xmlns:soapenv=""#);
    out.push_str(SOAP_ENV_NS);
    out.push_str(r#"" xmlns:ns=""#);
    out.push_str(&quick_xml::escape::escape(namespace));
    out.push_str(r#""><soapenv:Header/><soapenv:Body>"#);

    out.push_str("<ns:");
    out.push_str(operation);
    out.push('>');
    match args {
        Value::Object(map) => xml::write_children(&mut out, map)?,
        Value::Null => {}
        other => {
            return Err(AxlError::InvalidArguments(format!(
                "arguments for {operation} must be an object, got {}",
                json_kind(other)
            )))
        }
    }
    out.push_str("</ns:");
    out.push_str(operation);
    out.push('>');

    out.push_str("</soapenv:Body></soapenv:Envelope>");
    Ok(out)
}

/// Decodes a reply envelope into either the `return` value or a fault.
pub(crate) fn parse_reply(body: &str) -> AxlResult<Reply> {
    let envelope = xml::parse_document(body)?;
    if envelope.name != "Envelope" {
        return Err(AxlError::MalformedResponse(format!(
            "expected SOAP Envelope, found <{}>",
            envelope.name
        )));
    }
    let body = envelope
        .child("Body")
        .ok_or_else(|| AxlError::MalformedResponse("SOAP envelope has no Body".to_string()))?;
    let payload = body
        .children
        .first()
        .ok_or_else(|| AxlError::MalformedResponse("SOAP Body is empty".to_string()))?;

    if payload.name == "Fault" {
        return Ok(Reply::Fault(parse_fault(payload)));
    }
    Ok(Reply::Return(payload.child("return").map(Element::to_value)))
}

fn parse_fault(fault: &Element) -> SoapFault {
    let text = |name: &str| {
        fault
            .child(name)
            .map(|e| e.text.trim().to_string())
            .unwrap_or_default()
    };
    let mut parsed = SoapFault::new(text("faultcode"), text("faultstring"));

    if let Some(detail) = fault.child("detail") {
        if let Some(axl) = detail.child("axlError") {
            parsed.axl_code = axl
                .child("axlcode")
                .and_then(|c| c.text.trim().parse().ok());
            parsed.axl_message = axl
                .child("axlmessage")
                .map(|m| m.text.trim().to_string())
                .filter(|m| !m.is_empty());
        }
        parsed.detail = Some(detail.to_value());
    }
    parsed
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
