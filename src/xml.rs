//! Generic conversion between XML trees and `serde_json::Value`.
//!
//! AXL payloads are schema-defined structures owned by the server. The client
//! does not model them; it only maps elements to JSON objects and back.

use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use serde_json::{Map, Value};

use crate::{AxlError, AxlResult};

/// Key used for the text of an element that also carries attributes.
pub const TEXT_KEY: &str = "_value";

/// Prefix for an attribute whose name is also used by a child element. The
/// child keeps the plain key, e.g. `<phone name="a"><name>SEP1</name></phone>`
/// decodes to `{"@name": "a", "name": "SEP1"}`.
pub const ATTRIBUTE_PREFIX: &str = "@";

/// Returns true if `name` is a valid XML local name (an NCName).
pub(crate) fn is_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

/// A parsed XML element, keyed by local names.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
    pub text: String,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> AxlResult<Self> {
        let name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            let key = attr.key;
            // Namespace declarations are not data.
            if key.as_ref().starts_with(b"xmlns") {
                continue;
            }
            let key = String::from_utf8_lossy(key.local_name().as_ref()).into_owned();
            let value = attr
                .unescape_value()
                .map_err(quick_xml::Error::from)?
                .into_owned();
            attributes.push((key, value));
        }
        Ok(Self {
            name,
            attributes,
            ..Self::default()
        })
    }

    /// First direct child with the given local name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Value of the attribute with the given local name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Depth-first search for every descendant with the given local name.
    pub fn descendants<'a>(&'a self, name: &str, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == name {
                out.push(child);
            }
            child.descendants(name, out);
        }
    }

    /// Converts the element's content into JSON.
    ///
    /// Leaves become strings (or `null` when empty), repeated children become
    /// arrays, attributes become keys of the element's object. An attribute
    /// sharing its name with a child is stored under [`ATTRIBUTE_PREFIX`].
    pub fn to_value(&self) -> Value {
        if self.children.is_empty() && self.attributes.is_empty() {
            return if self.text.is_empty() {
                Value::Null
            } else {
                Value::String(self.text.clone())
            };
        }

        let mut map = Map::new();
        for (key, value) in &self.attributes {
            let key = if self.child(key).is_some() {
                format!("{ATTRIBUTE_PREFIX}{key}")
            } else {
                key.clone()
            };
            map.insert(key, Value::String(value.clone()));
        }
        for child in &self.children {
            let value = child.to_value();
            match map.get_mut(&child.name) {
                Some(Value::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = Value::Array(vec![first, value]);
                }
                None => {
                    map.insert(child.name.clone(), value);
                }
            }
        }
        if self.children.is_empty() && !self.text.is_empty() {
            map.insert(TEXT_KEY.to_string(), Value::String(self.text.clone()));
        }
        Value::Object(map)
    }
}

/// Parses a document and returns its root element.
pub(crate) fn parse_document(xml: &str) -> AxlResult<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        match reader.read_event()? {
            Event::Start(start) => stack.push(Element::from_start(&start)?),
            Event::Empty(start) => {
                let element = Element::from_start(&start)?;
                attach(&mut stack, &mut root, element);
            }
            Event::End(_) => {
                let mut element = stack.pop().ok_or_else(|| {
                    AxlError::MalformedResponse("unbalanced closing tag".to_string())
                })?;
                // Whitespace between child tags is indentation; leaf text is data.
                if !element.children.is_empty() && element.text.trim().is_empty() {
                    element.text.clear();
                }
                attach(&mut stack, &mut root, element);
            }
            Event::Text(text) => {
                if let Some(current) = stack.last_mut() {
                    current
                        .text
                        .push_str(&text.unescape().map_err(quick_xml::Error::from)?);
                }
            }
            Event::CData(data) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(AxlError::MalformedResponse("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| AxlError::MalformedResponse("empty document".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}

/// Appends `<name>…</name>` for `value` to `out`.
///
/// Arrays produce one element per item; `null` produces an empty element.
pub(crate) fn write_element(out: &mut String, name: &str, value: &Value) -> AxlResult<()> {
    if !is_name(name) {
        return Err(AxlError::InvalidArguments(format!(
            "'{name}' is not a valid element name"
        )));
    }
    match value {
        Value::Array(items) => {
            for item in items {
                if item.is_array() {
                    return Err(AxlError::InvalidArguments(format!(
                        "nested arrays are not representable for element '{name}'"
                    )));
                }
                write_element(out, name, item)?;
            }
        }
        Value::Null => {
            out.push('<');
            out.push_str(name);
            out.push_str("/>");
        }
        Value::Object(map) => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            write_children(out, map)?;
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
        scalar => {
            out.push('<');
            out.push_str(name);
            out.push('>');
            out.push_str(&escape(scalar_text(scalar).as_str()));
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
    Ok(())
}

/// Appends one element per entry of `map`, in insertion order.
pub(crate) fn write_children(out: &mut String, map: &Map<String, Value>) -> AxlResult<()> {
    for (key, value) in map {
        write_element(out, key, value)?;
    }
    Ok(())
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}
