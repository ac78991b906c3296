//! XML encoder.
//!
//! Document shape:
//! - root `<hash>` for mappings, `<array type="array">` for sequences,
//!   `<value>` for a bare scalar
//! - one child element per mapping entry, named by its key; keys that are
//!   not XML names become `<entry key="...">`
//! - sequence members become `<item>` children
//! - non-string scalars carry `type="integer|float|boolean"`, nulls
//!   are `nil="true"`
//! - empty mappings are `type="hash"`, so `<x/>` is always an empty string
//! - characters XML 1.0 cannot carry become U+FFFD

use std::borrow::Cow;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;

use super::{EncodeError, Encoder};

/// Indented XML document.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlEncoder;

impl Encoder for XmlEncoder {
    fn encode(&self, value: &Value) -> Result<Vec<u8>, EncodeError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        emit(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root = match value {
            Value::Object(_) => "hash",
            Value::Array(_) => "array",
            _ => "value",
        };
        write_element(&mut writer, root, None, value)?;

        let mut body = writer.into_inner();
        body.push(b'\n');
        Ok(body)
    }
}

fn emit(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), EncodeError> {
    writer
        .write_event(event)
        .map_err(|e| EncodeError::Xml(e.to_string()))
}

fn write_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    key: Option<&str>,
    value: &Value,
) -> Result<(), EncodeError> {
    let mut start = BytesStart::new(name);
    if let Some(key) = key {
        start.push_attribute(("key", &*xml_safe(key)));
    }

    match value {
        Value::Null => {
            start.push_attribute(("nil", "true"));
            emit(writer, Event::Empty(start))
        }
        Value::Bool(b) => {
            start.push_attribute(("type", "boolean"));
            write_text(writer, start, name, &b.to_string())
        }
        Value::Number(n) => {
            let kind = if n.is_f64() { "float" } else { "integer" };
            start.push_attribute(("type", kind));
            write_text(writer, start, name, &n.to_string())
        }
        Value::String(s) => write_text(writer, start, name, s),
        Value::Array(items) => {
            start.push_attribute(("type", "array"));
            if items.is_empty() {
                return emit(writer, Event::Empty(start));
            }
            emit(writer, Event::Start(start))?;
            for item in items {
                write_element(writer, "item", None, item)?;
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
        Value::Object(map) => {
            if map.is_empty() {
                start.push_attribute(("type", "hash"));
                return emit(writer, Event::Empty(start));
            }
            emit(writer, Event::Start(start))?;
            for (key, child) in map {
                if is_xml_name(key) {
                    write_element(writer, key, None, child)?;
                } else {
                    write_element(writer, "entry", Some(key), child)?;
                }
            }
            emit(writer, Event::End(BytesEnd::new(name)))
        }
    }
}

fn write_text(
    writer: &mut Writer<Vec<u8>>,
    start: BytesStart<'_>,
    name: &str,
    text: &str,
) -> Result<(), EncodeError> {
    if text.is_empty() {
        return emit(writer, Event::Empty(start));
    }
    emit(writer, Event::Start(start))?;
    emit(writer, Event::Text(BytesText::new(&xml_safe(text))))?;
    emit(writer, Event::End(BytesEnd::new(name)))
}

/// `text` with every character outside the XML 1.0 `Char` production
/// replaced.
fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| if is_xml_char(c) { c } else { char::REPLACEMENT_CHARACTER })
            .collect(),
    )
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// ASCII subset of the XML `Name` production.
fn is_xml_name(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}
