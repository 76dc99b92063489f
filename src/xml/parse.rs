//! XML parsing into the element tree.
//!
//! Comments, doctypes, and processing instructions are dropped, and
//! whitespace-only text nodes are treated as formatting and skipped. Text
//! with content is preserved verbatim.

use super::XmlElement;
use crate::error::XmlError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// Parse a complete XML document into its root element.
///
/// Requires exactly one root element; anything before or after it other
/// than the declaration, comments, and whitespace is an error.
pub fn parse_document(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                if root.is_some() && stack.is_empty() {
                    return Err(XmlError::Malformed("multiple root elements".to_string()));
                }
                stack.push(element_from_start(&start)?);
            }
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::Malformed("unbalanced closing tag".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Ok(Event::Text(text)) => {
                let value = text
                    .unescape()
                    .map_err(|e| XmlError::Malformed(e.to_string()))?;
                append_text(&mut stack, value.as_ref())?;
            }
            Ok(Event::CData(data)) => {
                let value = String::from_utf8(data.into_inner().into_owned())
                    .map_err(|e| XmlError::Malformed(e.to_string()))?;
                append_text(&mut stack, &value)?;
            }
            Ok(Event::Decl(_)) | Ok(Event::Comment(_)) | Ok(Event::PI(_)) | Ok(Event::DocType(_)) => {}
            Ok(Event::Eof) => break,
            Err(e) => return Err(XmlError::Malformed(e.to_string())),
        }
    }

    if !stack.is_empty() {
        return Err(XmlError::Malformed("unclosed element".to_string()));
    }
    root.ok_or_else(|| XmlError::Malformed("no root element".to_string()))
}

fn element_from_start(start: &BytesStart<'_>) -> Result<XmlElement, XmlError> {
    let name = String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|e| XmlError::Malformed(e.to_string()))?;
    let mut element = XmlElement::new(name);
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|e| XmlError::Malformed(e.to_string()))?;
        let key = String::from_utf8(attribute.key.as_ref().to_vec())
            .map_err(|e| XmlError::Malformed(e.to_string()))?;
        let value = attribute
            .unescape_value()
            .map_err(|e| XmlError::Malformed(e.to_string()))?;
        element.attributes.push((key, value.into_owned()));
    }
    Ok(element)
}

/// Attach a completed element to its parent, or install it as the root.
fn attach(
    stack: &mut Vec<XmlElement>,
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_some() {
                return Err(XmlError::Malformed("multiple root elements".to_string()));
            }
            *root = Some(element);
        }
    }
    Ok(())
}

fn append_text(stack: &mut [XmlElement], value: &str) -> Result<(), XmlError> {
    // Whitespace between elements is formatting, not content.
    if value.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(current) => {
            match current.text.as_mut() {
                Some(existing) => existing.push_str(value),
                None => current.text = Some(value.to_string()),
            }
            Ok(())
        }
        None => Err(XmlError::Malformed(
            "text outside of root element".to_string(),
        )),
    }
}
