//! Deterministic rendering of the element tree.
//!
//! Output is normalized for the target consumer: a fixed declaration
//! line, four spaces of indentation per nesting level, text-only elements
//! rendered inline, empty elements collapsed to the self-closing form,
//! and a trailing newline. Struct fields and `Vec`s drive emission order,
//! so the same tree always renders to the same bytes.

use super::XmlElement;
use crate::error::XmlError;
use quick_xml::escape::escape;

/// Declaration line written ahead of every document.
pub const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;

/// One indent unit per nesting level.
const INDENT: &str = "    ";

/// Render a document: declaration, indented body, trailing newline.
pub fn render_document(root: &XmlElement) -> Result<String, XmlError> {
    let mut out = String::with_capacity(1024);
    out.push_str(XML_DECLARATION);
    out.push('\n');
    render_element(&mut out, root, 0)?;
    out.push('\n');
    Ok(out)
}

fn render_element(out: &mut String, element: &XmlElement, depth: usize) -> Result<(), XmlError> {
    validate_name(&element.name)?;
    for _ in 0..depth {
        out.push_str(INDENT);
    }
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        validate_name(key)?;
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        out.push_str(&escape(value.as_str()));
        out.push('"');
    }

    let text = element.text.as_deref().unwrap_or("");
    if element.children.is_empty() && text.is_empty() {
        // Empty open/close pairs collapse to the self-closing form.
        out.push_str("/>");
        return Ok(());
    }

    out.push('>');
    if element.children.is_empty() {
        // Text-only elements render inline.
        out.push_str(&escape(text));
    } else {
        if !text.is_empty() {
            out.push_str(&escape(text));
        }
        for child in &element.children {
            out.push('\n');
            render_element(out, child, depth + 1)?;
        }
        out.push('\n');
        for _ in 0..depth {
            out.push_str(INDENT);
        }
    }
    out.push_str("</");
    out.push_str(&element.name);
    out.push('>');
    Ok(())
}

/// Element and attribute names come from parsed input or from this crate's
/// own builders; a name that would produce unparseable output is the one
/// structural encode failure.
fn validate_name(name: &str) -> Result<(), XmlError> {
    let starts_ok = name
        .chars()
        .next()
        .map(|c| c.is_ascii_alphabetic() || c == '_')
        .unwrap_or(false);
    let chars_ok = name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if starts_ok && chars_ok {
        Ok(())
    } else {
        Err(XmlError::InvalidName(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::parse_document;

    #[test]
    fn test_render_indented_body_with_declaration() {
        let doc = XmlElement::new("Root")
            .with_child(XmlElement::new("Child").with_attribute("a", "1"))
            .with_child(XmlElement::new("Empty"));

        let rendered = render_document(&doc).unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n\
                        <Root>\n    <Child a=\"1\"/>\n    <Empty/>\n</Root>\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_empty_element_self_closes() {
        let rendered = render_document(&XmlElement::new("SharedFlows")).unwrap();
        assert!(rendered.contains("<SharedFlows/>"));
        assert!(!rendered.contains("</SharedFlows>"));
    }

    #[test]
    fn test_render_text_only_element_inline() {
        let doc = XmlElement::new("Root")
            .with_child(XmlElement::new("CreatedAt").with_text("1465867547000"));
        let rendered = render_document(&doc).unwrap();
        assert!(rendered.contains("    <CreatedAt>1465867547000</CreatedAt>\n"));
    }

    #[test]
    fn test_render_escapes_text_and_attributes() {
        let doc = XmlElement::new("Note")
            .with_attribute("label", "a<b & \"c\"")
            .with_text("1 < 2 & 3");
        let rendered = render_document(&doc).unwrap();
        assert!(rendered.contains("1 &lt; 2 &amp; 3"));
        assert!(!rendered.contains("a<b"));

        // Escaping must survive a round trip unchanged.
        let reparsed = parse_document(&rendered).unwrap();
        assert_eq!(reparsed.attribute("label"), Some("a<b & \"c\""));
        assert_eq!(reparsed.text.as_deref(), Some("1 < 2 & 3"));
    }

    #[test]
    fn test_render_deterministic() {
        let doc = XmlElement::new("Manifest")
            .with_attribute("name", "manifest")
            .with_child(XmlElement::new("Policies").with_child(
                XmlElement::new("VersionInfo").with_attribute("resourceName", "Verify-API-Key"),
            ));
        assert_eq!(
            render_document(&doc).unwrap(),
            render_document(&doc).unwrap()
        );
    }

    #[test]
    fn test_render_round_trip_stable() {
        let doc = XmlElement::new("Root")
            .with_child(XmlElement::new("A").with_attribute("x", "1").with_text("t"))
            .with_child(XmlElement::new("B"));
        let first = render_document(&doc).unwrap();
        let reparsed = parse_document(&first).unwrap();
        let second = render_document(&reparsed).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_rejects_invalid_name() {
        let doc = XmlElement::new("bad name");
        assert!(matches!(
            render_document(&doc),
            Err(XmlError::InvalidName(_))
        ));

        let doc = XmlElement::new("Ok").with_attribute("1bad", "v");
        assert!(matches!(
            render_document(&doc),
            Err(XmlError::InvalidName(_))
        ));
    }
}
