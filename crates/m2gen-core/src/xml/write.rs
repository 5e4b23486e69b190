use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Document, Element, Node};
use crate::error::{M2genError, Result};

/// Serialize without re-indenting: whatever whitespace the tree carries is
/// written back verbatim, and fragments grafted in without whitespace stay
/// on one line.
pub(super) fn write_document(doc: &Document) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    if let Some(decl) = &doc.declaration {
        writer
            .write_event(Event::Decl(BytesDecl::new(
                &decl.version,
                decl.encoding.as_deref(),
                decl.standalone.as_deref(),
            )))
            .map_err(serialize_error)?;
        writer.get_mut().push(b'\n');
    }

    write_element(&mut writer, &doc.root)?;
    writer.get_mut().push(b'\n');

    String::from_utf8(writer.into_inner()).map_err(serialize_error)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &Element) -> Result<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), value.as_str()));
    }

    if element.children.is_empty() {
        return writer
            .write_event(Event::Empty(start))
            .map_err(serialize_error);
    }

    writer
        .write_event(Event::Start(start))
        .map_err(serialize_error)?;
    for node in &element.children {
        match node {
            Node::Element(child) => write_element(writer, child)?,
            Node::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(serialize_error)?,
            Node::Comment(text) => writer
                .write_event(Event::Comment(BytesText::from_escaped(text.as_str())))
                .map_err(serialize_error)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(serialize_error)
}

fn serialize_error(e: impl std::fmt::Display) -> M2genError {
    M2genError::Serialize {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(text: &str) -> String {
        Document::parse(text).unwrap().to_xml_string().unwrap()
    }

    #[test]
    fn untouched_document_keeps_layout() {
        let text = "<settings>\n    <servers/>\n    <mirrors>\n    </mirrors>\n</settings>\n";
        assert_eq!(round_trip(text), text);
    }

    #[test]
    fn childless_elements_are_self_closing() {
        assert_eq!(round_trip("<servers></servers>"), "<servers/>\n");
    }

    #[test]
    fn declaration_is_written_first() {
        let out = round_trip(r#"<?xml version="1.0" encoding="UTF-8"?><settings/>"#);
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<settings/>\n"
        );
    }

    #[test]
    fn text_is_escaped() {
        let mut doc = Document::parse("<url/>").unwrap();
        doc.root.set_text("a<b&c");
        let out = doc.to_xml_string().unwrap();
        assert_eq!(out, "<url>a&lt;b&amp;c</url>\n");
    }

    #[test]
    fn placeholders_are_not_expanded() {
        let mut doc = Document::parse("<password/>").unwrap();
        doc.root.set_text("${env.GITHUB_TOKEN}");
        assert_eq!(
            doc.to_xml_string().unwrap(),
            "<password>${env.GITHUB_TOKEN}</password>\n"
        );
    }
}
