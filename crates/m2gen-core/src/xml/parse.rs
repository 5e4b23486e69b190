use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{Declaration, Document, Element, Node, XmlError};

pub(super) fn parse_document(text: &str) -> Result<Document, XmlError> {
    let mut reader = Reader::from_str(text);
    let mut declaration = None;
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| XmlError::new(e.to_string()))?;
        match event {
            Event::Decl(decl) => {
                let version = decl.version().map_err(|e| XmlError::new(e.to_string()))?;
                let encoding = match decl.encoding() {
                    Some(enc) => Some(lossy(&enc.map_err(|e| XmlError::new(e.to_string()))?)),
                    None => None,
                };
                let standalone = match decl.standalone() {
                    Some(sa) => Some(lossy(&sa.map_err(|e| XmlError::new(e.to_string()))?)),
                    None => None,
                };
                declaration = Some(Declaration {
                    version: lossy(&version),
                    encoding,
                    standalone,
                });
            }
            Event::Start(start) => {
                stack.push(open_element(&start)?);
            }
            Event::Empty(start) => {
                let element = open_element(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::new("unexpected closing tag"))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                if let Some(parent) = stack.last_mut() {
                    let text = text.unescape().map_err(|e| XmlError::new(e.to_string()))?;
                    push_text(parent, &text);
                }
            }
            Event::CData(data) => {
                if let Some(parent) = stack.last_mut() {
                    push_text(parent, &lossy(&data.into_inner()));
                }
            }
            Event::Comment(comment) => {
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(Node::Comment(lossy(&comment)));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(XmlError::new(format!("unclosed element <{}>", open.name)));
    }
    let root = root.ok_or_else(|| XmlError::new("document has no root element"))?;

    Ok(Document { declaration, root })
}

fn open_element(start: &BytesStart<'_>) -> Result<Element, XmlError> {
    let mut element = Element::new(lossy(start.name().as_ref()));
    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::new(e.to_string()))?;
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::new(e.to_string()))?;
        element
            .attributes
            .push((lossy(attr.key.as_ref()), value.into_owned()));
    }
    Ok(element)
}

fn attach(
    stack: &mut [Element],
    root: &mut Option<Element>,
    element: Element,
) -> Result<(), XmlError> {
    match stack.last_mut() {
        Some(parent) => parent.append(element),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(XmlError::new(format!(
                "second root element <{}>",
                element.name
            )))
        }
    }
    Ok(())
}

// Adjacent text (e.g. text followed by CDATA) is merged into one node.
fn push_text(parent: &mut Element, text: &str) {
    if let Some(Node::Text(last)) = parent.children.last_mut() {
        last.push_str(text);
    } else {
        parent.children.push(Node::Text(text.to_string()));
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}
