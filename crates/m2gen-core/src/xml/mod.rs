//! A small owned XML tree: just enough DOM to load templates, graft fragments
//! into them and write the result back out.

mod parse;
mod write;

use thiserror::Error;

#[derive(Debug, Error)]
#[error("{message}")]
pub struct XmlError {
    message: String,
}

impl XmlError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

/// A parsed document. Whitespace between elements is kept as text nodes so
/// that serializing an untouched document reproduces its layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub declaration: Option<Declaration>,
    pub root: Element,
}

impl Document {
    pub fn parse(text: &str) -> std::result::Result<Self, XmlError> {
        parse::parse_document(text)
    }

    pub fn to_xml_string(&self) -> crate::error::Result<String> {
        write::write_document(self)
    }
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        let mut element = Self::new(name);
        element.set_text(text);
        element
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            _ => None,
        })
    }

    /// First direct child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|el| el.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.elements_mut().find(|el| el.name == name)
    }

    /// First direct child element with the given name, appended if missing.
    pub fn child_or_insert(&mut self, name: &str) -> &mut Element {
        if self.child(name).is_none() {
            self.append(Element::new(name));
        }
        self.child_mut(name).expect("child was just ensured")
    }

    pub fn has_element_children(&self) -> bool {
        self.elements().next().is_some()
    }

    /// Concatenated text of this element and all of its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// Replace every child with a single text node.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.children.clear();
        if !text.is_empty() {
            self.children.push(Node::Text(text));
        }
    }

    pub fn append(&mut self, element: Element) {
        self.children.push(Node::Element(element));
    }

    /// Detach the first direct child element with the given name.
    pub fn remove_child(&mut self, name: &str) -> Option<Element> {
        let index = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(el) if el.name == name))?;
        match self.children.remove(index) {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Put `replacement` where the first direct child called `name` is,
    /// dropping that child. Returns `false` (and changes nothing) when there
    /// is no such child.
    pub fn replace_child(&mut self, name: &str, replacement: Vec<Element>) -> bool {
        let Some(index) = self
            .children
            .iter()
            .position(|node| matches!(node, Node::Element(el) if el.name == name))
        else {
            return false;
        };
        self.children
            .splice(index..=index, replacement.into_iter().map(Node::Element));
        true
    }

    /// This element or its first descendant with the given name, in document order.
    pub fn find(&self, name: &str) -> Option<&Element> {
        if self.name == name {
            return Some(self);
        }
        self.elements().find_map(|el| el.find(name))
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut Element> {
        if self.name == name {
            return Some(self);
        }
        self.elements_mut().find_map(|el| el.find_mut(name))
    }
}

/// Whether `name` can be written as an element name: an XML `Name` without
/// colons, so no namespace prefix is implied.
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if is_name_start_char(first) => chars.all(is_name_char),
        _ => false,
    }
}

fn is_name_start_char(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | '_'
        | 'a'..='z'
        | '\u{C0}'..='\u{D6}'
        | '\u{D8}'..='\u{F6}'
        | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}'
        | '\u{37F}'..='\u{1FFF}'
        | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}'
        | '\u{2C00}'..='\u{2FEF}'
        | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}'
        | '\u{FDF0}'..='\u{FFFD}'
        | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start_char(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

fn collect_text(element: &Element, out: &mut String) {
    for node in &element.children {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
            Node::Comment(_) => {}
        }
    }
}
