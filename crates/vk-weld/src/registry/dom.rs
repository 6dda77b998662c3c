//! Minimal owned element tree built from `xml-rs` events
//!
//! The registry is small enough to hold in memory, and the ingestion code is
//! far simpler against a tree than against a raw event stream.

use crate::diagnostics::RegistryError;
use std::io::Read;
use xml::reader::{EventReader, XmlEvent};

/// A node inside an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An XML element with its attributes and children in document order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Look up an attribute by local name
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an attribute that must be present
    pub fn required_attr(&self, key: &str) -> Result<&str, RegistryError> {
        self.attr(key)
            .ok_or_else(|| RegistryError::missing_attribute(&self.name, key))
    }

    /// Child elements, skipping text
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|n| match n {
            Node::Element(e) => Some(e),
            Node::Text(_) => None,
        })
    }

    /// Child elements with the given tag
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements().filter(move |e| e.name == name)
    }

    /// First child element with the given tag
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    /// Text of the first child element with the given tag
    pub fn child_text(&self, name: &str) -> Option<String> {
        self.child(name).map(Element::text)
    }

    /// Text of a child element that must be present
    pub fn required_child_text(&self, name: &str) -> Result<String, RegistryError> {
        self.child_text(name)
            .ok_or_else(|| RegistryError::missing_element(&self.name, name))
    }

    /// All text below this element, concatenated in document order
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(None, &mut out);
        out
    }

    /// All text below this element, leaving out subtrees with tag `skip`
    pub fn text_without(&self, skip: &str) -> String {
        let mut out = String::new();
        self.collect_text(Some(skip), &mut out);
        out
    }

    fn collect_text(&self, skip: Option<&str>, out: &mut String) {
        for child in &self.children {
            match child {
                Node::Text(t) => out.push_str(t),
                Node::Element(e) if Some(e.name.as_str()) == skip => {}
                Node::Element(e) => e.collect_text(skip, out),
            }
        }
    }
}

/// Read a whole document into an element tree and return its root
pub fn parse_document<R: Read>(reader: R) -> Result<Element, RegistryError> {
    let mut stack: Vec<Element> = Vec::new();
    let mut root = None;

    for event in EventReader::new(reader) {
        match event? {
            XmlEvent::StartElement {
                name, attributes, ..
            } => stack.push(Element {
                name: name.local_name,
                attributes: attributes
                    .into_iter()
                    .map(|a| (a.name.local_name, a.value))
                    .collect(),
                children: Vec::new(),
            }),
            XmlEvent::EndElement { .. } => {
                let Some(done) = stack.pop() else { continue };
                match stack.last_mut() {
                    Some(parent) => parent.children.push(Node::Element(done)),
                    None => root = Some(done),
                }
            }
            XmlEvent::Characters(text) | XmlEvent::CData(text) | XmlEvent::Whitespace(text) => {
                if let Some(current) = stack.last_mut() {
                    current.children.push(Node::Text(text));
                }
            }
            _ => {}
        }
    }

    root.ok_or(RegistryError::EmptyDocument)
}
