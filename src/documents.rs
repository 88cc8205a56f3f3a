//! Minimal XML document tree
//!
//! Documents are read with `quick-xml` into a tree of [`Element`]s that the
//! [`crate::walker`] drives through the content-model automata. Every element
//! carries its in-scope namespace bindings.

use crate::error::{Error, Result};
use crate::names::{split_qname, QName};
use crate::namespaces::NamespaceContext;
use indexmap::IndexMap;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// XML Element in the document tree
#[derive(Debug, Clone)]
pub struct Element {
    /// Element name as written, e.g. `xs:element`
    pub name: String,
    /// Attributes in document order, keyed by the name as written
    pub attributes: IndexMap<String, String>,
    /// Text content (if any)
    pub text: Option<String>,
    /// Child elements
    pub children: Vec<Element>,
    /// In-scope namespace bindings
    pub namespaces: NamespaceContext,
}

impl Element {
    /// Create a new element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: IndexMap::new(),
            text: None,
            children: Vec::new(),
            namespaces: NamespaceContext::new(),
        }
    }

    /// Get the local name of the element
    pub fn local_name(&self) -> &str {
        split_qname(&self.name).1
    }

    /// Get the prefix of the element name, if any
    pub fn prefix(&self) -> Option<&str> {
        split_qname(&self.name).0
    }

    /// Resolve the element name against its in-scope namespaces
    pub fn qname(&self) -> Result<QName> {
        self.namespaces.resolve_qname(&self.name)
    }

    /// Get an attribute value by name as written
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }

    /// Add a child element
    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Find child elements by local name
    pub fn find_children(&self, local_name: &str) -> Vec<&Element> {
        self.children
            .iter()
            .filter(|e| e.local_name() == local_name)
            .collect()
    }
}

/// XML Document representation
#[derive(Debug, Default)]
pub struct Document {
    /// Root element of the document
    pub root: Option<Element>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an XML document from a string
    pub fn from_string(xml: &str) -> Result<Self> {
        Self::parse(xml.as_bytes())
    }

    /// Read and parse an XML document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Parse an XML document from bytes
    pub fn parse(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        reader.trim_text(true);

        let mut doc = Document::new();
        let mut element_stack: Vec<Element> = Vec::new();
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => {
                    let element = Self::parse_element(&e, element_stack.last())?;
                    element_stack.push(element);
                }
                Ok(Event::End(_)) => {
                    if let Some(current) = element_stack.pop() {
                        Self::attach(&mut doc, &mut element_stack, current)?;
                    }
                }
                Ok(Event::Empty(e)) => {
                    let element = Self::parse_element(&e, element_stack.last())?;
                    Self::attach(&mut doc, &mut element_stack, element)?;
                }
                Ok(Event::Text(e)) => {
                    if let Some(current) = element_stack.last_mut() {
                        let text = e
                            .unescape()
                            .map_err(|e| Error::Xml(format!("Failed to unescape text: {}", e)))?
                            .to_string();
                        if !text.trim().is_empty() {
                            current.text = Some(text);
                        }
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(Error::Xml(format!(
                        "Error parsing XML at position {}: {}",
                        reader.buffer_position(),
                        e
                    )))
                }
                _ => {} // comments, processing instructions, doctype
            }
            buf.clear();
        }

        if !element_stack.is_empty() {
            return Err(Error::Xml("Unexpected end of document".to_string()));
        }

        Ok(doc)
    }

    fn attach(doc: &mut Document, stack: &mut [Element], element: Element) -> Result<()> {
        if let Some(parent) = stack.last_mut() {
            parent.add_child(element);
        } else if doc.root.is_none() {
            doc.root = Some(element);
        } else {
            return Err(Error::Xml("Document has more than one root element".to_string()));
        }
        Ok(())
    }

    /// Parse element from BytesStart event, inheriting the parent's namespaces
    fn parse_element(start: &BytesStart, parent: Option<&Element>) -> Result<Element> {
        let name_bytes = start.name();
        let name = std::str::from_utf8(name_bytes.as_ref())
            .map_err(|e| Error::Xml(format!("Invalid element name: {}", e)))?;

        let mut element = Element::new(name);
        if let Some(parent) = parent {
            element.namespaces = parent.namespaces.clone();
        }

        for attr_result in start.attributes() {
            let attr = attr_result
                .map_err(|e| Error::Xml(format!("Failed to parse attribute: {}", e)))?;

            let attr_name = std::str::from_utf8(attr.key.as_ref())
                .map_err(|e| Error::Xml(format!("Invalid attribute name: {}", e)))?;

            let attr_value = attr
                .unescape_value()
                .map_err(|e| Error::Xml(format!("Failed to unescape attribute value: {}", e)))?
                .to_string();

            let declared = if attr_name == "xmlns" {
                Some(element.namespaces.set_default_namespace(&attr_value))
            } else if let Some(prefix) = attr_name.strip_prefix("xmlns:") {
                Some(element.namespaces.add_prefix(prefix, &attr_value))
            } else {
                None
            };

            if let Some(declared) = declared {
                declared.map_err(|e| {
                    Error::Xml(format!("Invalid namespace declaration '{}': {}", attr_name, e))
                })?;
            } else {
                element.attributes.insert(attr_name.to_string(), attr_value);
            }
        }

        Ok(element)
    }

    /// Get the root element
    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }
}
