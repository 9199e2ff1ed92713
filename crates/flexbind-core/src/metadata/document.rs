//! Minimal XML element tree for bridgesupport documents
//!
//! Only elements and their attributes matter to the loader; text, comments
//! and processing instructions are skipped.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An XML element with its attributes and child elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Look up an attribute value
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Look up an attribute that must be present
    pub fn required_attr(&self, key: &str) -> Result<&str> {
        self.attr(key).ok_or_else(|| Error::MissingAttribute {
            element: self.name.clone(),
            attribute: key.to_string(),
        })
    }

    /// Direct children with the given element name, in document order
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

/// A parsed metadata document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataDocument {
    root: XmlElement,
}

impl MetadataDocument {
    /// Root element name of bridgesupport documents
    pub const ROOT: &'static str = "signatures";

    /// Parse document text
    pub fn parse(text: &str) -> Result<Self> {
        let mut reader = Reader::from_str(text);
        reader.config_mut().trim_text(true);

        // Open elements, innermost last
        let mut stack: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let event = reader.read_event().map_err(|e| {
                Error::document(format!("at byte {}: {}", reader.buffer_position(), e))
            })?;

            match event {
                Event::Start(ref start) => {
                    stack.push(element_from(start)?);
                }
                Event::Empty(ref start) => {
                    let element = element_from(start)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| Error::document("unexpected closing tag"))?;
                    attach(&mut stack, &mut root, element)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(Error::document(format!("unclosed <{}> element", open.name)));
        }

        let root = root.ok_or_else(|| Error::MissingRoot {
            expected: Self::ROOT.to_string(),
        })?;
        if root.name != Self::ROOT {
            return Err(Error::MissingRoot {
                expected: Self::ROOT.to_string(),
            });
        }

        Ok(Self { root })
    }

    /// The `signatures` root element
    pub fn root(&self) -> &XmlElement {
        &self.root
    }
}

fn element_from(start: &BytesStart<'_>) -> Result<XmlElement> {
    let name = String::from_utf8_lossy(start.name().as_ref()).to_string();
    let mut attributes = Vec::new();

    for attr in start.attributes() {
        let attr = attr.map_err(|e| Error::document(format!("in <{}>: {}", name, e)))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| Error::document(format!("in <{}>: {}", name, e)))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(Error::document(format!(
            "second top-level element <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}
