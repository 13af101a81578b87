//! Owned element tree used for both the mapping schema and the input document.
//!
//! The transformer never touches XML text directly; it walks [`XmlNode`]s.
//! [`XmlNode::parse`] is the glue that builds the tree with `roxmltree`.

use std::collections::BTreeMap;

/// A single XML element with its attributes and content.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlNode {
    /// Qualified tag name (`prefix:local` when the element has a prefix)
    pub tag: String,
    pub attributes: BTreeMap<String, String>,
    /// Text and element children, in document order
    pub content: Vec<XmlContent>,
}

/// One item of an element's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlContent {
    /// Character data or CDATA, untrimmed
    Text(String),
    Element(XmlNode),
}

impl XmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.content.push(XmlContent::Element(child));
        self
    }

    /// Append a text run after the content added so far.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.push_text(text.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Element children, skipping text.
    pub fn children(&self) -> impl Iterator<Item = &XmlNode> {
        self.content.iter().filter_map(|item| match item {
            XmlContent::Element(node) => Some(node),
            XmlContent::Text(_) => None,
        })
    }

    /// All text below this element, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for item in &self.content {
            match item {
                XmlContent::Text(text) => out.push_str(text),
                XmlContent::Element(child) => child.collect_text(out),
            }
        }
    }

    // Adjacent runs (text next to CDATA) are merged.
    fn push_text(&mut self, text: String) {
        match self.content.last_mut() {
            Some(XmlContent::Text(last)) => last.push_str(&text),
            _ => self.content.push(XmlContent::Text(text)),
        }
    }

    /// Parse an XML document and return its root element.
    pub fn parse(xml: &str) -> crate::Result<XmlNode> {
        let doc = roxmltree::Document::parse(xml)?;
        Ok(XmlNode::from_roxml(doc.root_element()))
    }

    fn from_roxml(node: roxmltree::Node<'_, '_>) -> XmlNode {
        let mut out = XmlNode::new(qualified_name(node));

        for attr in node.attributes() {
            out.attributes
                .insert(attr.name().to_string(), attr.value().to_string());
        }

        for child in node.children() {
            if child.is_element() {
                out.content
                    .push(XmlContent::Element(XmlNode::from_roxml(child)));
            } else if child.is_text() {
                if let Some(text) = child.text() {
                    out.push_text(text.to_string());
                }
            }
        }

        out
    }
}

impl std::str::FromStr for XmlNode {
    type Err = crate::MappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        XmlNode::parse(s)
    }
}

fn qualified_name(node: roxmltree::Node<'_, '_>) -> String {
    let tag = node.tag_name();
    let prefix = tag
        .namespace()
        .and_then(|ns| node.lookup_prefix(ns))
        .filter(|p| !p.is_empty());

    match prefix {
        Some(prefix) => format!("{}:{}", prefix, tag.name()),
        None => tag.name().to_string(),
    }
}
