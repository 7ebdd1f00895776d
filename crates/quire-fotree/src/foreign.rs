//! Foreign XML fragments.
//!
//! [§ 6.6.6 fo:instream-foreign-object](https://www.w3.org/TR/xsl11/)
//!
//! "The fo:instream-foreign-object flow object is used for an inline graphic
//! or other "generic" object where the object data resides as descendants of
//! the fo:instream-foreign-object, typically as an XML element subtree in a
//! non-XSL namespace."
//!
//! Content in a non-FO namespace (SVG, MathML) is not interpreted here. It is
//! captured verbatim as an [`XmlElement`] tree and handed to whichever
//! renderer understands it.

use serde::Serialize;

/// One attribute of a foreign element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlAttribute {
    /// Namespace URI, empty for unprefixed attributes.
    pub namespace: String,
    /// Qualified name as written, e.g. `xlink:href`.
    pub name: String,
    /// Attribute value, already unescaped.
    pub value: String,
}

/// A child of a foreign element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum XmlContent {
    /// A nested element.
    Element(XmlElement),
    /// Character data.
    Text(String),
}

/// A foreign element and its sub-tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct XmlElement {
    /// Namespace URI.
    pub namespace: String,
    /// Local name, e.g. `svg`.
    pub local_name: String,
    /// Attributes in document order.
    pub attributes: Vec<XmlAttribute>,
    /// Children in document order.
    pub children: Vec<XmlContent>,
}

impl XmlElement {
    /// An element with no attributes or children.
    pub fn new(namespace: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            local_name: local_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Value of the attribute named `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            XmlContent::Element(element) => Some(element),
            XmlContent::Text(_) => None,
        })
    }

    /// Append character data, merging with a preceding text child.
    pub fn push_text(&mut self, text: &str) {
        if let Some(XmlContent::Text(last)) = self.children.last_mut() {
            last.push_str(text);
        } else {
            self.children.push(XmlContent::Text(text.to_string()));
        }
    }

    /// Concatenated character data of the whole sub-tree.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, into: &mut String) {
        for child in &self.children {
            match child {
                XmlContent::Element(element) => element.collect_text(into),
                XmlContent::Text(text) => into.push_str(text),
            }
        }
    }
}
