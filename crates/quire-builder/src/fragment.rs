//! Capture of foreign sub-trees.
//!
//! When the builder meets an element from a foreign namespace (SVG, MathML)
//! it stops interpreting events and hands the whole sub-tree to a
//! [`FragmentBuilder`], which records it verbatim.

use quire_fotree::{XmlAttribute, XmlContent, XmlElement};

use crate::error::BuildError;
use crate::handler::{Attribute, ContentHandler};

/// Builds an [`XmlElement`] tree from markup events.
#[derive(Debug, Clone)]
pub struct FragmentBuilder {
    /// Open elements, outermost first.
    open: Vec<XmlElement>,
    /// The root once its end event has been seen.
    finished: Option<XmlElement>,
}

impl FragmentBuilder {
    /// Start capturing at a root element whose start event has already
    /// been seen.
    #[must_use]
    pub fn new(namespace: &str, local_name: &str, attributes: &[Attribute]) -> Self {
        Self {
            open: vec![element(namespace, local_name, attributes)],
            finished: None,
        }
    }

    /// Returns true once the root element has been closed.
    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.finished.is_some()
    }

    /// Number of elements currently open, including the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }
}

fn element(namespace: &str, local_name: &str, attributes: &[Attribute]) -> XmlElement {
    let mut element = XmlElement::new(namespace, local_name);
    element.attributes = attributes
        .iter()
        .map(|attr| XmlAttribute {
            namespace: attr.namespace.clone(),
            name: attr.qualified_name.clone(),
            value: attr.value.clone(),
        })
        .collect();
    element
}

impl ContentHandler for FragmentBuilder {
    type Output = XmlElement;

    fn start_document(&mut self) -> Result<(), BuildError> {
        Ok(())
    }

    fn start_element(
        &mut self,
        namespace: &str,
        local_name: &str,
        attributes: &[Attribute],
    ) -> Result<(), BuildError> {
        if self.finished.is_some() {
            return Err(BuildError::EventStream(format!(
                "<{local_name}> after the end of the foreign fragment"
            )));
        }
        self.open.push(element(namespace, local_name, attributes));
        Ok(())
    }

    fn characters(&mut self, text: &str) -> Result<(), BuildError> {
        match self.open.last_mut() {
            Some(current) => {
                current.push_text(text);
                Ok(())
            }
            None => Err(BuildError::EventStream(
                "character data after the end of the foreign fragment".to_string(),
            )),
        }
    }

    fn end_element(&mut self, namespace: &str, local_name: &str) -> Result<(), BuildError> {
        let Some(closed) = self.open.pop() else {
            return Err(BuildError::EventStream(format!(
                "</{local_name}> without a matching start tag"
            )));
        };
        if closed.namespace != namespace || closed.local_name != local_name {
            return Err(BuildError::EventStream(format!(
                "</{local_name}> does not match <{}>",
                closed.local_name
            )));
        }

        match self.open.last_mut() {
            Some(parent) => parent.children.push(XmlContent::Element(closed)),
            None => self.finished = Some(closed),
        }
        Ok(())
    }

    fn end_document(&mut self) -> Result<XmlElement, BuildError> {
        self.finished.take().ok_or_else(|| {
            let open = self
                .open
                .iter()
                .map(|element| element.local_name.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            BuildError::EventStream(format!("unclosed foreign elements: {open}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SVG: &str = "http://www.w3.org/2000/svg";

    #[test]
    fn test_captures_nested_elements_and_text() {
        let mut fragment = FragmentBuilder::new(SVG, "svg", &[Attribute::new("width", "10")]);
        fragment
            .start_element(SVG, "text", &[Attribute::new("x", "1")])
            .unwrap();
        fragment.characters("Hi").unwrap();
        fragment.end_element(SVG, "text").unwrap();
        assert!(!fragment.is_complete());
        fragment.end_element(SVG, "svg").unwrap();
        assert!(fragment.is_complete());

        let svg = fragment.end_document().unwrap();
        assert_eq!(svg.attribute("width"), Some("10"));
        assert_eq!(svg.elements().next().unwrap().attribute("x"), Some("1"));
        assert_eq!(svg.text_content(), "Hi");
    }

    #[test]
    fn test_mismatched_end_is_rejected() {
        let mut fragment = FragmentBuilder::new(SVG, "svg", &[]);
        fragment.start_element(SVG, "g", &[]).unwrap();
        assert!(matches!(
            fragment.end_element(SVG, "svg"),
            Err(BuildError::EventStream(_))
        ));
    }

    #[test]
    fn test_unfinished_fragment() {
        let mut fragment = FragmentBuilder::new(SVG, "svg", &[]);
        assert!(matches!(
            fragment.end_document(),
            Err(BuildError::EventStream(_))
        ));
    }
}
