//! Drives a [`ContentHandler`] from XML text with `quick-xml`.

use std::borrow::Cow;

use anyhow::{Context, Result, bail};
use quick_xml::NsReader;
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quire_builder::{Attribute, ContentHandler};
use quire_common::Locator;

/// Byte offsets of line starts, for turning reader positions into
/// line:column locators.
struct LineIndex<'a> {
    input: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(input: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(input.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self { input, starts }
    }

    fn locate(&self, offset: usize) -> Locator {
        let offset = offset.min(self.input.len());
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];
        let column = self
            .input
            .get(start..offset)
            .map_or(0, |text| text.chars().count());
        Locator::new(line, column + 1)
    }
}

fn utf8(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).context("name is not valid UTF-8")
}

fn namespace_uri(resolved: &ResolveResult<'_>) -> Result<String> {
    match resolved {
        ResolveResult::Bound(namespace) => Ok(utf8(namespace.as_ref())?.to_string()),
        ResolveResult::Unbound => Ok(String::new()),
        ResolveResult::Unknown(prefix) => {
            bail!("undeclared namespace prefix \"{}\"", String::from_utf8_lossy(prefix))
        }
    }
}

/// The local name and attributes of a start tag. Namespace declarations are
/// not attributes.
fn element(reader: &NsReader<&[u8]>, start: &BytesStart<'_>) -> Result<(String, Vec<Attribute>)> {
    let local_name = utf8(start.local_name().as_ref())?.to_string();

    let mut attributes = Vec::new();
    for attribute in start.attributes() {
        let attribute = attribute?;
        let qualified_name = utf8(attribute.key.as_ref())?;
        if qualified_name == "xmlns" || qualified_name.starts_with("xmlns:") {
            continue;
        }
        let (resolved, _) = reader.resolve_attribute(attribute.key);
        let namespace = namespace_uri(&resolved)?;
        let value = attribute.unescape_value()?;
        attributes.push(Attribute::namespaced(namespace, qualified_name, value));
    }
    Ok((local_name, attributes))
}

/// Feed every event of `input` to `handler` and return what it produces.
///
/// # Errors
/// Malformed XML, or any error the handler returns.
pub fn parse<H: ContentHandler>(input: &str, handler: &mut H) -> Result<H::Output> {
    let mut reader = NsReader::from_str(input);
    let _ = reader.config_mut().trim_text(false);
    let lines = LineIndex::new(input);

    handler.start_document()?;
    loop {
        let offset = usize::try_from(reader.buffer_position()).unwrap_or(usize::MAX);
        let locator = lines.locate(offset);
        let (resolved, event) = reader
            .read_resolved_event()
            .with_context(|| format!("malformed XML at {locator}"))?;
        let namespace = namespace_uri(&resolved)?;
        handler.set_locator(locator);

        match event {
            Event::Start(start) => {
                let (local_name, attributes) = element(&reader, &start)?;
                handler.start_element(&namespace, &local_name, &attributes)?;
            }
            Event::Empty(start) => {
                let (local_name, attributes) = element(&reader, &start)?;
                handler.start_element(&namespace, &local_name, &attributes)?;
                handler.end_element(&namespace, &local_name)?;
            }
            Event::End(end) => {
                let local_name = utf8(end.local_name().as_ref())?.to_string();
                handler.end_element(&namespace, &local_name)?;
            }
            Event::Text(text) => {
                let text: Cow<'_, str> = text.unescape()?;
                handler.characters(&text)?;
            }
            Event::CData(data) => {
                handler.characters(utf8(&data)?)?;
            }
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes
            // carry nothing for the tree.
            _ => {}
        }
    }
    Ok(handler.end_document()?)
}
