//! Tree and report output.

use owo_colors::OwoColorize;
use quire_builder::FoDocument;
use quire_fotree::{FoTree, NodeData, NodeId, NodeKind};
use quire_properties::{PropertyId, PropertyList};
use serde_json::{Map, Value, json};

/// Resolved properties worth showing for a node of `kind`, beyond the ones
/// it specifies itself.
fn key_properties(kind: NodeKind) -> &'static [PropertyId] {
    match kind {
        NodeKind::SimplePageMaster => &[PropertyId::PageWidth, PropertyId::PageHeight],
        kind if kind.is_block_level() => &[
            PropertyId::FontFamily,
            PropertyId::FontSize,
            PropertyId::StartIndent,
            PropertyId::EndIndent,
        ],
        kind if kind.carries_fonts() => &[PropertyId::FontFamily, PropertyId::FontSize],
        _ => &[],
    }
}

/// `name=value` pairs: explicit properties first, then the key properties
/// of the node's kind that were not specified.
fn properties(kind: NodeKind, list: &PropertyList) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = list
        .explicit()
        .map(|(id, value)| (id.to_string(), value.to_string()))
        .collect();
    for &id in key_properties(kind) {
        if list.get_explicit(id).is_some() {
            continue;
        }
        if let Ok(value) = list.get(id) {
            pairs.push((id.to_string(), value.to_string()));
        }
    }
    pairs
}

fn print_node(tree: &FoTree, id: NodeId, depth: usize) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(depth);
    match &node.data {
        NodeData::Document => println!("{prefix}{}", "#document".dimmed()),
        NodeData::Text(run) => {
            let display = run.text.replace('\n', "\\n").replace(' ', "\u{00B7}");
            println!("{prefix}\"{display}\"");
        }
        NodeData::Foreign(element) => {
            println!(
                "{prefix}{} {}",
                element.local_name.magenta(),
                format!("{{{}}}", element.namespace).dimmed()
            );
        }
        NodeData::Unknown {
            namespace,
            local_name,
        } => println!(
            "{prefix}{} {}",
            local_name.red(),
            format!("{{{namespace}}} (unknown)").dimmed()
        ),
        NodeData::FormattingObject => {
            let pairs = node
                .properties
                .as_deref()
                .map(|list| properties(node.kind, list))
                .unwrap_or_default();
            let attrs: Vec<String> = pairs
                .iter()
                .map(|(name, value)| format!("{}={}", name.cyan(), value))
                .collect();
            if attrs.is_empty() {
                println!("{prefix}{}", node.kind.qualified_name().bold());
            } else {
                println!(
                    "{prefix}{} {}",
                    node.kind.qualified_name().bold(),
                    attrs.join(" ")
                );
            }
        }
    }
    for &child in tree.children(id) {
        print_node(tree, child, depth + 1);
    }
}

/// Print the tree outline followed by the id and font summaries. Events
/// have already gone through the logger.
pub fn print_document(document: &FoDocument) {
    println!("=== Formatting Object Tree ===");
    print_node(&document.tree, document.tree.root(), 0);

    let defined: Vec<&str> = document.ids.defined().map(|(id, _)| id).collect();
    if !defined.is_empty() {
        println!("\n=== Ids ===");
        println!("  {}", defined.join(", "));
    }

    if !document.fonts.is_empty() {
        println!("\n=== Fonts ===");
        for font in document.fonts.iter() {
            #[allow(clippy::cast_precision_loss)]
            let points = font.size as f64 / 1000.0;
            println!(
                "  {} {} {} {points}pt",
                font.family, font.style, font.weight
            );
        }
    }

    if !document.events.is_empty() {
        let errors = document.errors().count();
        let line = format!(
            "{} events, {errors} errors (logged above)",
            document.events.len()
        );
        println!();
        if errors > 0 {
            println!("{}", line.red());
        } else {
            println!("{}", line.yellow());
        }
    }
}

fn node_json(tree: &FoTree, id: NodeId) -> Value {
    let Some(node) = tree.get(id) else {
        return Value::Null;
    };
    let mut object = Map::new();
    let _ = object.insert("kind".to_string(), json!(node.kind));
    match &node.data {
        NodeData::Text(run) => {
            let _ = object.insert("text".to_string(), json!(run.text));
        }
        NodeData::Foreign(element) => {
            let _ = object.insert("foreign".to_string(), json!(element));
        }
        NodeData::Unknown {
            namespace,
            local_name,
        } => {
            let _ = object.insert("namespace".to_string(), json!(namespace));
            let _ = object.insert("local-name".to_string(), json!(local_name));
        }
        NodeData::Document | NodeData::FormattingObject => {}
    }
    if let Some(list) = node.properties.as_deref() {
        let properties: Map<String, Value> = properties(node.kind, list)
            .into_iter()
            .map(|(name, value)| (name, Value::String(value)))
            .collect();
        let _ = object.insert("properties".to_string(), Value::Object(properties));
    }
    let children: Vec<Value> = tree
        .children(id)
        .iter()
        .map(|&child| node_json(tree, child))
        .collect();
    if !children.is_empty() {
        let _ = object.insert("children".to_string(), Value::Array(children));
    }
    Value::Object(object)
}

/// The whole document as JSON.
pub fn document_json(document: &FoDocument) -> Value {
    json!({
        "tree": node_json(&document.tree, document.tree.root()),
        "ids": document.ids,
        "fonts": document.fonts,
        "events": document.events,
    })
}

#[cfg(test)]
mod tests {
    use quire_builder::{Attribute, BuilderConfig, ContentHandler, FoTreeBuilder, NullHandler};
    use quire_common::CollectingListener;
    use quire_fotree::FO_NAMESPACE;

    use super::*;

    #[test]
    fn test_document_json() {
        let mut builder = FoTreeBuilder::from_config(BuilderConfig::default(), NullHandler);
        builder.set_listener(Box::new(CollectingListener::new()));
        builder.start_document().unwrap();
        builder
            .start_element(FO_NAMESPACE, "root", &[Attribute::new("font-size", "10pt")])
            .unwrap();
        builder.end_element(FO_NAMESPACE, "root").unwrap();
        let document = builder.end_document().unwrap();

        let value = document_json(&document);
        let root = &value["tree"]["children"][0];
        assert_eq!(root["kind"], "root");
        assert_eq!(root["properties"]["font-size"], "10pt");
        assert_eq!(value["events"].as_array().unwrap().len(), 2);
    }
}
