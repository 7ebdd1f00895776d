//! Integration tests for the formatting-object tree builder.
//!
//! Each test drives a [`FoTreeBuilder`] with the events a namespace-aware
//! reader would produce for a small document.

use quire_builder::{
    Attribute, BuildError, BuilderConfig, BuilderState, ContentHandler, FoTreeBuilder,
    FontTriplet, Notification, RecordingHandler, SVG_NAMESPACE,
};
use quire_common::{CollectingListener, EventKind, Severity, ValidationMode};
use quire_fotree::{FO_NAMESPACE, NodeData, NodeId, NodeKind};

type Builder = FoTreeBuilder<RecordingHandler>;

fn builder(mode: ValidationMode) -> Builder {
    let config = BuilderConfig::default().with_validation_mode(mode);
    let mut builder = FoTreeBuilder::from_config(config, RecordingHandler::new());
    builder.set_listener(Box::new(CollectingListener::new()));
    builder
}

fn attrs(pairs: &[(&str, &str)]) -> Vec<Attribute> {
    pairs
        .iter()
        .map(|(name, value)| Attribute::new(*name, *value))
        .collect()
}

fn open(builder: &mut Builder, name: &str, pairs: &[(&str, &str)]) {
    builder
        .start_element(FO_NAMESPACE, name, &attrs(pairs))
        .unwrap();
}

fn close(builder: &mut Builder, name: &str) {
    builder.end_element(FO_NAMESPACE, name).unwrap();
}

/// Start a valid document and leave the builder inside `fo:flow`.
fn open_flow(builder: &mut Builder) {
    builder.start_document().unwrap();
    open(builder, "root", &[]);
    open(builder, "layout-master-set", &[]);
    open(builder, "simple-page-master", &[("master-name", "page")]);
    open(builder, "region-body", &[]);
    close(builder, "region-body");
    close(builder, "simple-page-master");
    close(builder, "layout-master-set");
    open(builder, "page-sequence", &[("master-reference", "page")]);
    open(builder, "flow", &[("flow-name", "xsl-region-body")]);
}

/// Close what [`open_flow`] opened.
fn close_flow(builder: &mut Builder) {
    close(builder, "flow");
    close(builder, "page-sequence");
    close(builder, "root");
}

/// A document whose flow holds one block with the given text.
fn single_block(pairs: &[(&str, &str)], text: &str) -> quire_builder::FoDocument {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", pairs);
    builder.characters(text).unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    builder.end_document().unwrap()
}

fn first(document: &quire_builder::FoDocument, kind: NodeKind) -> NodeId {
    document.tree.find_all(kind)[0]
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_valid_document_has_no_events() {
    let document = single_block(&[], "Hello");
    assert!(document.events.is_empty(), "{:?}", document.events);

    let root = document.root().unwrap();
    assert_eq!(document.tree.kind(root), Some(NodeKind::Root));
    assert_eq!(document.tree.parent(root), Some(NodeId::ROOT));
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "Hello");
}

#[test]
fn test_state_transitions() {
    let mut builder = builder(ValidationMode::Strict);
    assert_eq!(builder.state(), BuilderState::Idle);
    builder.start_document().unwrap();
    assert_eq!(builder.state(), BuilderState::AwaitingRoot);
    open(&mut builder, "root", &[]);
    assert_eq!(builder.state(), BuilderState::Building);
}

#[test]
fn test_builder_rejects_reuse() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    assert_eq!(builder.start_document(), Err(BuildError::Reuse));
    assert_eq!(builder.state(), BuilderState::AwaitingRoot);

    open(&mut builder, "root", &[]);
    close(&mut builder, "root");
    let _ = builder.end_document().unwrap();
    assert_eq!(builder.state(), BuilderState::Finished);
    assert_eq!(builder.start_document(), Err(BuildError::Reuse));
}

#[test]
fn test_start_document_keeps_other_builders_warnings() {
    quire_common::warning::warn_once("builder-tests", "reported by an earlier build");
    let mut builder = builder(ValidationMode::Strict);
    builder.start_document().unwrap();
    assert!(quire_common::warning::was_warned(
        "builder-tests",
        "reported by an earlier build"
    ));
}

#[test]
fn test_events_before_start_document() {
    let mut builder = builder(ValidationMode::Lenient);
    let result = builder.start_element(FO_NAMESPACE, "root", &[]);
    assert!(matches!(result, Err(BuildError::EventStream(_))));
    assert_eq!(builder.state(), BuilderState::Failed);
}

#[test]
fn test_notifications_in_document_order() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    open(&mut builder, "root", &[]);
    open(&mut builder, "block", &[]);
    builder.characters("x").unwrap();
    close(&mut builder, "block");
    close(&mut builder, "root");
    let _ = builder.end_document().unwrap();

    let root = NodeId(1);
    let block = NodeId(2);
    let text = NodeId(3);
    assert_eq!(
        builder.handler().notifications(),
        [
            Notification::StartDocument,
            Notification::StartNode {
                kind: NodeKind::Root,
                node: root
            },
            Notification::StartNode {
                kind: NodeKind::Block,
                node: block
            },
            Notification::Characters {
                node: text,
                text: "x".to_string()
            },
            Notification::EndNode {
                kind: NodeKind::Block,
                node: block
            },
            Notification::EndNode {
                kind: NodeKind::Root,
                node: root
            },
            Notification::EndDocument,
        ]
    );
}

// ---------------------------------------------------------------------------
// Text runs
// ---------------------------------------------------------------------------

#[test]
fn test_text_split_into_bounded_runs() {
    let text = "a".repeat(70_000);
    let document = single_block(&[], &text);
    let block = first(&document, NodeKind::Block);

    let lengths: Vec<usize> = document
        .tree
        .children(block)
        .iter()
        .map(|&id| document.tree.text_run(id).unwrap().char_len())
        .collect();
    assert_eq!(lengths, [32767, 32767, 4466]);
    assert_eq!(document.tree.text_content(block).len(), 70_000);
}

#[test]
fn test_runs_are_chained_across_inlines() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    builder.characters("one ").unwrap();
    open(&mut builder, "inline", &[]);
    builder.characters("two").unwrap();
    close(&mut builder, "inline");
    builder.characters(" three").unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let block = first(&document, NodeKind::Block);
    let runs: Vec<&str> = document
        .tree
        .runs_in_block(block)
        .map(|id| document.tree.as_text(id).unwrap())
        .collect();
    assert_eq!(runs, ["one ", "two", " three"]);
}

#[test]
fn test_text_not_allowed_in_structural_node() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    builder.characters("\n   ").unwrap();
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();
    assert!(document.events.is_empty());

    let mut builder = self::builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    open(&mut builder, "root", &[]);
    open(&mut builder, "layout-master-set", &[]);
    builder.characters("stray").unwrap();
    assert_eq!(builder.events().len(), 1);
    assert_eq!(builder.events()[0].kind, EventKind::Structural);
    let layout = NodeId(2);
    assert!(builder.tree().children(layout).is_empty());
}

// ---------------------------------------------------------------------------
// Whitespace and text-transform
// ---------------------------------------------------------------------------

#[test]
fn test_whitespace_collapses_by_default() {
    let document = single_block(&[], "  Hello \n  world  ");
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "Hello world");
}

#[test]
fn test_long_whitespace_runs() {
    let text = format!("a{}b", " ".repeat(80_000));
    let document = single_block(&[], &text);
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "a b");

    let document = single_block(&[], &" \n".repeat(40_000));
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "");
}

#[test]
fn test_whitespace_across_inline() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    builder.characters("Hello ").unwrap();
    open(&mut builder, "inline", &[("font-weight", "bold")]);
    builder.characters("big").unwrap();
    close(&mut builder, "inline");
    builder.characters("  world ").unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "Hello big world");
}

#[test]
fn test_nested_block_is_a_line_boundary() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    builder.characters("before ").unwrap();
    open(&mut builder, "block", &[]);
    builder.characters(" inner ").unwrap();
    close(&mut builder, "block");
    builder.characters(" after").unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let outer = first(&document, NodeKind::Block);
    let texts: Vec<String> = document
        .tree
        .descendants(outer)
        .filter_map(|id| document.tree.as_text(id).map(ToString::to_string))
        .collect();
    assert_eq!(texts, ["before", "inner", "after"]);
}

#[test]
fn test_preserved_linefeeds() {
    let document = single_block(&[("linefeed-treatment", "preserve")], "one  \n  two");
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "one\ntwo");
}

#[test]
fn test_text_transform_uppercase() {
    let document = single_block(&[("text-transform", "uppercase")], "quire");
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "QUIRE");
}

#[test]
fn test_invalid_text_transform_leaves_text_alone() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    open(&mut builder, "block", &[("text-transform", "sideways")]);
    builder.characters("quire").unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    assert_eq!(document.events.len(), 1);
    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "quire");
}

#[test]
fn test_capitalize_looks_across_runs() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[("text-transform", "capitalize")]);
    builder.characters("hello ").unwrap();
    open(&mut builder, "inline", &[]);
    builder.characters("wide").unwrap();
    close(&mut builder, "inline");
    builder.characters("r world").unwrap();
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let block = first(&document, NodeKind::Block);
    assert_eq!(document.tree.text_content(block), "Hello Wider World");
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

#[test]
fn test_marker_nesting_symmetry() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[("font-size", "14pt")]);
    assert_eq!(builder.state(), BuilderState::Building);

    open(&mut builder, "marker", &[("marker-class-name", "outer")]);
    assert_eq!(builder.state(), BuilderState::InMarker);
    open(&mut builder, "block", &[]);
    open(&mut builder, "marker", &[("marker-class-name", "inner")]);
    assert_eq!(builder.state(), BuilderState::InMarker);
    open(&mut builder, "block", &[]);
    close(&mut builder, "block");
    close(&mut builder, "marker");
    assert_eq!(builder.state(), BuilderState::InMarker);
    close(&mut builder, "block");
    close(&mut builder, "marker");
    assert_eq!(builder.state(), BuilderState::Building);

    open(&mut builder, "block", &[]);
    close(&mut builder, "block");
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();
    assert!(document.events.is_empty());

    let blocks = document.tree.find_all(NodeKind::Block);
    assert_eq!(blocks.len(), 4);
    let outer = document.tree.properties(blocks[0]).unwrap();
    let after = document.tree.properties(blocks[3]).unwrap();
    // The block after the markers chains to the same list as before them.
    assert!(core::ptr::eq(after.parent().unwrap(), &**outer));
    assert_eq!(outer.parent().unwrap().element(), "fo:flow");
}

#[test]
fn test_marker_content_lists_skip_marker_nodes() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(
        &mut builder,
        "marker",
        &[("marker-class-name", "chapter")],
    );
    open(&mut builder, "block", &[("font-size", "20pt")]);
    open(&mut builder, "inline", &[]);
    builder.characters("Title").unwrap();
    close(&mut builder, "inline");
    close(&mut builder, "block");
    close(&mut builder, "marker");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let block = first(&document, NodeKind::Block);
    let inline = first(&document, NodeKind::Inline);
    let block_list = document.tree.properties(block).unwrap();
    let inline_list = document.tree.properties(inline).unwrap();
    assert_eq!(block_list.parent().unwrap().element(), "fo:flow");
    // The block inside the marker never became current.
    assert_eq!(inline_list.parent().unwrap().element(), "fo:flow");
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_strict_mode_aborts_on_invalid_child() {
    let mut builder = builder(ValidationMode::Strict);
    let token = builder.cancellation_token();
    builder.start_document().unwrap();
    open(&mut builder, "root", &[]);

    let result = builder.start_element(FO_NAMESPACE, "block", &[]);
    assert!(matches!(result, Err(BuildError::Structural(_))));
    assert_eq!(builder.state(), BuilderState::Failed);
    assert!(token.is_cancelled());
    assert_eq!(builder.events().last().unwrap().severity, Severity::Fatal);

    assert_eq!(builder.characters("x"), Err(BuildError::Cancelled));
}

#[test]
fn test_lenient_mode_reports_invalid_child() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    open(&mut builder, "root", &[]);
    open(&mut builder, "block", &[]);
    close(&mut builder, "block");
    close(&mut builder, "root");
    let document = builder.end_document().unwrap();

    let root = document.root().unwrap();
    assert_eq!(document.tree.children(root).len(), 1);
    let structural: Vec<&str> = document
        .events
        .iter()
        .filter(|event| event.kind == EventKind::Structural)
        .map(|event| event.description.as_str())
        .collect();
    assert_eq!(
        structural,
        [
            "fo:block is not a valid child of fo:root",
            "fo:root is missing a required fo:layout-master-set",
            "fo:root is missing a required fo:page-sequence",
        ]
    );
}

#[test]
fn test_elements_before_root_are_skipped() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    open(&mut builder, "block", &[]);
    open(&mut builder, "inline", &[]);
    builder.characters("lost").unwrap();
    close(&mut builder, "inline");
    close(&mut builder, "block");
    assert_eq!(builder.state(), BuilderState::AwaitingRoot);

    open(&mut builder, "root", &[]);
    close(&mut builder, "root");
    let document = builder.end_document().unwrap();
    // The document node and fo:root.
    assert_eq!(document.tree.len(), 2);
}

#[test]
fn test_missing_root_is_an_error() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    assert!(matches!(
        builder.end_document(),
        Err(BuildError::EventStream(_))
    ));
}

#[test]
fn test_marker_must_be_initial() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    close(&mut builder, "block");
    let result = builder.start_element(
        FO_NAMESPACE,
        "marker",
        &attrs(&[("marker-class-name", "late")]),
    );
    let Err(BuildError::Structural(event)) = result else {
        panic!("expected a structural error, got {result:?}");
    };
    assert_eq!(event.description, "fo:marker is out of order in fo:flow");
}

#[test]
fn test_unknown_element_becomes_placeholder() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "paragraph", &[]);
    builder.characters("kept").unwrap();
    close(&mut builder, "paragraph");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let placeholder = first(&document, NodeKind::Unknown);
    assert!(matches!(
        &document.tree.get(placeholder).unwrap().data,
        NodeData::Unknown { local_name, .. } if local_name == "paragraph"
    ));
    assert_eq!(document.events.len(), 1);
    assert_eq!(document.events[0].kind, EventKind::UnknownNode);
    assert_eq!(document.events[0].severity, Severity::Warning);
}

// ---------------------------------------------------------------------------
// Event stream errors
// ---------------------------------------------------------------------------

#[test]
fn test_mismatched_end_tag_is_fatal() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    let result = builder.end_element(FO_NAMESPACE, "inline");
    assert!(matches!(result, Err(BuildError::EventStream(_))));
    assert_eq!(builder.state(), BuilderState::Failed);
    assert!(builder.cancellation_token().is_cancelled());
}

#[test]
fn test_end_tag_without_start() {
    let mut builder = builder(ValidationMode::Lenient);
    builder.start_document().unwrap();
    open(&mut builder, "root", &[]);
    close(&mut builder, "root");
    let result = builder.end_element(FO_NAMESPACE, "root");
    assert!(matches!(result, Err(BuildError::EventStream(_))));
}

#[test]
fn test_unclosed_elements() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    let Err(BuildError::EventStream(message)) = builder.end_document() else {
        panic!("expected an event-stream error");
    };
    assert_eq!(message, "unclosed elements: root, page-sequence, flow");
}

#[test]
fn test_external_cancellation() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    builder.cancellation_token().cancel();
    assert_eq!(builder.characters("x"), Err(BuildError::Cancelled));
    assert_eq!(builder.state(), BuilderState::Failed);
}

// ---------------------------------------------------------------------------
// Properties, ids and fonts
// ---------------------------------------------------------------------------

#[test]
fn test_properties_inherit_through_the_tree() {
    let mut builder = builder(ValidationMode::Strict);
    builder.start_document().unwrap();
    open(&mut builder, "root", &[("font-size", "9pt")]);
    open(&mut builder, "layout-master-set", &[]);
    open(&mut builder, "simple-page-master", &[("master-name", "p")]);
    open(&mut builder, "region-body", &[]);
    close(&mut builder, "region-body");
    close(&mut builder, "simple-page-master");
    close(&mut builder, "layout-master-set");
    open(&mut builder, "page-sequence", &[("master-reference", "p")]);
    open(&mut builder, "flow", &[("flow-name", "xsl-region-body")]);
    open(&mut builder, "block", &[]);
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let block = first(&document, NodeKind::Block);
    let list = document.tree.properties(block).unwrap();
    let size = list.get(quire_properties::PropertyId::FontSize).unwrap();
    assert_eq!(size.to_string(), "9pt");
}

#[test]
fn test_invalid_property_strict_and_lenient() {
    let mut strict = builder(ValidationMode::Strict);
    open_flow(&mut strict);
    let result = strict.start_element(
        FO_NAMESPACE,
        "block",
        &attrs(&[("text-align", "sideways")]),
    );
    assert!(matches!(
        result,
        Err(BuildError::Property { ref node, .. }) if node == "fo:block"
    ));

    let mut lenient = builder(ValidationMode::Lenient);
    open_flow(&mut lenient);
    open(&mut lenient, "block", &[("text-align", "sideways"), ("bogus", "1")]);
    let events = lenient.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].severity, Severity::Error);
    assert_eq!(events[0].property_name.as_deref(), Some("text-align"));
    assert_eq!(events[1].severity, Severity::Warning);
    assert_eq!(events[1].property_name.as_deref(), Some("bogus"));
}

#[test]
fn test_id_registry() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    open(&mut builder, "block", &[("id", "intro")]);
    open(&mut builder, "page-number-citation", &[("ref-id", "intro")]);
    close(&mut builder, "page-number-citation");
    open(&mut builder, "page-number-citation", &[("ref-id", "appendix")]);
    close(&mut builder, "page-number-citation");
    close(&mut builder, "block");
    open(&mut builder, "block", &[("id", "intro")]);
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let blocks = document.tree.find_all(NodeKind::Block);
    assert_eq!(document.ids.get("intro"), Some(blocks[0]));
    assert_eq!(document.ids.unresolved(), ["appendix"]);

    let id_events: Vec<(Severity, &str)> = document
        .events
        .iter()
        .filter(|event| event.kind == EventKind::IdReference)
        .map(|event| (event.severity, event.description.as_str()))
        .collect();
    assert_eq!(id_events.len(), 2);
    assert_eq!(id_events[0].0, Severity::Error);
    assert!(id_events[0].1.contains("duplicate id"));
    assert_eq!(
        id_events[1],
        (Severity::Warning, "ref-id \"appendix\" does not match any id")
    );
}

#[test]
fn test_fonts_recorded_for_text() {
    let document = single_block(
        &[("font-family", "serif"), ("font-size", "10pt"), ("font-weight", "bold")],
        "text",
    );
    let fonts: Vec<&FontTriplet> = document.fonts.iter().collect();
    assert_eq!(
        fonts,
        [&FontTriplet {
            family: "serif".to_string(),
            style: "normal".to_string(),
            weight: 700,
            size: 10_000,
        }]
    );
}

// ---------------------------------------------------------------------------
// Foreign content
// ---------------------------------------------------------------------------

#[test]
fn test_foreign_subtree_is_captured() {
    let mut builder = builder(ValidationMode::Strict);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    open(&mut builder, "instream-foreign-object", &[]);
    builder
        .start_element(SVG_NAMESPACE, "svg", &attrs(&[("width", "20")]))
        .unwrap();
    assert_eq!(builder.state(), BuilderState::Delegated);
    // Inside the fragment, names are not formatting objects.
    builder
        .start_element(SVG_NAMESPACE, "block", &attrs(&[("x", "1")]))
        .unwrap();
    builder.characters("label").unwrap();
    builder.end_element(SVG_NAMESPACE, "block").unwrap();
    builder.end_element(SVG_NAMESPACE, "svg").unwrap();
    assert_eq!(builder.state(), BuilderState::Building);
    close(&mut builder, "instream-foreign-object");
    close(&mut builder, "block");
    close_flow(&mut builder);
    let document = builder.end_document().unwrap();

    let foreign = first(&document, NodeKind::Foreign);
    let NodeData::Foreign(svg) = &document.tree.get(foreign).unwrap().data else {
        panic!("expected foreign data");
    };
    assert_eq!(svg.local_name, "svg");
    assert_eq!(svg.attribute("width"), Some("20"));
    let inner = svg.elements().next().unwrap();
    assert_eq!(inner.attribute("x"), Some("1"));
    assert_eq!(svg.text_content(), "label");
    assert!(document.tree.find_all(NodeKind::Block).len() == 1);
}

#[test]
fn test_mismatch_inside_foreign_subtree_is_fatal() {
    let mut builder = builder(ValidationMode::Lenient);
    open_flow(&mut builder);
    open(&mut builder, "block", &[]);
    open(&mut builder, "instream-foreign-object", &[]);
    builder.start_element(SVG_NAMESPACE, "svg", &[]).unwrap();
    builder.start_element(SVG_NAMESPACE, "g", &[]).unwrap();
    let result = builder.end_element(SVG_NAMESPACE, "svg");
    assert!(matches!(result, Err(BuildError::EventStream(_))));
    assert_eq!(builder.state(), BuilderState::Failed);
}
