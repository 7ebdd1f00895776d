//! Integration tests for the formatting-object tree.

use std::rc::Rc;

use quire_fotree::{
    FoNode, FoTree, NodeData, NodeId, NodeKind, NodeState, XmlContent, XmlElement,
};
use quire_properties::{AreaTraits, PropertyId, PropertyList, PropertyRegistry};

fn append(tree: &mut FoTree, parent: NodeId, kind: NodeKind) -> NodeId {
    let id = tree.alloc(FoNode::new(kind, NodeData::FormattingObject));
    tree.append_child(parent, id);
    id
}

#[test]
fn test_nodes_share_property_lists() {
    let registry = PropertyRegistry::shared();
    let mut root_list = PropertyList::new(registry.clone(), None, "fo:root", AreaTraits::default());
    let _ = root_list.bind_attributes(&[("font-size", "9pt")]);
    let root_list = Rc::new(root_list);
    let block_list = Rc::new(PropertyList::new(
        registry,
        Some(Rc::clone(&root_list)),
        "fo:block",
        AreaTraits::default(),
    ));

    let mut tree = FoTree::new();
    let root = tree.alloc(
        FoNode::new(NodeKind::Root, NodeData::FormattingObject).with_properties(root_list),
    );
    tree.append_child(NodeId::ROOT, root);
    let block = tree.alloc(
        FoNode::new(NodeKind::Block, NodeData::FormattingObject).with_properties(block_list),
    );
    tree.append_child(root, block);

    let size = tree
        .properties(block)
        .unwrap()
        .get(PropertyId::FontSize)
        .unwrap();
    assert_eq!(size.to_string(), "9pt");
}

#[test]
fn test_find_all_and_close() {
    let mut tree = FoTree::new();
    let root = append(&mut tree, NodeId::ROOT, NodeKind::Root);
    let first = append(&mut tree, root, NodeKind::Block);
    let second = append(&mut tree, first, NodeKind::Block);

    assert_eq!(tree.find_all(NodeKind::Block), [first, second]);
    assert_eq!(tree.get(first).unwrap().state, NodeState::Open);
    tree.close(first);
    assert_eq!(tree.get(first).unwrap().state, NodeState::Closed);
}

#[test]
fn test_foreign_fragment_text() {
    let mut svg = XmlElement::new("http://www.w3.org/2000/svg", "svg");
    let mut text = XmlElement::new("http://www.w3.org/2000/svg", "text");
    text.push_text("Hello");
    text.push_text(", world");
    svg.children.push(XmlContent::Element(text));

    assert_eq!(svg.text_content(), "Hello, world");
    assert_eq!(svg.elements().count(), 1);

    let mut tree = FoTree::new();
    let node = tree.alloc(FoNode::new(NodeKind::Foreign, NodeData::Foreign(svg)));
    tree.append_child(NodeId::ROOT, node);
    assert_eq!(tree.get(node).unwrap().display_name(), "svg");
}

#[test]
fn test_text_outside_block_is_unchained() {
    let mut tree = FoTree::new();
    let root = append(&mut tree, NodeId::ROOT, NodeKind::Root);
    let marker = append(&mut tree, root, NodeKind::Marker);
    let run = tree.append_text(marker, "loose", None);

    assert_eq!(tree.text_run(run).unwrap().block, None);
    assert_eq!(tree.text_content(root), "loose");
}
