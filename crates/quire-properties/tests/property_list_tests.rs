//! Integration tests for property lists: binding, inheritance and
//! writing-mode dependent lookups.

use std::rc::Rc;

use quire_properties::{
    AreaTraits, BindIssueKind, Color, EnumValue, Length, PercentBase, Property, PropertyError,
    PropertyId, PropertyList, PropertyRegistry, WritingMode,
};

const BLOCK: AreaTraits = AreaTraits {
    generates_inline_areas: true,
    generates_reference_areas: false,
};

/// Build a list for `fo:block` with the given parent and attributes,
/// asserting that every attribute binds.
fn block(parent: Option<&Rc<PropertyList>>, attrs: &[(&str, &str)]) -> Rc<PropertyList> {
    let mut list = PropertyList::new(
        PropertyRegistry::shared(),
        parent.cloned(),
        "fo:block",
        BLOCK,
    );
    let issues = list.bind_attributes(attrs);
    assert!(issues.is_empty(), "unexpected bind issues: {issues:?}");
    Rc::new(list)
}

fn pt(points: f64) -> Property {
    Property::Length(Length::from_points(points))
}

#[test]
fn test_inherited_property_flows_through_generations() {
    let root = block(None, &[("font-size", "10pt"), ("color", "red")]);
    let child = block(Some(&root), &[]);
    let grandchild = block(Some(&child), &[]);

    assert_eq!(grandchild.get(PropertyId::FontSize).unwrap(), pt(10.0));
    assert_eq!(
        grandchild.get(PropertyId::Color).unwrap().as_color(),
        Some(Color::rgb(255, 0, 0))
    );
}

#[test]
fn test_non_inherited_property_uses_initial_value() {
    let root = block(None, &[("margin-top", "5pt")]);
    let child = block(Some(&root), &[]);

    assert_eq!(root.get(PropertyId::MarginTop).unwrap(), pt(5.0));
    assert_eq!(child.get(PropertyId::MarginTop).unwrap(), pt(0.0));
}

#[test]
fn test_initial_values_at_root() {
    let root = block(None, &[]);
    assert_eq!(root.get(PropertyId::FontSize).unwrap(), pt(12.0));
    assert_eq!(
        root.get(PropertyId::TextAlign).unwrap(),
        Property::Enum(EnumValue::Start)
    );
    assert_eq!(
        root.get(PropertyId::BackgroundColor).unwrap().as_color(),
        Some(Color::TRANSPARENT)
    );
    assert_eq!(root.writing_mode().unwrap(), WritingMode::LrTb);
}

#[test]
fn test_explicit_inherit_keyword() {
    let root = block(None, &[("margin-left", "5pt")]);
    let child = block(Some(&root), &[("margin-left", "inherit")]);
    assert_eq!(child.get(PropertyId::MarginLeft).unwrap(), pt(5.0));
}

#[test]
fn test_font_size_relative_units() {
    let root = block(None, &[("font-size", "10pt")]);
    let em = block(Some(&root), &[("font-size", "2em"), ("margin-left", "1.5em")]);
    let percent = block(Some(&root), &[("font-size", "150%")]);
    let keyword = block(Some(&root), &[("font-size", "larger")]);

    assert_eq!(em.get(PropertyId::FontSize).unwrap(), pt(20.0));
    // `em` on other properties refers to this node's own font size.
    assert_eq!(em.get(PropertyId::MarginLeft).unwrap(), pt(30.0));
    assert_eq!(percent.get(PropertyId::FontSize).unwrap(), pt(15.0));
    assert_eq!(keyword.get(PropertyId::FontSize).unwrap(), pt(12.0));
}

#[test]
fn test_font_size_bound_before_dependent_attributes() {
    // margin-left comes first in document order but font-size has priority.
    let root = block(None, &[("margin-left", "2em"), ("font-size", "8pt")]);
    assert_eq!(root.get(PropertyId::MarginLeft).unwrap(), pt(16.0));
}

#[test]
fn test_percentage_stays_pending() {
    let root = block(None, &[("margin-left", "10%")]);
    let margin = root.get(PropertyId::MarginLeft).unwrap().as_length().unwrap();
    let pending = margin.pending_percentage().unwrap();
    assert_eq!(pending.base, PercentBase::ContainingBlockWidth);
    assert_eq!(margin.resolve(200_000), 20_000);
}

#[test]
fn test_writing_mode_abbreviations_and_inheritance() {
    let root = block(None, &[("writing-mode", "tb")]);
    let child = block(Some(&root), &[]);
    assert_eq!(root.writing_mode().unwrap(), WritingMode::TbRl);
    assert_eq!(child.writing_mode().unwrap(), WritingMode::TbRl);
    assert_eq!(
        child
            .wm_map(
                PropertyId::MarginLeft,
                PropertyId::MarginRight,
                PropertyId::MarginTop
            )
            .unwrap(),
        PropertyId::MarginTop
    );
}

#[test]
fn test_invalid_attribute_is_reported_and_skipped() {
    let mut list = PropertyList::new(PropertyRegistry::shared(), None, "fo:block", BLOCK);
    let issues = list.bind_attributes(&[
        ("font-style", "sideways"),
        ("frobnicate", "1"),
        ("font-weight", "bold"),
    ]);

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].attribute, "font-style");
    assert!(matches!(
        issues[0].kind,
        BindIssueKind::Invalid(PropertyError::UnknownKeyword { .. })
    ));
    assert_eq!(issues[1].attribute, "frobnicate");
    assert_eq!(issues[1].kind, BindIssueKind::UnknownProperty);

    // The bad attribute leaves the initial value in place.
    assert_eq!(
        list.get(PropertyId::FontStyle).unwrap(),
        Property::Enum(EnumValue::Normal)
    );
    assert_eq!(
        list.get(PropertyId::FontWeight).unwrap(),
        Property::Number(700.0)
    );
}

#[test]
fn test_namespaced_attributes_are_ignored() {
    let mut list = PropertyList::new(PropertyRegistry::shared(), None, "fo:block", BLOCK);
    let issues = list.bind_attributes(&[("xmlns", "urn:x"), ("fox:alt-text", "hello")]);
    assert!(issues.is_empty());
    assert_eq!(list.explicit().count(), 0);
}

#[test]
fn test_nearest_specified_climbs_ancestors() {
    let root = block(None, &[("margin-left", "4pt")]);
    let child = block(Some(&root), &[]);
    let grandchild = block(Some(&child), &[]);
    assert_eq!(
        grandchild
            .get_nearest_specified(PropertyId::MarginLeft)
            .unwrap(),
        pt(4.0)
    );
    // margin-left is not inherited, so the computed value is the initial one.
    assert_eq!(grandchild.get(PropertyId::MarginLeft).unwrap(), pt(0.0));
}

#[test]
fn test_shorthand_has_no_initial_value() {
    let root = block(None, &[]);
    assert!(matches!(
        root.get(PropertyId::Margin),
        Err(PropertyError::NoValue { .. })
    ));
}
