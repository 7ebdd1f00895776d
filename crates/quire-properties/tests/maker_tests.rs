//! Integration tests for property makers: compounds, corresponding
//! properties, indents, dimensions and line-height.

use std::rc::Rc;
use std::sync::Arc;

use quire_properties::{
    AreaTraits, EnumValue, IndentRule, Length, Property, PropertyId, PropertyList, PropertyRef,
    PropertyRegistry, RegistryOptions, Subproperty,
};

const BLOCK: AreaTraits = AreaTraits {
    generates_inline_areas: true,
    generates_reference_areas: false,
};

fn list_in(
    registry: Arc<PropertyRegistry>,
    parent: Option<&Rc<PropertyList>>,
    traits: AreaTraits,
    attrs: &[(&str, &str)],
) -> Rc<PropertyList> {
    let mut list = PropertyList::new(registry, parent.cloned(), "fo:block", traits);
    let issues = list.bind_attributes(attrs);
    assert!(issues.is_empty(), "unexpected bind issues: {issues:?}");
    Rc::new(list)
}

fn block(parent: Option<&Rc<PropertyList>>, attrs: &[(&str, &str)]) -> Rc<PropertyList> {
    list_in(PropertyRegistry::shared(), parent, BLOCK, attrs)
}

fn pt(points: f64) -> Property {
    Property::Length(Length::from_points(points))
}

fn component(list: &PropertyList, id: PropertyId, sub: Subproperty) -> Property {
    list.get_ref(PropertyRef::component(id, sub)).unwrap()
}

fn length_of(list: &PropertyList, id: PropertyId) -> Length {
    list.get(id).unwrap().as_numeric_length().unwrap()
}

// Compound properties

#[test]
fn test_space_scalar_sets_every_length_component() {
    let root = block(None, &[("space-before", "6pt")]);
    for sub in [Subproperty::Minimum, Subproperty::Optimum, Subproperty::Maximum] {
        assert_eq!(component(&root, PropertyId::SpaceBefore, sub), pt(6.0));
    }
    assert_eq!(
        component(&root, PropertyId::SpaceBefore, Subproperty::Precedence),
        Property::Number(0.0)
    );
    assert_eq!(
        component(&root, PropertyId::SpaceBefore, Subproperty::Conditionality),
        Property::Enum(EnumValue::Discard)
    );
}

#[test]
fn test_component_attribute_extends_defaults() {
    let root = block(None, &[("space-before.minimum", "2pt")]);
    assert_eq!(
        component(&root, PropertyId::SpaceBefore, Subproperty::Minimum),
        pt(2.0)
    );
    assert_eq!(
        component(&root, PropertyId::SpaceBefore, Subproperty::Optimum),
        pt(0.0)
    );
}

#[test]
fn test_component_applies_on_top_of_base_in_any_order() {
    let component_first = block(
        None,
        &[("space-before.maximum", "8pt"), ("space-before", "6pt")],
    );
    let base_first = block(
        None,
        &[("space-before", "6pt"), ("space-before.maximum", "8pt")],
    );
    for list in [&component_first, &base_first] {
        assert_eq!(
            component(list, PropertyId::SpaceBefore, Subproperty::Optimum),
            pt(6.0)
        );
        assert_eq!(
            component(list, PropertyId::SpaceBefore, Subproperty::Maximum),
            pt(8.0)
        );
    }
}

#[test]
fn test_unknown_component_is_rejected() {
    let mut list = PropertyList::new(PropertyRegistry::shared(), None, "fo:block", BLOCK);
    let issues = list.bind_attributes(&[("space-before.within-page", "1")]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_keep_keyword_and_component() {
    let root = block(
        None,
        &[("keep-together", "always"), ("keep-with-next.within-page", "5")],
    );
    assert_eq!(
        component(&root, PropertyId::KeepTogether, Subproperty::WithinPage),
        Property::Enum(EnumValue::Always)
    );
    assert_eq!(
        component(&root, PropertyId::KeepWithNext, Subproperty::WithinPage),
        Property::Number(5.0)
    );
    assert_eq!(
        component(&root, PropertyId::KeepWithNext, Subproperty::WithinLine),
        Property::Enum(EnumValue::Auto)
    );
}

#[test]
fn test_value_list_spreads_over_length_range() {
    let id = PropertyId::InlineProgressionDimension;
    let root = block(None, &[(id.name(), "1pt 2pt 3pt")]);
    let registry = PropertyRegistry::shared();
    let compound = registry.maker(id).compound_maker().unwrap();

    for (sub, literal) in [
        (Subproperty::Minimum, "1pt"),
        (Subproperty::Optimum, "2pt"),
        (Subproperty::Maximum, "3pt"),
    ] {
        let direct = compound.subproperty(sub).unwrap().make(&root, literal).unwrap();
        assert_eq!(component(&root, id, sub), direct);
    }
}

#[test]
fn test_value_list_on_space_keeps_remaining_defaults() {
    let root = block(None, &[("space-before", "1pt 2pt 3pt")]);
    let components = [
        (Subproperty::Minimum, pt(1.0)),
        (Subproperty::Optimum, pt(2.0)),
        (Subproperty::Maximum, pt(3.0)),
        (Subproperty::Precedence, Property::Number(0.0)),
        (Subproperty::Conditionality, Property::Enum(EnumValue::Discard)),
    ];
    for (sub, expected) in components {
        assert_eq!(component(&root, PropertyId::SpaceBefore, sub), expected);
    }
}

#[test]
fn test_value_list_longer_than_compound_is_rejected() {
    let mut list = PropertyList::new(PropertyRegistry::shared(), None, "fo:block", BLOCK);
    let issues = list.bind_attributes(&[("border-separation", "1pt 2pt 3pt")]);
    assert_eq!(issues.len(), 1);
}

#[test]
fn test_keep_together_is_inherited() {
    let root = block(None, &[("keep-together.within-column", "always")]);
    let child = block(Some(&root), &[]);
    assert_eq!(
        component(&child, PropertyId::KeepTogether, Subproperty::WithinColumn),
        Property::Enum(EnumValue::Always)
    );
}

// Corresponding properties

#[test]
fn test_absolute_margin_forces_start_indent() {
    let root = block(None, &[]);
    let forced = block(Some(&root), &[("margin-left", "5pt"), ("start-indent", "20pt")]);
    let unforced = block(Some(&root), &[("start-indent", "20pt")]);

    assert_eq!(length_of(&forced, PropertyId::StartIndent), Length::from_points(5.0));
    assert_eq!(
        length_of(&unforced, PropertyId::StartIndent),
        Length::from_points(20.0)
    );
}

#[test]
fn test_is_forced_only_by_explicit_absolute_property() {
    let registry = PropertyRegistry::shared();
    let start_indent = registry
        .maker(PropertyId::StartIndent)
        .corresponding_maker()
        .unwrap();

    let root = block(None, &[]);
    let parent = block(Some(&root), &[("margin-left", "5pt")]);
    let child = block(Some(&parent), &[]);

    assert!(!start_indent.is_forced(&root).unwrap());
    assert!(start_indent.is_forced(&parent).unwrap());
    // margin-left reaches the child only by inheritance.
    assert!(!start_indent.is_forced(&child).unwrap());
    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(5.0));
}

#[test]
fn test_dimension_forced_by_min_sibling() {
    let registry = PropertyRegistry::shared();
    let dimension = registry
        .maker(PropertyId::InlineProgressionDimension)
        .corresponding_maker()
        .unwrap();

    let plain = block(None, &[]);
    let with_min = block(None, &[("min-width", "2pt")]);
    assert!(!dimension.is_forced(&plain).unwrap());
    assert!(dimension.is_forced(&with_min).unwrap());
}

#[test]
fn test_forcing_follows_parent_writing_mode() {
    let root = block(None, &[("writing-mode", "rl-tb")]);
    let child = block(Some(&root), &[("margin-right", "7pt"), ("margin-left", "3pt")]);

    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(7.0));
    assert_eq!(length_of(&child, PropertyId::EndIndent), Length::from_points(3.0));
}

#[test]
fn test_indent_sums_margin_padding_and_border() {
    let root = block(None, &[]);
    let child = block(
        Some(&root),
        &[
            ("margin-left", "5pt"),
            ("padding-left", "2pt"),
            ("border-left-width", "1pt"),
        ],
    );
    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(8.0));
}

#[test]
fn test_indent_sum_has_no_inherited_term() {
    let root = block(None, &[]);
    let parent = block(Some(&root), &[("start-indent", "10pt")]);
    let child = block(Some(&parent), &[("margin-left", "5pt"), ("padding-left", "1pt")]);
    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(6.0));
}

#[test]
fn test_indent_from_margin_shorthand() {
    let root = block(None, &[]);
    let child = block(Some(&root), &[("margin", "4pt"), ("padding", "1pt")]);
    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(5.0));
    assert_eq!(length_of(&child, PropertyId::EndIndent), Length::from_points(5.0));
}

#[test]
fn test_indent_without_margin_is_inherited() {
    let root = block(None, &[("start-indent", "12pt")]);
    let child = block(Some(&root), &[("padding-left", "2pt")]);
    assert_eq!(length_of(&child, PropertyId::StartIndent), Length::from_points(12.0));
}

#[test]
fn test_indent_rule_can_skip_margin() {
    let registry = Arc::new(PropertyRegistry::with_options(RegistryOptions {
        indent_rule: IndentRule::SkipMarginWithoutInlineAreas,
    }));
    let root = list_in(registry.clone(), None, AreaTraits::default(), &[]);
    let attrs = [
        ("margin-left", "5pt"),
        ("padding-left", "2pt"),
        ("border-left-width", "1pt"),
    ];
    let container = list_in(registry.clone(), Some(&root), AreaTraits::default(), &attrs);
    let block = list_in(registry, Some(&root), BLOCK, &attrs);

    assert_eq!(
        length_of(&container, PropertyId::StartIndent),
        Length::from_points(3.0)
    );
    assert_eq!(length_of(&block, PropertyId::StartIndent), Length::from_points(8.0));
}

#[test]
fn test_logical_padding_from_absolute() {
    let root = block(None, &[("padding-left", "4pt"), ("padding-before", "3pt")]);
    assert_eq!(length_of(&root, PropertyId::PaddingStart), Length::from_points(4.0));
    assert_eq!(length_of(&root, PropertyId::PaddingTop), Length::from_points(3.0));
    assert_eq!(
        component(&root, PropertyId::PaddingStart, Subproperty::Conditionality),
        Property::Enum(EnumValue::Discard)
    );
}

#[test]
fn test_space_before_from_parent_writing_mode_margin() {
    let root = block(None, &[]);
    let child = block(Some(&root), &[("margin-top", "9pt")]);
    assert_eq!(
        component(&child, PropertyId::SpaceBefore, Subproperty::Optimum),
        pt(9.0)
    );
}

// Dimensions

#[test]
fn test_dimension_from_height_with_min_and_max() {
    let root = block(
        None,
        &[
            ("height", "100pt"),
            ("min-height", "50pt"),
            ("max-height", "150pt"),
        ],
    );
    let bpd = PropertyId::BlockProgressionDimension;
    assert_eq!(component(&root, bpd, Subproperty::Minimum), pt(50.0));
    assert_eq!(component(&root, bpd, Subproperty::Optimum), pt(100.0));
    assert_eq!(component(&root, bpd, Subproperty::Maximum), pt(150.0));
}

#[test]
fn test_dimension_min_only_keeps_auto_elsewhere() {
    let root = block(None, &[("min-width", "20pt")]);
    let ipd = PropertyId::InlineProgressionDimension;
    assert_eq!(component(&root, ipd, Subproperty::Minimum), pt(20.0));
    assert_eq!(
        component(&root, ipd, Subproperty::Optimum),
        Property::Enum(EnumValue::Auto)
    );
}

#[test]
fn test_absolute_dimension_wins_over_explicit_progression_dimension() {
    let root = block(
        None,
        &[("block-progression-dimension", "30pt"), ("height", "40pt")],
    );
    assert_eq!(
        component(&root, PropertyId::BlockProgressionDimension, Subproperty::Optimum),
        pt(40.0)
    );
}

// Line height

#[test]
fn test_line_height_number_is_recomputed_per_node() {
    let root = block(None, &[("font-size", "10pt"), ("line-height", "1.5")]);
    let child = block(Some(&root), &[("font-size", "20pt")]);

    assert_eq!(
        component(&root, PropertyId::LineHeight, Subproperty::Optimum),
        pt(15.0)
    );
    assert_eq!(
        component(&child, PropertyId::LineHeight, Subproperty::Optimum),
        pt(30.0)
    );
    assert_eq!(
        root.get(PropertyId::LineHeight)
            .unwrap()
            .specified_value()
            .map(str::to_string),
        Some("1.5".to_string())
    );
}

#[test]
fn test_line_height_normal_and_absolute() {
    let normal = block(None, &[("font-size", "10pt")]);
    assert_eq!(
        component(&normal, PropertyId::LineHeight, Subproperty::Optimum),
        pt(12.0)
    );

    let absolute = block(None, &[("line-height", "14pt")]);
    let child = block(Some(&absolute), &[("font-size", "30pt")]);
    assert_eq!(
        component(&child, PropertyId::LineHeight, Subproperty::Minimum),
        pt(14.0)
    );
}

#[test]
fn test_line_height_percentage_follows_font_size() {
    let root = block(None, &[("font-size", "10pt"), ("line-height", "150%")]);
    let child = block(Some(&root), &[("font-size", "20pt")]);
    assert_eq!(
        component(&child, PropertyId::LineHeight, Subproperty::Optimum),
        pt(30.0)
    );
}
