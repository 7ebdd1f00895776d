//! Integration tests for the property value expression language.

use std::rc::Rc;

use quire_properties::{
    AreaTraits, Color, Length, Property, PropertyError, PropertyId, PropertyList,
    PropertyRegistry,
};

fn list(parent: Option<&Rc<PropertyList>>, attrs: &[(&str, &str)]) -> Rc<PropertyList> {
    let mut list = PropertyList::new(
        PropertyRegistry::shared(),
        parent.cloned(),
        "fo:block",
        AreaTraits::default(),
    );
    let issues = list.bind_attributes(attrs);
    assert!(issues.is_empty(), "unexpected bind issues: {issues:?}");
    Rc::new(list)
}

fn make(list: &PropertyList, id: PropertyId, value: &str) -> Result<Property, PropertyError> {
    PropertyRegistry::shared().maker(id).make(list, value)
}

fn pt(points: f64) -> Property {
    Property::Length(Length::from_points(points))
}

#[test]
fn test_absolute_units() {
    let root = list(None, &[]);
    assert_eq!(make(&root, PropertyId::MarginLeft, "1in").unwrap(), pt(72.0));
    assert_eq!(make(&root, PropertyId::MarginLeft, "1pc").unwrap(), pt(12.0));
    assert_eq!(make(&root, PropertyId::MarginLeft, "2px").unwrap(), pt(2.0));
    assert_eq!(make(&root, PropertyId::MarginLeft, "0").unwrap(), pt(0.0));
}

#[test]
fn test_arithmetic() {
    let root = list(None, &[]);
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "2pt + 3pt").unwrap(),
        pt(5.0)
    );
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "10pt - 4pt").unwrap(),
        pt(6.0)
    );
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "10pt * 2").unwrap(),
        pt(20.0)
    );
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "(1pt + 1pt) * 3").unwrap(),
        pt(6.0)
    );
}

#[test]
fn test_non_zero_number_is_not_a_length() {
    let root = list(None, &[]);
    assert!(matches!(
        make(&root, PropertyId::MarginLeft, "3"),
        Err(PropertyError::NoConversion { .. })
    ));
}

#[test]
fn test_colors() {
    let root = list(None, &[]);
    let color = |value| {
        make(&root, PropertyId::Color, value)
            .unwrap()
            .as_color()
            .unwrap()
    };
    assert_eq!(color("rgb(255, 0, 0)"), Color::rgb(255, 0, 0));
    assert_eq!(color("rgb(100%, 0%, 50%)"), Color::rgb(255, 0, 128));
    assert_eq!(color("#0f0"), Color::rgb(0, 255, 0));
    assert_eq!(color("navy"), Color::rgb(0, 0, 128));
}

#[test]
fn test_property_value_functions() {
    let root = list(None, &[("font-size", "10pt"), ("color", "red")]);
    let child = list(
        Some(&root),
        &[
            ("font-size", "from-parent(font-size) * 2"),
            ("color", "inherited-property-value(color)"),
            ("margin-left", "from-nearest-specified-value(font-size)"),
        ],
    );
    assert_eq!(child.get(PropertyId::FontSize).unwrap(), pt(20.0));
    assert_eq!(
        child.get(PropertyId::Color).unwrap().as_color(),
        Some(Color::rgb(255, 0, 0))
    );
    // The child's own font-size is bound first, so it is the nearest.
    assert_eq!(child.get(PropertyId::MarginLeft).unwrap(), pt(20.0));
}

#[test]
fn test_function_without_argument_uses_current_property() {
    let root = list(None, &[("margin-left", "7pt")]);
    let child = list(Some(&root), &[("margin-left", "from-parent()")]);
    assert_eq!(child.get(PropertyId::MarginLeft).unwrap(), pt(7.0));
}

#[test]
fn test_component_reference() {
    let root = list(None, &[("space-before", "4pt")]);
    let child = list(
        Some(&root),
        &[("margin-top", "from-parent(space-before.optimum)")],
    );
    assert_eq!(child.get(PropertyId::MarginTop).unwrap(), pt(4.0));
}

#[test]
fn test_math_functions() {
    let root = list(None, &[]);
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "max(2pt, 5pt)").unwrap(),
        pt(5.0)
    );
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "abs(-3pt)").unwrap(),
        pt(3.0)
    );
    assert_eq!(
        make(&root, PropertyId::FontWeight, "round(401.6)").unwrap(),
        Property::Number(402.0)
    );
}

#[test]
fn test_unknown_function_is_an_error() {
    let root = list(None, &[]);
    assert_eq!(
        make(&root, PropertyId::MarginLeft, "body-start()"),
        Err(PropertyError::UnknownFunction {
            name: "body-start".to_string()
        })
    );
}

#[test]
fn test_malformed_values() {
    let root = list(None, &[]);
    for value in ["", "1pt +", "(1pt", "1zz", "rgb(1, 2)"] {
        assert!(
            matches!(
                make(&root, PropertyId::MarginLeft, value),
                Err(PropertyError::InvalidValue { .. })
            ),
            "{value:?} should be rejected"
        );
    }
}

#[test]
fn test_string_properties_keep_text() {
    let root = list(None, &[]);
    assert_eq!(
        make(&root, PropertyId::FontFamily, "'Times New Roman'").unwrap(),
        Property::String("Times New Roman".to_string())
    );
    assert_eq!(
        make(&root, PropertyId::Id, "intro").unwrap(),
        Property::String("intro".to_string())
    );
}
