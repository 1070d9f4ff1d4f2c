#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

fn parse(json: &str) -> PropertyDescriptor {
    serde_json::from_str(json).unwrap()
}

// Deserialization

#[test]
fn PropertyDescriptor___deserialize___reads_tagged_variant() {
    let prop = parse(r#"{"type": "float", "default": 1.5}"#);

    assert_eq!(
        prop,
        PropertyDescriptor::Float {
            default: Some(1.5),
            nullable: false
        }
    );
}

#[test]
fn PropertyDescriptor___deserialize___reads_camel_case_fields() {
    let prop = parse(r#"{"type": "enum", "enumType": "Side", "default": "FrontSide"}"#);

    assert_eq!(prop.enum_type(), Some("Side"));
}

#[test]
fn PropertyDescriptor___deserialize___class_ref_defaults_to_nullable() {
    let prop = parse(r#"{"type": "classRef", "class": "Material"}"#);

    assert!(prop.is_nullable());
}

#[test]
fn PropertyDescriptor___deserialize___rejects_unknown_type() {
    let result = serde_json::from_str::<PropertyDescriptor>(r#"{"type": "quaternionish"}"#);

    assert!(result.is_err());
}

// Default literals

#[test_case(r#"{"type": "bool", "default": true}"#, "true", "True" ; "bool")]
#[test_case(r#"{"type": "bool", "nullable": true}"#, "null", "None" ; "nullable bool")]
#[test_case(r#"{"type": "int", "default": 8}"#, "8", "8" ; "int")]
#[test_case(r#"{"type": "float", "default": 1}"#, "1.0", "1.0" ; "whole float")]
#[test_case(r#"{"type": "float", "default": 0.25}"#, "0.25", "0.25" ; "fractional float")]
#[test_case(r#"{"type": "string", "default": "it's"}"#, r#""it's""#, r#""it's""# ; "string")]
#[test_case(r#"{"type": "color"}"#, r##""#ffffff""##, r##""#ffffff""## ; "color fallback")]
#[test_case(r#"{"type": "vector3"}"#, "[0.0, 0.0, 0.0]", "[0.0, 0.0, 0.0]" ; "vector3 fallback")]
#[test_case(r#"{"type": "euler"}"#, r#"[0.0, 0.0, 0.0, "XYZ"]"#, r#"[0.0, 0.0, 0.0, "XYZ"]"# ; "euler")]
#[test_case(r#"{"type": "classRef"}"#, "null", "None" ; "class ref")]
#[test_case(r#"{"type": "classRefArray"}"#, "[]", "[]" ; "class ref array")]
#[test_case(r#"{"type": "dict", "default": {"a": true}}"#, r#"{"a": true}"#, r#"{"a": True}"# ; "dict")]
#[test_case(r#"{"type": "any", "default": [1, false]}"#, "[1, false]", "[1, False]" ; "any with list")]
#[test_case(r#"{"type": "any", "nullable": true}"#, "null", "None" ; "nullable any")]
fn PropertyDescriptor___default_literal___renders_per_language(json: &str, js: &str, py: &str) {
    let prop = parse(json);

    assert_eq!(prop.default_literal(Language::JavaScript).as_deref(), Some(js));
    assert_eq!(prop.default_literal(Language::Python).as_deref(), Some(py));
}

#[test]
fn PropertyDescriptor___default_literal___matrix3_defaults_to_identity() {
    let prop = parse(r#"{"type": "matrix3"}"#);

    assert_eq!(
        prop.default_literal(Language::JavaScript).unwrap(),
        "[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]"
    );
}

#[test]
fn PropertyDescriptor___default_literal___infinite_float_differs_per_language() {
    let prop = PropertyDescriptor::Float {
        default: Some(f64::INFINITY),
        nullable: false,
    };

    assert_eq!(
        prop.default_literal(Language::JavaScript).unwrap(),
        "Infinity"
    );
    assert_eq!(
        prop.default_literal(Language::Python).unwrap(),
        "float('inf')"
    );
}

#[test]
fn PropertyDescriptor___default_literal___any_without_default_has_none() {
    let prop = parse(r#"{"type": "any"}"#);

    assert_eq!(prop.default_literal(Language::JavaScript), None);
    assert_eq!(prop.default_literal(Language::Python), None);
}

// Referenced classes

#[test]
fn PropertyDescriptor___referenced_classes___named_class_ref() {
    let prop = parse(r#"{"type": "classRef", "class": "Material"}"#);

    assert_eq!(
        prop.referenced_classes(),
        vec![ClassTarget::Named("Material".into())]
    );
}

#[test]
fn PropertyDescriptor___referenced_classes___unnamed_class_ref_is_base() {
    let prop = parse(r#"{"type": "classRef"}"#);

    assert_eq!(prop.referenced_classes(), vec![ClassTarget::Base]);
}

#[test]
fn PropertyDescriptor___referenced_classes___heterogeneous_array() {
    let prop = parse(r#"{"type": "classRefArray", "classes": ["Mesh", "Line"]}"#);

    assert_eq!(
        prop.referenced_classes(),
        vec![
            ClassTarget::Named("Mesh".into()),
            ClassTarget::Named("Line".into())
        ]
    );
}

#[test]
fn PropertyDescriptor___referenced_classes___empty_dict_is_base() {
    let prop = parse(r#"{"type": "classRefDict"}"#);

    assert_eq!(prop.referenced_classes(), vec![ClassTarget::Base]);
}

#[test]
fn PropertyDescriptor___referenced_classes___scalars_reference_nothing() {
    assert!(parse(r#"{"type": "float"}"#).referenced_classes().is_empty());
    assert!(parse(r#"{"type": "vector3"}"#).referenced_classes().is_empty());
}

// Other capabilities

#[test]
fn PropertyDescriptor___serializer___only_for_class_refs() {
    let class_ref = parse(r#"{"type": "classRef"}"#);
    let float = parse(r#"{"type": "float"}"#);

    assert_eq!(class_ref.serializer(Language::JavaScript), Some("unpackModels"));
    assert_eq!(
        class_ref.serializer(Language::Python),
        Some("widget_serialization")
    );
    assert_eq!(float.serializer(Language::JavaScript), None);
}

#[test]
fn PropertyDescriptor___grouping___matches_collection_shape() {
    assert_eq!(
        parse(r#"{"type": "classRef"}"#).grouping(),
        Some(Grouping::Child)
    );
    assert_eq!(
        parse(r#"{"type": "classRefArray"}"#).grouping(),
        Some(Grouping::Array)
    );
    assert_eq!(
        parse(r#"{"type": "classRefDict"}"#).grouping(),
        Some(Grouping::Dict)
    );
    assert_eq!(parse(r#"{"type": "int"}"#).grouping(), None);
}

#[test]
fn PropertyDescriptor___converter_and_assigner___vector_uses_both() {
    let prop = parse(r#"{"type": "vector2"}"#);

    assert_eq!(prop.converter(), Some("Vector"));
    assert_eq!(prop.assigner(), Some("Vector"));
    assert_eq!(parse(r#"{"type": "string"}"#).converter(), None);
}
