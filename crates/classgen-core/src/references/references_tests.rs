#![allow(non_snake_case)]

use super::*;
use crate::{ClassConfig, KnownOverrides, PropertyDescriptor};
use indexmap::IndexMap;

fn float() -> PropertyDescriptor {
    PropertyDescriptor::Float {
        default: Some(1.0),
        nullable: false,
    }
}

fn class_ref(class: Option<&str>) -> PropertyDescriptor {
    PropertyDescriptor::ClassRef {
        class: class.map(str::to_string),
        nullable: true,
    }
}

fn table() -> ConfigStore {
    let mut classes = IndexMap::new();
    classes.insert(
        "Base".to_string(),
        ClassConfig::at("./core/Base").with_property(
            "color",
            PropertyDescriptor::Color {
                default: None,
                nullable: false,
            },
        ),
    );
    classes.insert(
        "Shape".to_string(),
        ClassConfig::at("./extras/Shape")
            .extends("Base")
            .with_property("radius", float()),
    );
    classes.insert(
        "Ring".to_string(),
        ClassConfig::at("./geometries/Ring")
            .extends("Shape")
            .with_property("innerRadius", float()),
    );
    classes.insert(
        "RingOutline".to_string(),
        ClassConfig::at("./geometries/Ring").extends("Ring"),
    );
    classes.insert(
        "Mesh".to_string(),
        ClassConfig::at("./objects/Mesh")
            .extends("Base")
            .with_property("geometry", class_ref(Some("Shape")))
            .with_property("material", class_ref(None))
            .with_property("parent", class_ref(Some("Mesh"))),
    );
    classes.insert(
        "Scene".to_string(),
        ClassConfig::at("./scenes/Scene")
            .with_dependency("Mesh")
            .with_dependency("./renderers/shaders/UniformsLib")
            .with_property(
                "children",
                PropertyDescriptor::ClassRefArray {
                    classes: vec!["Mesh".into(), "Scene".into()],
                },
            ),
    );
    ConfigStore::new(classes, ClassConfig::default())
}

fn references(
    store: &ConfigStore,
    layout: &Layout,
    overrides: &KnownOverrides,
    class: &str,
) -> GenResult<ReferenceTable> {
    let config = store.resolve(class)?;
    let generating = layout.generated_path(class, &config.relative_path);
    ReferenceResolver::new(store, layout, overrides).resolve_references(&config, &generating)
}

#[test]
fn ReferenceResolver___resolve_references___superclass_only_for_plain_subclass() {
    let store = table();
    let layout = Layout::javascript("js");

    let refs = references(&store, &layout, &KnownOverrides::new(), "Ring").unwrap();

    assert_eq!(refs.keys().collect::<Vec<_>>(), vec!["Shape"]);
    let shape = &refs["Shape"];
    assert_eq!(shape.target_relative_path, "extras/Shape");
    assert_eq!(
        shape.resolved_path,
        PathBuf::from("js/extras/Shape.autogen.js")
    );
    assert_eq!(shape.import_path, "../extras/Shape.autogen.js");
    assert!(!shape.is_override);
}

#[test]
fn ReferenceResolver___resolve_references___extra_definition_imports_sibling() {
    let store = table();
    let layout = Layout::javascript("js");

    let refs = references(&store, &layout, &KnownOverrides::new(), "RingOutline").unwrap();

    assert_eq!(refs["Ring"].import_path, "./Ring.autogen.js");
}

#[test]
fn ReferenceResolver___resolve_references___points_at_override_when_present() {
    let store = table();
    let layout = Layout::javascript("js");
    let overrides = KnownOverrides::new().with("js/extras/Shape.js");

    let refs = references(&store, &layout, &overrides, "Ring").unwrap();

    let shape = &refs["Shape"];
    assert!(shape.is_override);
    assert_eq!(shape.resolved_path, PathBuf::from("js/extras/Shape.js"));
    assert_eq!(shape.import_path, "../extras/Shape.js");
}

#[test]
fn ReferenceResolver___resolve_references___root_class_references_base() {
    let store = table();
    let layout = Layout::javascript("js");

    let refs = references(&store, &layout, &KnownOverrides::new(), "Base").unwrap();

    let base = &refs["Three"];
    assert_eq!(base.target_relative_path, "_base/Three");
    assert_eq!(base.import_path, "../_base/Three.autogen.js");
}

#[test]
fn ReferenceResolver___resolve_references___property_targets_and_base() {
    let store = table();
    let layout = Layout::javascript("js");

    let refs = references(&store, &layout, &KnownOverrides::new(), "Mesh").unwrap();

    assert_eq!(
        refs.keys().collect::<Vec<_>>(),
        vec!["Base", "Shape", "Three"]
    );
    assert!(!refs.contains_key("Mesh"));
}

#[test]
fn ReferenceResolver___resolve_references___dependencies_and_bare_paths() {
    let store = table();
    let layout = Layout::javascript("js");

    let refs = references(&store, &layout, &KnownOverrides::new(), "Scene").unwrap();

    assert_eq!(
        refs.keys().collect::<Vec<_>>(),
        vec!["Mesh", "Three", "UniformsLib"]
    );
    let uniforms = &refs["UniformsLib"];
    assert_eq!(uniforms.target_relative_path, "renderers/shaders/UniformsLib");
    assert_eq!(
        uniforms.import_path,
        "../renderers/shaders/UniformsLib.autogen.js"
    );
}

#[test]
fn ReferenceResolver___resolve_references___python_import_paths() {
    let store = table();
    let layout = Layout::python("pkg");

    let refs = references(&store, &layout, &KnownOverrides::new(), "Ring").unwrap();

    assert_eq!(refs["Shape"].import_path, "..extras.Shape_autogen");
}

#[test]
fn ReferenceResolver___resolve_references___python_override_import() {
    let store = table();
    let layout = Layout::python("pkg");
    let overrides = KnownOverrides::new().with("pkg/geometries/Ring.py");

    let refs = references(&store, &layout, &overrides, "RingOutline").unwrap();

    assert_eq!(refs["Ring"].import_path, ".Ring");
    assert!(refs["Ring"].is_override);
}

#[test]
fn ReferenceResolver___resolve_references___unknown_dependency_is_invalid() {
    let mut classes = IndexMap::new();
    classes.insert(
        "Broken".to_string(),
        ClassConfig::default().with_dependency("Nowhere"),
    );
    let store = ConfigStore::new(classes, ClassConfig::default());
    let layout = Layout::javascript("js");

    let err = references(&store, &layout, &KnownOverrides::new(), "Broken").unwrap_err();

    assert!(matches!(
        err,
        GenError::InvalidReference { class, reference } if class == "Broken" && reference == "Nowhere"
    ));
}

#[test]
fn ReferenceResolver___resolve_references___unknown_property_target_is_invalid() {
    let mut classes = IndexMap::new();
    classes.insert(
        "Holder".to_string(),
        ClassConfig::default().with_property("thing", class_ref(Some("Ghost"))),
    );
    let store = ConfigStore::new(classes, ClassConfig::default());
    let layout = Layout::javascript("js");

    let err = references(&store, &layout, &KnownOverrides::new(), "Holder").unwrap_err();

    assert!(matches!(err, GenError::InvalidReference { .. }));
}

#[test]
fn ReferenceResolver___with_base_path___relocates_root_artifact() {
    let store = table();
    let layout = Layout::javascript("js");
    let overrides = KnownOverrides::new();
    let config = store.resolve("Base").unwrap();
    let generating = layout.generated_path("Base", &config.relative_path);

    let refs = ReferenceResolver::new(&store, &layout, &overrides)
        .with_base_path("./shared/Root.js")
        .resolve_references(&config, &generating)
        .unwrap();

    assert_eq!(refs["Three"].target_relative_path, "shared/Root");
    assert_eq!(refs["Three"].import_path, "../shared/Root.autogen.js");
}

#[test]
fn ReferenceResolver___base_reference___prefers_hand_written_base() {
    let store = table();
    let layout = Layout::javascript("js");
    let overrides = KnownOverrides::new().with("js/_base/Three.js");

    let base = ReferenceResolver::new(&store, &layout, &overrides)
        .base_reference(Path::new("js/geometries/Ring.autogen.js"));

    assert!(base.is_override);
    assert_eq!(base.import_path, "../_base/Three.js");
}
