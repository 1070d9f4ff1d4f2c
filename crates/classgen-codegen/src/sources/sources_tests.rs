#![allow(non_snake_case)]

use super::*;
use classgen_core::ClassConfig;
use indexmap::IndexMap;
use std::path::PathBuf;
use test_case::test_case;

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn SourceUnit___new___derives_class_from_stem() {
    let unit = SourceUnit::new("./geometries/RingGeometry.js");

    assert_eq!(unit.relative_path, "geometries/RingGeometry");
    assert_eq!(unit.class_name, "RingGeometry");
}

#[test]
fn walk_tree___keeps_matching_files_sorted() {
    let dir = tempfile::tempdir().unwrap();
    touch(dir.path(), "geometries/RingGeometry.js");
    touch(dir.path(), "core/Object3D.js");
    touch(dir.path(), "core/Object3D.d.ts");
    touch(dir.path(), "core/.hidden.js");
    touch(dir.path(), ".cache/Stale.js");
    touch(dir.path(), "Three.js");

    let units = walk_tree(dir.path(), "js").unwrap();

    let paths: Vec<_> = units.iter().map(|u| u.relative_path.as_str()).collect();
    assert_eq!(
        paths,
        vec!["Three", "core/Object3D", "geometries/RingGeometry"]
    );
}

#[test]
fn walk_tree___missing_root_is_io_error() {
    let err = walk_tree(&PathBuf::from("/no/such/library"), "js").unwrap_err();

    assert!(matches!(err, GenError::Io { .. }));
}

#[test]
fn from_store___skips_secondary_definitions() {
    let mut classes = IndexMap::new();
    classes.insert("Ring".to_string(), ClassConfig::at("./geometries/Ring"));
    classes.insert(
        "RingOutline".to_string(),
        ClassConfig::at("./geometries/Ring"),
    );
    classes.insert("Loose".to_string(), ClassConfig::default());
    let store = ConfigStore::new(classes, ClassConfig::default());

    let units = from_store(&store);

    let names: Vec<_> = units.iter().map(|u| u.class_name.as_str()).collect();
    assert_eq!(names, vec!["Ring", "Loose"]);
}

#[test]
fn enumerate___applies_filters_to_store_units() {
    let mut classes = IndexMap::new();
    classes.insert("Mesh".to_string(), ClassConfig::at("./objects/Mesh"));
    classes.insert("Line".to_string(), ClassConfig::at("./objects/Line"));
    classes.insert("Scene".to_string(), ClassConfig::at("./scenes/Scene"));
    let store = ConfigStore::new(classes, ClassConfig::default());
    let mut config = GeneratorConfig::default();
    config.generator.include = vec!["./objects/".into()];
    config.generator.exclude = vec!["objects/Line".into()];

    let units = enumerate(&config, &store).unwrap();

    assert_eq!(units, vec![SourceUnit::new("objects/Mesh")]);
}

#[test_case("core/Object3D", &[], &[], true ; "no filters")]
#[test_case("core/Object3D", &["core/"], &[], true ; "included")]
#[test_case("loaders/Loader", &["core/"], &[], false ; "not included")]
#[test_case("core/Object3D", &["core/"], &["core/Object3D"], false ; "exclusion wins")]
#[test_case("renderers/webgl/X", &[], &["./renderers/"], false ; "dot slash prefix")]
#[test_case("core/Object3D", &[], &["core/Obj"], true ; "partial segment does not exclude")]
#[test_case("coreutils/Helper", &["core"], &[], false ; "partial directory does not include")]
#[test_case("core/math/Vector3", &["core"], &[], true ; "directory without slash")]
#[test_case("core/Object3D", &["./"], &[], true ; "root prefix")]
fn is_selected___applies_prefixes(path: &str, include: &[&str], exclude: &[&str], expected: bool) {
    let include: Vec<String> = include.iter().map(|s| s.to_string()).collect();
    let exclude: Vec<String> = exclude.iter().map(|s| s.to_string()).collect();

    assert_eq!(is_selected(path, &include, &exclude), expected);
}
