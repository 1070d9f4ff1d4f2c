#![allow(non_snake_case)]

use super::*;
use crate::storage::FsStorage;

fn settings() -> PackageSettings {
    PackageSettings::from_config(&GeneratorConfig::default())
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, "").unwrap();
}

#[test]
fn marker_dirs___covers_every_level_below_root() {
    let layout = Layout::python("pkg");
    let generated = vec![
        PathBuf::from("pkg/geometries/Ring_autogen.py"),
        PathBuf::from("pkg/renderers/webgl/Target_autogen.py"),
    ];

    let dirs = marker_dirs(&layout, &generated);

    assert_eq!(
        dirs.into_iter().collect::<Vec<_>>(),
        vec![
            PathBuf::from("pkg"),
            PathBuf::from("pkg/geometries"),
            PathBuf::from("pkg/renderers"),
            PathBuf::from("pkg/renderers/webgl"),
        ]
    );
}

#[tokio::test]
async fn ensure_package_markers___is_idempotent_and_preserves_content() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("pkg");
    touch(&root, "core/Object3D_autogen.py");
    std::fs::write(root.join("__init__.py"), "from ._package import *\n").unwrap();
    let layout = Layout::python(&root);
    let generated = vec![root.join("core/Object3D_autogen.py")];

    let first = ensure_package_markers(&FsStorage, &layout, &generated)
        .await
        .unwrap();
    let second = ensure_package_markers(&FsStorage, &layout, &generated)
        .await
        .unwrap();

    assert_eq!(first, vec![root.join("core/__init__.py")]);
    assert!(second.is_empty());
    assert_eq!(
        std::fs::read_to_string(root.join("__init__.py")).unwrap(),
        "from ._package import *\n"
    );
}

#[test]
fn plan_package___imports_every_module_once() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("pkg");
    touch(&root, "__init__.py");
    touch(&root, "_package.py");
    touch(&root, "_version.py");
    touch(&root, "traits.py");
    touch(&root, "core/__init__.py");
    touch(&root, "core/Object3D_autogen.py");
    touch(&root, "geometries/Ring_autogen.py");
    touch(&root, "geometries/Ring.py");
    touch(&root, "geometries/__pycache__/Ring.cpython-312.py");
    touch(&root, "geometries/notes.txt");
    let layout = Layout::python(&root);

    let modules = plan_package(&layout, &settings()).unwrap();

    assert_eq!(
        modules,
        vec![".core.Object3D_autogen", ".geometries.Ring", ".traits"]
    );
}

#[test]
fn plan_package___missing_output_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let layout = Layout::python(dir.path().join("absent"));

    assert!(plan_package(&layout, &settings()).unwrap().is_empty());
}

#[tokio::test]
async fn generate_package___writes_aggregator_at_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("pkg");
    touch(&root, "objects/Mesh_autogen.py");
    let layout = Layout::python(&root);
    let engine = TemplateEngine::new().unwrap();

    let path = generate_package(&engine, &FsStorage, &layout, &settings())
        .await
        .unwrap();

    assert_eq!(path, root.join("_package.py"));
    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("from .objects.Mesh_autogen import *"));
}
