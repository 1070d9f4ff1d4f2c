//! Python package registration
//!
//! Two steps: make every directory holding generated output a package, then
//! write a single aggregator at the output root that star-imports every
//! module. Generated modules shadowed by an override are left to the override,
//! which imports them itself.

use super::{is_editor_artifact, is_skipped_dir};
use crate::GENERATOR_VERSION;
use crate::storage::Storage;
use crate::templates::{PY_PACKAGE, TemplateEngine};
use classgen_core::{GenError, GenResult, GeneratorConfig, Layout};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Package marker file name
pub const PACKAGE_MARKER: &str = "__init__.py";

/// Aggregator rules
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Aggregator file name at the output root
    pub aggregator: String,

    /// Non-generated modules never imported
    pub deny_list: Vec<String>,
}

impl PackageSettings {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            aggregator: config.python.aggregator.clone(),
            deny_list: config.python.deny_list.clone(),
        }
    }
}

#[derive(Serialize)]
struct PackageContext<'a> {
    version: &'static str,
    modules: &'a [String],
}

/// Directories from the output root down to each generated file
pub fn marker_dirs(layout: &Layout, generated: &[PathBuf]) -> BTreeSet<PathBuf> {
    let root = layout.output_dir();
    let mut dirs = BTreeSet::new();

    for file in generated {
        let Some(parent) = file.parent() else {
            continue;
        };
        let Ok(relative) = parent.strip_prefix(root) else {
            continue;
        };

        let mut dir = root.to_path_buf();
        dirs.insert(dir.clone());
        for component in relative.components() {
            dir.push(component);
            dirs.insert(dir.clone());
        }
    }

    dirs
}

/// Ensure a package marker exists in every directory holding generated output
///
/// Existing markers are left untouched. Returns the markers created.
pub async fn ensure_package_markers(
    storage: &dyn Storage,
    layout: &Layout,
    generated: &[PathBuf],
) -> GenResult<Vec<PathBuf>> {
    let mut created = Vec::new();

    for dir in marker_dirs(layout, generated) {
        let marker = dir.join(PACKAGE_MARKER);
        if storage.ensure_exists(&marker).await? {
            tracing::debug!("Created {}", marker.display());
            created.push(marker);
        }
    }

    Ok(created)
}

/// Package-relative module paths to import, in walk order
pub fn plan_package(layout: &Layout, settings: &PackageSettings) -> GenResult<Vec<String>> {
    let root = layout.output_dir();
    if !root.is_dir() {
        return Ok(Vec::new());
    }

    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !is_skipped_dir(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            GenError::io(path, std::io::Error::from(e))
        })?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }

    let present: BTreeSet<&Path> = files.iter().map(PathBuf::as_path).collect();

    Ok(files
        .iter()
        .filter(|file| is_importable(layout, settings, file, &present))
        .filter_map(|file| layout.module_path(file))
        .collect())
}

fn is_importable(
    layout: &Layout,
    settings: &PackageSettings,
    file: &Path,
    present: &BTreeSet<&Path>,
) -> bool {
    let Some(name) = file.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if is_editor_artifact(name) || !name.ends_with(layout.extension()) {
        return false;
    }
    if name == PACKAGE_MARKER || name == settings.aggregator {
        return false;
    }
    if settings.deny_list.iter().any(|d| d == name) {
        return false;
    }
    if layout.is_generated_file(name) {
        let overridden = layout
            .override_for(file)
            .is_some_and(|o| present.contains(o.as_path()));
        return !overridden;
    }
    true
}

/// Render and write the aggregator
pub async fn generate_package(
    engine: &TemplateEngine,
    storage: &dyn Storage,
    layout: &Layout,
    settings: &PackageSettings,
) -> GenResult<PathBuf> {
    let modules = plan_package(layout, settings)?;
    let path = layout.output_dir().join(&settings.aggregator);

    let context = PackageContext {
        version: GENERATOR_VERSION,
        modules: &modules,
    };
    let contents = engine.render(PY_PACKAGE, &settings.aggregator, &context)?;
    storage.write(&path, &contents).await?;

    tracing::debug!("Wrote {} ({} modules)", path.display(), modules.len());
    Ok(path)
}

#[cfg(test)]
#[path = "package/package_tests.rs"]
mod package_tests;
