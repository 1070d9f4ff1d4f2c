//! Source-unit enumeration
//!
//! A source unit is one file of the wrapped library. Its relative path is the
//! unit key and its file stem names the primary class defined in it.

use classgen_core::{ConfigStore, GenError, GenResult, GeneratorConfig, normalize_relative_path};
use std::path::Path;
use walkdir::WalkDir;

/// One source unit of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUnit {
    /// Normalized path relative to the library root (`dir/Unit`)
    pub relative_path: String,

    /// Primary class defined by the unit
    pub class_name: String,
}

impl SourceUnit {
    pub fn new(relative_path: &str) -> Self {
        let relative_path = normalize_relative_path(relative_path);
        let class_name = relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&relative_path)
            .to_string();
        Self {
            relative_path,
            class_name,
        }
    }
}

/// Enumerate the units configured for a run
///
/// Walks `generator.source_root` when set, otherwise derives the units from
/// the class table.
pub fn enumerate(config: &GeneratorConfig, store: &ConfigStore) -> GenResult<Vec<SourceUnit>> {
    let generator = &config.generator;
    let units = match &generator.source_root {
        Some(root) => walk_tree(root, &generator.source_extension)?,
        None => from_store(store),
    };

    Ok(units
        .into_iter()
        .filter(|unit| is_selected(&unit.relative_path, &generator.include, &generator.exclude))
        .collect())
}

/// Every file with `extension` under `root`, sorted by path
pub fn walk_tree(root: &Path, extension: &str) -> GenResult<Vec<SourceUnit>> {
    let mut units = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            GenError::io(path, std::io::Error::from(e))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.path().extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(root) else {
            continue;
        };
        let relative: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        units.push(SourceUnit::new(&relative.join("/")));
    }

    tracing::debug!("Found {} source units under {}", units.len(), root.display());
    Ok(units)
}

/// One unit per class that is the primary class of its relative path
pub fn from_store(store: &ConfigStore) -> Vec<SourceUnit> {
    store
        .class_names()
        .filter_map(|name| {
            let path = store.relative_path(name).ok()?;
            let unit = SourceUnit::new(&path);
            (unit.class_name == name).then_some(unit)
        })
        .collect()
}

/// Apply include and exclude prefixes to a relative path
///
/// Prefixes match whole path segments. An empty include list keeps
/// everything; exclusion wins over inclusion.
pub fn is_selected(relative_path: &str, include: &[String], exclude: &[String]) -> bool {
    let matches = |prefix: &String| has_segment_prefix(relative_path, prefix);

    let included = include.is_empty() || include.iter().any(matches);
    included && !exclude.iter().any(matches)
}

fn has_segment_prefix(path: &str, prefix: &str) -> bool {
    let prefix = prefix.trim_start_matches("./").trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }

    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn is_hidden(name: &std::ffi::OsStr) -> bool {
    name.to_str().is_some_and(|s| s.starts_with('.'))
}

#[cfg(test)]
#[path = "sources/sources_tests.rs"]
mod sources_tests;
