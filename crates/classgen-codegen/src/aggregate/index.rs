//! JavaScript directory indexes
//!
//! Every directory of the output tree gets an `index.js` re-exporting its
//! modules and the indexes of its subdirectories. A generated artifact is
//! listed only when no override sits next to it; inside the base directory
//! generated artifacts are never listed.

use super::{is_editor_artifact, is_skipped_dir};
use crate::GENERATOR_VERSION;
use crate::context::LibraryContext;
use crate::storage::Storage;
use crate::templates::{JS_INDEX, TemplateEngine};
use classgen_core::{GenError, GenResult, GeneratorConfig, Layout};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Index file name
pub const INDEX_FILE: &str = "index.js";

/// Exclusion rules for directory indexes
#[derive(Debug, Clone)]
pub struct IndexSettings {
    /// Directory of hand-written base modules, relative to the output root
    pub base_dir: String,

    /// Non-generated entry points never re-exported
    pub entry_points: Vec<String>,

    pub library: LibraryContext,
}

impl IndexSettings {
    pub fn from_config(config: &GeneratorConfig) -> Self {
        Self {
            base_dir: config.layout.base_dir.clone(),
            entry_points: config.javascript.entry_points.clone(),
            library: LibraryContext {
                module: config.javascript.library_module.clone(),
                namespace: config.javascript.library_namespace.clone(),
            },
        }
    }
}

/// One directory index to write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexPlan {
    pub path: PathBuf,

    /// Whether this is the index at the output root
    pub top: bool,

    /// Module specifiers in export order
    pub modules: Vec<String>,
}

#[derive(Serialize)]
struct IndexContext<'a> {
    version: &'static str,
    top: bool,
    library: &'a LibraryContext,
    modules: &'a [String],
}

/// Plan one index per directory of the output tree, parents before children
pub fn plan_indexes(layout: &Layout, settings: &IndexSettings) -> GenResult<Vec<IndexPlan>> {
    let root = layout.output_dir();
    if !root.is_dir() {
        return Ok(Vec::new());
    }
    let base_dir = root.join(&settings.base_dir);

    let mut plans = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !is_skipped_dir(e.file_name()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            GenError::io(path, std::io::Error::from(e))
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let dir = entry.path();
        let (files, dirs) = list_directory(dir)?;
        let modules = index_modules(layout, settings, dir == base_dir, &files, &dirs);
        plans.push(IndexPlan {
            path: dir.join(INDEX_FILE),
            top: entry.depth() == 0,
            modules,
        });
    }

    Ok(plans)
}

/// Module specifiers for one directory, given its immediate entries
///
/// Files come first, then subdirectory indexes, each in name order.
pub fn index_modules(
    layout: &Layout,
    settings: &IndexSettings,
    in_base_dir: bool,
    files: &BTreeSet<String>,
    dirs: &BTreeSet<String>,
) -> Vec<String> {
    let extension = layout.extension();

    let listed_files = files.iter().filter(|name| {
        if is_editor_artifact(name) || !name.ends_with(extension) || *name == INDEX_FILE {
            return false;
        }
        if settings.entry_points.iter().any(|e| e == *name) {
            return false;
        }
        if layout.is_generated_file(name) {
            if in_base_dir {
                return false;
            }
            let overridden = layout
                .override_for(Path::new(name.as_str()))
                .and_then(|p| p.to_str().map(str::to_string))
                .is_some_and(|o| files.contains(&o));
            return !overridden;
        }
        true
    });

    listed_files
        .map(|name| format!("./{name}"))
        .chain(dirs.iter().map(|d| format!("./{d}/{INDEX_FILE}")))
        .collect()
}

/// Render and write every directory index
pub async fn generate_indexes(
    engine: &TemplateEngine,
    storage: &dyn Storage,
    layout: &Layout,
    settings: &IndexSettings,
) -> GenResult<Vec<PathBuf>> {
    let plans = plan_indexes(layout, settings)?;
    let mut written = Vec::with_capacity(plans.len());

    for plan in plans {
        let context = IndexContext {
            version: GENERATOR_VERSION,
            top: plan.top,
            library: &settings.library,
            modules: &plan.modules,
        };
        let contents = engine.render(JS_INDEX, &plan.path.display().to_string(), &context)?;
        storage.write(&plan.path, &contents).await?;
        tracing::debug!(
            "Wrote {} ({} modules)",
            plan.path.display(),
            plan.modules.len()
        );
        written.push(plan.path);
    }

    Ok(written)
}

/// Immediate file and directory names of `dir`
fn list_directory(dir: &Path) -> GenResult<(BTreeSet<String>, BTreeSet<String>)> {
    let mut files = BTreeSet::new();
    let mut dirs = BTreeSet::new();

    let entries = std::fs::read_dir(dir).map_err(|e| GenError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| GenError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| GenError::io(entry.path(), e))?;
        let name = entry.file_name();
        if file_type.is_dir() {
            if !is_skipped_dir(&name) {
                dirs.insert(name.to_string_lossy().into_owned());
            }
        } else {
            files.insert(name.to_string_lossy().into_owned());
        }
    }

    Ok((files, dirs))
}
