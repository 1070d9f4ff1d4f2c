//! Aggregation files that stitch generated wrappers into importable packages
//!
//! Aggregation runs once per language after every wrapper of the run has been
//! written, because it lists the final contents of the output tree.

pub mod index;
pub mod package;

pub use index::{IndexPlan, IndexSettings, generate_indexes, plan_indexes};
pub use package::{PackageSettings, ensure_package_markers, generate_package, plan_package};

use std::ffi::OsStr;

/// Files left behind by editors and operating systems
pub fn is_editor_artifact(name: &str) -> bool {
    name.starts_with('.')
        || name.starts_with('#')
        || name.ends_with('~')
        || name.ends_with(".swp")
        || name.ends_with(".swo")
        || name.ends_with(".bak")
        || name == "Thumbs.db"
}

/// Directories never descended into while aggregating
fn is_skipped_dir(name: &OsStr) -> bool {
    name.to_str()
        .is_none_or(|n| n.starts_with('.') || n == "node_modules" || n == "__pycache__")
}
