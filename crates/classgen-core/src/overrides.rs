//! Detection of hand-written override files
//!
//! The generator never reads or writes an override; it only asks whether one
//! occupies a conventional location.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Answers whether a hand-written file occupies a location
pub trait OverrideDetector: Send + Sync {
    fn is_override_present(&self, path: &Path) -> bool;
}

/// Checks the filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct FsOverrideDetector;

impl OverrideDetector for FsOverrideDetector {
    fn is_override_present(&self, path: &Path) -> bool {
        path.is_file()
    }
}

/// A fixed set of override locations, for dry runs and tests
#[derive(Debug, Clone, Default)]
pub struct KnownOverrides {
    paths: HashSet<PathBuf>,
}

impl KnownOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(path.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>) {
        self.paths.insert(path.into());
    }
}

impl OverrideDetector for KnownOverrides {
    fn is_override_present(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }
}

impl<T: OverrideDetector + ?Sized> OverrideDetector for std::sync::Arc<T> {
    fn is_override_present(&self, path: &Path) -> bool {
        (**self).is_override_present(path)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn FsOverrideDetector___existing_file___is_present() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Mesh.js");
        std::fs::write(&path, "export {};").unwrap();

        assert!(FsOverrideDetector.is_override_present(&path));
    }

    #[test]
    fn FsOverrideDetector___missing_file___is_absent() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!FsOverrideDetector.is_override_present(&dir.path().join("Mesh.js")));
    }

    #[test]
    fn FsOverrideDetector___directory___is_not_an_override() {
        let dir = tempfile::tempdir().unwrap();

        assert!(!FsOverrideDetector.is_override_present(dir.path()));
    }

    #[test]
    fn KnownOverrides___with___matches_exact_paths() {
        let overrides = KnownOverrides::new().with("js/core/Mesh.js");

        assert!(overrides.is_override_present(Path::new("js/core/Mesh.js")));
        assert!(!overrides.is_override_present(Path::new("js/core/Line.js")));
    }
}
