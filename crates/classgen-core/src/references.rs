//! Inference and resolution of the artifacts a generated wrapper imports
//!
//! A class references its superclass, its explicit dependencies, and every
//! class named by one of its own properties. Inherited property references are
//! not repeated: they are reachable through the superclass artifact.

use crate::layout::normalize_relative_path;
use crate::property::ClassTarget;
use crate::store::is_bare_path;
use crate::{ConfigStore, GenError, GenResult, Layout, OverrideDetector, ResolvedConfig};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// References keyed by target class name, ordered for stable output
pub type ReferenceTable = BTreeMap<String, ReferenceDescriptor>;

/// One resolved reference, scoped to the file being generated
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDescriptor {
    pub target_class: String,
    pub target_relative_path: String,

    /// Override file if one exists, otherwise the generated artifact
    pub resolved_path: PathBuf,

    /// Language-specific import path relative to the generating file
    pub import_path: String,

    pub is_override: bool,
}

/// Resolves class references into import paths for one language
pub struct ReferenceResolver<'a> {
    store: &'a ConfigStore,
    layout: &'a Layout,
    detector: &'a dyn OverrideDetector,
    base_path: String,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        store: &'a ConfigStore,
        layout: &'a Layout,
        detector: &'a dyn OverrideDetector,
    ) -> Self {
        Self {
            store,
            layout,
            detector,
            base_path: format!("_base/{}", store.root()),
        }
    }

    /// Set the relative path of the root sentinel's artifact
    #[must_use]
    pub fn with_base_path(mut self, base_path: &str) -> Self {
        self.base_path = normalize_relative_path(base_path);
        self
    }

    /// Compute every reference the wrapper for `config` must import
    ///
    /// `generating_file` is the output location of the wrapper itself.
    pub fn resolve_references(
        &self,
        config: &ResolvedConfig,
        generating_file: &Path,
    ) -> GenResult<ReferenceTable> {
        let mut table = ReferenceTable::new();

        let superclass = self.superclass_reference(config, generating_file)?;
        table.insert(superclass.target_class.clone(), superclass);

        for dependency in &config.dependencies {
            let target = self.locate(config, dependency)?;
            if target.name != config.class_name {
                let reference = self.describe(target, generating_file);
                table.insert(reference.target_class.clone(), reference);
            }
        }

        for (prop_name, prop) in &config.own_properties {
            for target in prop.referenced_classes() {
                let target = match target {
                    ClassTarget::Named(name) => self.locate(config, &name)?,
                    ClassTarget::Base => self.base(),
                };
                if target.name == config.class_name {
                    continue;
                }
                tracing::trace!(
                    "{}.{} references {}",
                    config.class_name,
                    prop_name,
                    target.name
                );
                // Same key always means same target; later entries overwrite
                let reference = self.describe(target, generating_file);
                table.insert(reference.target_class.clone(), reference);
            }
        }

        Ok(table)
    }

    /// Reference to the superclass artifact, or the base type for root classes
    pub fn superclass_reference(
        &self,
        config: &ResolvedConfig,
        generating_file: &Path,
    ) -> GenResult<ReferenceDescriptor> {
        let target = match &config.super_class {
            Some(super_class) => self.locate(config, super_class)?,
            None => self.base(),
        };
        Ok(self.describe(target, generating_file))
    }

    /// Reference to the base type artifact
    pub fn base_reference(&self, generating_file: &Path) -> ReferenceDescriptor {
        self.describe(self.base(), generating_file)
    }

    fn base(&self) -> Target {
        let stem = self
            .base_path
            .rsplit('/')
            .next()
            .unwrap_or(self.store.root())
            .to_string();
        Target {
            name: self.store.root().to_string(),
            stem,
            path: self.base_path.clone(),
        }
    }

    /// Locate a class name or bare path
    fn locate(&self, from: &ResolvedConfig, reference: &str) -> GenResult<Target> {
        if self.store.contains(reference) {
            return Ok(Target {
                name: reference.to_string(),
                stem: reference.to_string(),
                path: self.store.relative_path(reference)?,
            });
        }
        if self.store.is_root(reference) {
            return Ok(self.base());
        }
        if is_bare_path(reference) {
            let path = normalize_relative_path(reference);
            let name = path.rsplit('/').next().unwrap_or(&path).to_string();
            return Ok(Target {
                stem: name.clone(),
                name,
                path,
            });
        }

        Err(GenError::InvalidReference {
            class: from.class_name.clone(),
            reference: reference.to_string(),
        })
    }

    fn describe(&self, target: Target, generating_file: &Path) -> ReferenceDescriptor {
        let override_path = self.layout.override_path(&target.stem, &target.path);
        let is_override = self.detector.is_override_present(&override_path);
        let resolved_path = if is_override {
            override_path
        } else {
            self.layout.generated_path(&target.stem, &target.path)
        };

        ReferenceDescriptor {
            target_class: target.name,
            target_relative_path: target.path,
            import_path: self.layout.import_path(generating_file, &resolved_path),
            resolved_path,
            is_override,
        }
    }
}

/// A located reference target
struct Target {
    name: String,
    /// File stem of the target's artifacts
    stem: String,
    path: String,
}

#[cfg(test)]
#[path = "references/references_tests.rs"]
mod references_tests;
