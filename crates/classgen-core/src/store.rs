//! Config store: the declarative class table for one run

use crate::layout::normalize_relative_path;
use crate::property::ClassTarget;
use crate::resolve::{ConfigResolver, ResolvedConfig};
use crate::{ClassConfig, ConstructorArg, GenError, GenResult};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Key of the record holding global defaults
pub const DEFAULTS_KEY: &str = "_defaults";

/// Root sentinel used when none is configured
pub const DEFAULT_ROOT_CLASS: &str = "Three";

/// Immutable class table with a precomputed path index
#[derive(Debug, Clone)]
pub struct ConfigStore {
    classes: IndexMap<String, ClassConfig>,
    defaults: ClassConfig,
    root: String,
    by_path: HashMap<String, Vec<String>>,
}

impl ConfigStore {
    /// Build a store from class records and a defaults record
    pub fn new(classes: IndexMap<String, ClassConfig>, defaults: ClassConfig) -> Self {
        let mut by_path: HashMap<String, Vec<String>> = HashMap::new();
        for (name, config) in &classes {
            by_path
                .entry(relative_path_of(name, config))
                .or_default()
                .push(name.clone());
        }

        Self {
            classes,
            defaults,
            root: DEFAULT_ROOT_CLASS.to_string(),
            by_path,
        }
    }

    /// Build a store from a raw table that may contain the `_defaults` record
    pub fn from_table(mut table: IndexMap<String, ClassConfig>) -> Self {
        let defaults = table.shift_remove(DEFAULTS_KEY).unwrap_or_default();
        Self::new(table, defaults)
    }

    /// Set the root sentinel class name
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Parse a JSON class table
    pub fn from_json_str(content: &str) -> GenResult<Self> {
        let table: IndexMap<String, ClassConfig> = serde_json::from_str(content)?;
        Ok(Self::from_table(table))
    }

    /// Parse a TOML class table
    pub fn from_toml_str(content: &str) -> GenResult<Self> {
        let table: IndexMap<String, ClassConfig> = toml::from_str(content)?;
        Ok(Self::from_table(table))
    }

    /// Load a class table, choosing the format from the file extension
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;

        let store = match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => Err(GenError::Config(format!(
                "unsupported class table format {:?} for {}",
                other.unwrap_or(""),
                path.display()
            ))),
        }?;

        tracing::debug!(
            "Loaded {} class configurations from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Root sentinel class name
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Whether a superclass name terminates the chain
    pub fn is_root(&self, name: &str) -> bool {
        name == self.root
    }

    /// The `_defaults` record
    pub fn defaults(&self) -> &ClassConfig {
        &self.defaults
    }

    /// Look up a class record
    pub fn get(&self, name: &str) -> Option<&ClassConfig> {
        self.classes.get(name)
    }

    /// Look up a class record together with the store-owned key
    pub(crate) fn entry(&self, name: &str) -> Option<(&str, &ClassConfig)> {
        self.classes
            .get_key_value(name)
            .map(|(key, config)| (key.as_str(), config))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Class names in table order
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.classes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Normalized relative path of a class
    pub fn relative_path(&self, name: &str) -> GenResult<String> {
        self.get(name)
            .map(|config| relative_path_of(name, config))
            .ok_or_else(|| GenError::UnknownClass(name.to_string()))
    }

    /// Other classes defined in the same source unit as `name`, in table order
    pub fn extra_definitions(&self, name: &str) -> GenResult<Vec<&str>> {
        let path = self.relative_path(name)?;

        Ok(self
            .by_path
            .get(&path)
            .map(|names| {
                names
                    .iter()
                    .map(String::as_str)
                    .filter(|other| *other != name)
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Resolve one class with a fresh resolver
    pub fn resolve(&self, name: &str) -> GenResult<Arc<ResolvedConfig>> {
        ConfigResolver::new(self).resolve(name)
    }

    /// Check every class and collect all class-scoped errors
    ///
    /// Covers superclass chains, explicit dependencies, property references,
    /// and constructor arguments.
    pub fn validate(&self) -> Vec<GenError> {
        let mut resolver = ConfigResolver::new(self);
        let mut errors = Vec::new();

        for name in self.class_names() {
            let resolved = match resolver.resolve(name) {
                Ok(resolved) => resolved,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };

            for dependency in &resolved.dependencies {
                if !self.is_known_reference(dependency) && !is_bare_path(dependency) {
                    errors.push(GenError::InvalidReference {
                        class: name.to_string(),
                        reference: dependency.clone(),
                    });
                }
            }

            for (prop_name, prop) in &resolved.own_properties {
                for target in prop.referenced_classes() {
                    if let ClassTarget::Named(target) = target {
                        if !self.is_known_reference(&target) && !is_bare_path(&target) {
                            errors.push(GenError::InvalidReference {
                                class: name.to_string(),
                                reference: format!("{target} (property {prop_name})"),
                            });
                        }
                    }
                }
            }

            for arg in &resolved.constructor_args {
                if let ConstructorArg::Property(prop) = arg {
                    if !resolved.all_properties.contains_key(prop) {
                        errors.push(GenError::render(
                            name,
                            format!("constructor argument `{prop}` is not a property"),
                        ));
                    }
                }
            }
        }

        errors
    }

    /// Whether a name is a configured class or the root sentinel
    pub fn is_known_reference(&self, name: &str) -> bool {
        self.contains(name) || self.is_root(name)
    }
}

/// A dependency written as a path rather than a class name
pub fn is_bare_path(reference: &str) -> bool {
    reference.contains('/')
}

fn relative_path_of(name: &str, config: &ClassConfig) -> String {
    config
        .relative_path
        .as_deref()
        .map(normalize_relative_path)
        .unwrap_or_else(|| name.to_string())
}
