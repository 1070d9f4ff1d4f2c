//! Inheritance-merged class configuration
//!
//! Resolution walks the superclass chain iteratively with a visiting set, so a
//! cyclic table yields [`GenError::ConfigCycle`] instead of unbounded recursion.
//! Every resolved ancestor is memoized for the lifetime of the resolver.

use crate::layout::normalize_relative_path;
use crate::{ClassConfig, ConfigStore, ConstructorArg, GenError, GenResult, PropertyDescriptor};
use indexmap::IndexMap;
use serde::Serialize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// A class configuration merged with all of its ancestors
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    pub class_name: String,

    /// Normalized relative path (`dir/Unit`, no extension)
    pub relative_path: String,

    /// Superclass name, `None` when the class derives from the root
    pub super_class: Option<String>,

    /// Properties declared on this class only
    pub own_properties: IndexMap<String, PropertyDescriptor>,

    /// Ancestor properties overlaid with own properties
    pub all_properties: IndexMap<String, PropertyDescriptor>,

    pub constructor_args: Vec<ConstructorArg>,

    /// Explicit dependencies declared on this class only
    pub dependencies: Vec<String>,

    /// Union across the whole ancestor chain
    pub props_defined_externally: BTreeSet<String>,

    pub doc_path: String,
}

/// Memoizing resolver over one config store
pub struct ConfigResolver<'s> {
    store: &'s ConfigStore,
    resolved: HashMap<String, Arc<ResolvedConfig>>,
}

impl<'s> ConfigResolver<'s> {
    pub fn new(store: &'s ConfigStore) -> Self {
        Self {
            store,
            resolved: HashMap::new(),
        }
    }

    /// Resolve a class, reusing any ancestor resolved earlier
    pub fn resolve(&mut self, class_name: &str) -> GenResult<Arc<ResolvedConfig>> {
        if let Some(hit) = self.resolved.get(class_name) {
            return Ok(Arc::clone(hit));
        }

        // Collect the unresolved part of the chain, most derived first
        let mut chain: Vec<(&'s str, &'s ClassConfig)> = Vec::new();
        let mut visiting: HashSet<&'s str> = HashSet::new();
        let mut base: Option<Arc<ResolvedConfig>> = None;
        let mut name = class_name;

        loop {
            let (key, config) = self
                .store
                .entry(name)
                .ok_or_else(|| GenError::UnknownClass(name.to_string()))?;

            if !visiting.insert(key) {
                let mut names: Vec<String> = chain.iter().map(|(n, _)| n.to_string()).collect();
                names.push(key.to_string());
                return Err(GenError::ConfigCycle {
                    class: class_name.to_string(),
                    chain: names,
                });
            }
            chain.push((key, config));

            let Some(parent) = parent_of(self.store, key, config) else {
                break;
            };
            if let Some(hit) = self.resolved.get(parent) {
                base = Some(Arc::clone(hit));
                break;
            }
            name = parent;
        }

        for (key, config) in chain.into_iter().rev() {
            let merged = Arc::new(self.merge(key, config, base.as_deref()));
            self.resolved.insert(key.to_string(), Arc::clone(&merged));
            base = Some(merged);
        }

        base.ok_or_else(|| GenError::UnknownClass(class_name.to_string()))
    }

    fn merge(
        &self,
        name: &str,
        own: &ClassConfig,
        parent: Option<&ResolvedConfig>,
    ) -> ResolvedConfig {
        let defaults = self.store.defaults();

        let mut all_properties = parent
            .map(|p| p.all_properties.clone())
            .unwrap_or_default();
        for (prop_name, prop) in &own.properties {
            // Replaces the inherited descriptor wholesale, keeping its position
            all_properties.insert(prop_name.clone(), prop.clone());
        }

        let mut props_defined_externally = parent
            .map(|p| p.props_defined_externally.clone())
            .unwrap_or_else(|| defaults.props_defined_externally.clone());
        props_defined_externally.extend(own.props_defined_externally.iter().cloned());

        let constructor_args = own
            .constructor_args
            .clone()
            .or_else(|| parent.map(|p| p.constructor_args.clone()))
            .or_else(|| defaults.constructor_args.clone())
            .unwrap_or_default();

        let relative_path = own
            .relative_path
            .as_deref()
            .map(normalize_relative_path)
            .unwrap_or_else(|| name.to_string());

        let doc_path = own
            .doc_path
            .clone()
            .or_else(|| defaults.doc_path.clone())
            .unwrap_or_else(|| relative_path.clone());

        ResolvedConfig {
            class_name: name.to_string(),
            relative_path,
            super_class: parent_of(self.store, name, own).map(str::to_string),
            own_properties: own.properties.clone(),
            all_properties,
            constructor_args,
            dependencies: own.dependencies.clone(),
            props_defined_externally,
            doc_path,
        }
    }
}

/// Effective superclass: the class's own, else the `_defaults` one
///
/// A defaulted superclass never applies to the class it names.
fn parent_of<'a>(store: &'a ConfigStore, name: &str, config: &'a ClassConfig) -> Option<&'a str> {
    let parent = match config.super_class.as_deref() {
        Some(parent) => parent,
        None => store
            .defaults()
            .super_class
            .as_deref()
            .filter(|default| *default != name)?,
    };
    (!store.is_root(parent)).then_some(parent)
}
