//! Declarative class configuration records

use crate::PropertyDescriptor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Key of the constructor argument that collects every own property
pub const PARAMETERS_BAG: &str = "parameters";

/// One entry of the config store, as written by hand
///
/// Every field is optional so that a record can be partial; missing values are
/// filled from ancestors and then from the `_defaults` record during resolution.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassConfig {
    /// Source-relative location of the class, e.g. `./geometries/RingGeometry`
    pub relative_path: Option<String>,

    /// Superclass name; absent or `null` means the root
    pub super_class: Option<String>,

    /// Properties declared on this class, in declaration order
    pub properties: IndexMap<String, PropertyDescriptor>,

    /// Constructor signature of the library class
    pub constructor_args: Option<Vec<ConstructorArg>>,

    /// Extra classes or bare paths the wrapper must import
    pub dependencies: Vec<String>,

    /// Properties the library initializes itself
    pub props_defined_externally: BTreeSet<String>,

    /// Documentation path, relative to the configured docs base URL
    pub doc_path: Option<String>,
}

/// One positional constructor argument
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConstructorArg {
    /// Read a single property
    Property(String),
    /// Collect every own property into one keyed object
    Parameters,
}

impl From<String> for ConstructorArg {
    fn from(value: String) -> Self {
        if value == PARAMETERS_BAG {
            ConstructorArg::Parameters
        } else {
            ConstructorArg::Property(value)
        }
    }
}

impl From<ConstructorArg> for String {
    fn from(value: ConstructorArg) -> Self {
        match value {
            ConstructorArg::Property(name) => name,
            ConstructorArg::Parameters => PARAMETERS_BAG.to_string(),
        }
    }
}

impl ClassConfig {
    /// Create an empty record under the given relative path
    pub fn at(relative_path: impl Into<String>) -> Self {
        Self {
            relative_path: Some(relative_path.into()),
            ..Self::default()
        }
    }

    /// Set the superclass
    pub fn extends(mut self, super_class: impl Into<String>) -> Self {
        self.super_class = Some(super_class.into());
        self
    }

    /// Add a property
    pub fn with_property(mut self, name: impl Into<String>, prop: PropertyDescriptor) -> Self {
        self.properties.insert(name.into(), prop);
        self
    }

    /// Set the constructor arguments
    pub fn with_constructor_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constructor_args = Some(
            args.into_iter()
                .map(|arg| ConstructorArg::from(arg.into()))
                .collect(),
        );
        self
    }

    /// Add an explicit dependency
    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }
}
