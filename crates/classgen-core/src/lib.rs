//! classgen-core - Class configuration model and resolution
//!
//! This crate provides the pure, storage-agnostic half of the generator:
//! - [`ConfigStore`] holding the declarative class table
//! - [`ConfigResolver`] merging a class with its ancestors into a [`ResolvedConfig`]
//! - [`Layout`] describing where generated and override files live per [`Language`]
//! - [`ReferenceResolver`] inferring which other artifacts a class must import
//! - [`GenError`] for the class-scoped and batch-fatal failure taxonomy
//! - [`GeneratorConfig`] for run configuration

mod config;
mod error;
mod layout;
mod model;
mod overrides;
mod property;
mod references;
mod resolve;
mod store;

pub use config::{
    DEFAULT_CONFIG_FILE, GeneratorConfig, GeneratorSection, JavaScriptSection, LayoutSection,
    PythonSection,
};
pub use error::{GenError, GenResult};
pub use layout::{Layout, normalize_relative_path};
pub use model::{ClassConfig, ConstructorArg};
pub use overrides::{FsOverrideDetector, KnownOverrides, OverrideDetector};
pub use property::{ClassTarget, Grouping, PropertyDescriptor};
pub use references::{ReferenceDescriptor, ReferenceResolver, ReferenceTable};
pub use resolve::{ConfigResolver, ResolvedConfig};
pub use store::{ConfigStore, DEFAULTS_KEY, DEFAULT_ROOT_CLASS};

/// Target languages a wrapper can be generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Language {
    JavaScript,
    Python,
}

impl Language {
    /// All supported languages, in pipeline order
    pub const ALL: [Language; 2] = [Language::JavaScript, Language::Python];

    /// The literal used for an absent value
    pub fn null_literal(self) -> &'static str {
        match self {
            Language::JavaScript => "null",
            Language::Python => "None",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::JavaScript => write!(f, "javascript"),
            Language::Python => write!(f, "python"),
        }
    }
}

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        ClassConfig, ConfigResolver, ConfigStore, ConstructorArg, GenError, GenResult,
        GeneratorConfig, Language, Layout, OverrideDetector, PropertyDescriptor,
        ReferenceDescriptor, ReferenceResolver, ResolvedConfig,
    };
}
