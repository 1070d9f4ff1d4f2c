//! Rendering contexts passed to the wrapper templates
//!
//! The structures here are language-neutral; each generator fills the
//! language-specific fields (expressions, declarations, import symbols) before
//! handing the context to its template.

use classgen_core::{GenError, GenResult, Language, PropertyDescriptor, ReferenceDescriptor};
use classgen_core::{ReferenceTable, ResolvedConfig};
use serde::Serialize;
use std::path::PathBuf;

/// Everything a wrapper generator needs for one class
///
/// Built by the pipeline after reference resolution; generators are pure
/// functions of this input.
#[derive(Debug, Clone)]
pub struct ClassInput<'a> {
    pub config: &'a ResolvedConfig,
    pub references: &'a ReferenceTable,

    /// Superclass artifact; also present in `references`
    pub superclass: &'a ReferenceDescriptor,

    /// Base type artifact, for shared runtime helpers
    pub base: &'a ReferenceDescriptor,

    /// Output location of the wrapper being rendered
    pub generated_path: PathBuf,

    /// Import path from the generated artifact to this class's override
    pub override_import: Option<String>,
}

/// One import statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportContext {
    pub symbol: String,
    pub path: String,
}

/// Target library identification
#[derive(Debug, Clone, Serialize)]
pub struct LibraryContext {
    pub module: String,
    pub namespace: String,
}

/// Render record for one own property
#[derive(Debug, Clone, Serialize)]
pub struct PropertyContext {
    pub name: String,
    pub kind: &'static str,

    /// Default value literal in the target language
    pub default: String,

    pub nullable: bool,

    /// `child`, `array` or `dict` for class-referencing properties
    pub grouping: Option<&'static str>,
    pub converter: Option<&'static str>,
    pub assigner: Option<&'static str>,
    pub serializer: Option<&'static str>,
    pub enum_type: Option<String>,

    /// Initialized by the library rather than by the wrapper
    pub external: bool,

    /// Python trait declaration, empty for JavaScript
    pub declaration: String,
}

/// One constructor argument of the Python wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ArgContext {
    pub name: String,
    pub default: String,
}

/// Full rendering context for one wrapper
#[derive(Debug, Clone, Serialize)]
pub struct WrapperContext {
    pub version: &'static str,
    pub class_name: String,

    /// Name registered with the front end (`<C>Model`)
    pub model_name: String,

    /// Symbol defined by the generated file
    pub export_name: String,

    pub super_class: ImportContext,

    /// Sorted imports, superclass excluded
    pub imports: Vec<ImportContext>,

    pub library: LibraryContext,

    /// JavaScript constructor argument expressions
    pub constructor_args: Vec<String>,

    /// Python `__init__` keyword arguments
    pub init_args: Vec<ArgContext>,

    pub properties: Vec<PropertyContext>,
    pub serialized: Vec<PropertyContext>,
    pub enums: Vec<PropertyContext>,
    pub has_serializers: bool,
    pub has_enums: bool,

    /// Import path of the module providing runtime helpers
    pub helpers_import: String,
    pub traits_import: String,
    pub enums_import: String,

    pub override_import: Option<String>,
    pub docs_url: String,
}

impl PropertyContext {
    /// Build the language-neutral render record for a property
    ///
    /// Fails when the descriptor cannot produce a default literal.
    pub fn build(
        class: &str,
        name: &str,
        prop: &PropertyDescriptor,
        external: bool,
        lang: Language,
    ) -> GenResult<Self> {
        let default = prop.default_literal(lang).ok_or_else(|| {
            GenError::render(
                class,
                format!(
                    "property `{name}` of type {} has no {lang} default value",
                    prop.kind()
                ),
            )
        })?;

        Ok(Self {
            name: name.to_string(),
            kind: prop.kind(),
            default,
            nullable: prop.is_nullable(),
            grouping: prop.grouping().map(|g| g.key()),
            converter: prop.converter(),
            assigner: prop.assigner(),
            serializer: prop.serializer(lang),
            enum_type: prop.enum_type().map(str::to_string),
            external,
            declaration: String::new(),
        })
    }
}

/// Build property records for every own property, in declaration order
pub fn own_properties(config: &ResolvedConfig, lang: Language) -> GenResult<Vec<PropertyContext>> {
    config
        .own_properties
        .iter()
        .map(|(name, prop)| {
            PropertyContext::build(
                &config.class_name,
                name,
                prop,
                config.props_defined_externally.contains(name),
                lang,
            )
        })
        .collect()
}
