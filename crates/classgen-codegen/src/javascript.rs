//! JavaScript wrapper generation
//!
//! Renders one ES module per class exporting a widget model that extends its
//! superclass model and constructs the matching library object.

use crate::context::{ClassInput, ImportContext, LibraryContext, WrapperContext, own_properties};
use crate::naming::{export_name, is_identifier, model_name, symbol};
use crate::templates::{JS_WRAPPER, TemplateEngine};
use crate::GENERATOR_VERSION;
use classgen_core::{ConstructorArg, GenError, GenResult, GeneratorConfig, Language};
use classgen_core::{PropertyDescriptor, ResolvedConfig};
use std::sync::Arc;

const LANG: Language = Language::JavaScript;

/// Renders JavaScript wrappers
pub struct JsGenerator {
    engine: Arc<TemplateEngine>,
    library: LibraryContext,
    docs_base_url: String,
}

impl JsGenerator {
    pub fn new(engine: Arc<TemplateEngine>, config: &GeneratorConfig) -> Self {
        Self {
            engine,
            library: LibraryContext {
                module: config.javascript.library_module.clone(),
                namespace: config.javascript.library_namespace.clone(),
            },
            docs_base_url: config.generator.docs_base_url.clone(),
        }
    }

    /// Render the wrapper module for one class
    pub fn render(&self, input: &ClassInput<'_>) -> GenResult<String> {
        let context = self.build_context(input)?;
        self.engine
            .render(JS_WRAPPER, &input.config.class_name, &context)
    }

    /// Assemble the rendering context without rendering it
    pub fn build_context(&self, input: &ClassInput<'_>) -> GenResult<WrapperContext> {
        let config = input.config;
        let class_name = &config.class_name;

        if let Some(bad) = config.own_properties.keys().find(|n| !is_identifier(n)) {
            return Err(GenError::render(
                class_name,
                format!("property name `{bad}` is not an identifier"),
            ));
        }

        let properties = own_properties(config, LANG)?;
        let constructor_args = constructor_expressions(config)?;

        let imports = input
            .references
            .values()
            .filter(|r| r.target_class != input.superclass.target_class)
            .map(|r| ImportContext {
                symbol: symbol(LANG, &r.target_class),
                path: r.import_path.clone(),
            })
            .collect();

        let serialized: Vec<_> = properties
            .iter()
            .filter(|p| p.serializer.is_some())
            .cloned()
            .collect();
        let enums: Vec<_> = properties
            .iter()
            .filter(|p| p.enum_type.is_some())
            .cloned()
            .collect();

        Ok(WrapperContext {
            version: GENERATOR_VERSION,
            class_name: class_name.clone(),
            model_name: model_name(class_name),
            export_name: export_name(LANG, class_name, input.override_import.is_some()),
            super_class: ImportContext {
                symbol: symbol(LANG, &input.superclass.target_class),
                path: input.superclass.import_path.clone(),
            },
            imports,
            library: self.library.clone(),
            constructor_args,
            init_args: Vec::new(),
            has_serializers: !serialized.is_empty(),
            has_enums: !enums.is_empty(),
            serialized,
            enums,
            properties,
            helpers_import: input.base.import_path.clone(),
            traits_import: String::new(),
            enums_import: String::new(),
            override_import: input.override_import.clone(),
            docs_url: format!("{}{}", self.docs_base_url, config.doc_path),
        })
    }
}

/// Expressions passed positionally to the library constructor
fn constructor_expressions(config: &ResolvedConfig) -> GenResult<Vec<String>> {
    config
        .constructor_args
        .iter()
        .map(|arg| match arg {
            ConstructorArg::Property(name) => {
                let prop = config.all_properties.get(name).ok_or_else(|| {
                    GenError::render(
                        &config.class_name,
                        format!("constructor argument `{name}` is not a property"),
                    )
                })?;
                Ok(read_expression(name, prop))
            }
            ConstructorArg::Parameters => {
                let fields: Vec<String> = config
                    .own_properties
                    .iter()
                    .filter(|(name, _)| !config.props_defined_externally.contains(*name))
                    .map(|(name, prop)| format!("{name}: {}", read_expression(name, prop)))
                    .collect();
                Ok(if fields.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{{ {} }}", fields.join(", "))
                })
            }
        })
        .collect()
}

/// Read a synced value, converted for the library when the property needs it
fn read_expression(name: &str, prop: &PropertyDescriptor) -> String {
    match prop.converter() {
        Some(converter) => {
            format!("this.convert{converter}ModelToLibrary(this.get('{name}'), '{name}')")
        }
        None => format!("this.get('{name}')"),
    }
}
