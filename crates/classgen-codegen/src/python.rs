//! Python wrapper generation
//!
//! Renders one module per class defining a widget whose synced traits mirror
//! the class's own properties.

use crate::context::{
    ArgContext, ClassInput, ImportContext, LibraryContext, PropertyContext, WrapperContext,
    own_properties,
};
use crate::naming::{export_name, is_identifier, model_name, symbol};
use crate::templates::{PY_WRAPPER, TemplateEngine};
use crate::GENERATOR_VERSION;
use classgen_core::{ConstructorArg, GenError, GenResult, GeneratorConfig, Language, Layout};
use classgen_core::{PropertyDescriptor, ResolvedConfig};
use std::path::PathBuf;
use std::sync::Arc;

const LANG: Language = Language::Python;

/// Renders Python wrappers
pub struct PyGenerator {
    engine: Arc<TemplateEngine>,
    layout: Layout,
    library: LibraryContext,
    docs_base_url: String,
    traits_module: PathBuf,
    enums_module: PathBuf,
}

impl PyGenerator {
    pub fn new(engine: Arc<TemplateEngine>, config: &GeneratorConfig) -> Self {
        let layout = config.layout_for(LANG);
        let helper = |path: &str| {
            layout
                .output_dir()
                .join(format!("{}.py", classgen_core::normalize_relative_path(path)))
        };

        let traits_module = helper(&config.layout.traits_path);
        let enums_module = helper(&config.layout.enums_path);

        Self {
            traits_module,
            enums_module,
            library: LibraryContext {
                module: config.javascript.library_module.clone(),
                namespace: config.javascript.library_namespace.clone(),
            },
            docs_base_url: config.generator.docs_base_url.clone(),
            engine,
            layout,
        }
    }

    /// Render the wrapper module for one class
    pub fn render(&self, input: &ClassInput<'_>) -> GenResult<String> {
        let context = self.build_context(input)?;
        self.engine
            .render(PY_WRAPPER, &input.config.class_name, &context)
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

        let mut properties = own_properties(config, LANG)?;
        for (prop, record) in config.own_properties.values().zip(properties.iter_mut()) {
            record.declaration =
                trait_declaration(class_name, &input.base.target_class, prop, record);
        }

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

        let generated = &input.generated_path;
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
            constructor_args: Vec::new(),
            init_args: init_arguments(config)?,
            has_serializers: !serialized.is_empty(),
            has_enums: !enums.is_empty(),
            serialized,
            enums,
            properties,
            helpers_import: input.base.import_path.clone(),
            traits_import: self.layout.import_path(generated, &self.traits_module),
            enums_import: self.layout.import_path(generated, &self.enums_module),
            override_import: input.override_import.clone(),
            docs_url: format!("{}{}", self.docs_base_url, config.doc_path),
        })
    }
}

/// Keyword arguments of `__init__`, in constructor order
///
/// The parameters bag contributes nothing: its values arrive through `**kwargs`.
fn init_arguments(config: &ResolvedConfig) -> GenResult<Vec<ArgContext>> {
    let mut args = Vec::new();

    for arg in &config.constructor_args {
        let ConstructorArg::Property(name) = arg else {
            continue;
        };
        let prop = config.all_properties.get(name).ok_or_else(|| {
            GenError::render(
                &config.class_name,
                format!("constructor argument `{name}` is not a property"),
            )
        })?;
        let default = prop.default_literal(LANG).ok_or_else(|| {
            GenError::render(
                &config.class_name,
                format!("constructor argument `{name}` has no python default value"),
            )
        })?;
        args.push(ArgContext {
            name: name.clone(),
            default,
        });
    }

    Ok(args)
}

/// Trait declaration for a synced property
fn trait_declaration(
    class_name: &str,
    base: &str,
    prop: &PropertyDescriptor,
    record: &PropertyContext,
) -> String {
    let default = &record.default;
    let allow_none = if record.nullable { "True" } else { "False" };

    let declaration = match prop {
        PropertyDescriptor::Bool { .. } => format!("Bool({default}, allow_none={allow_none})"),
        PropertyDescriptor::Int { min, max, .. } => {
            let mut bounds = String::new();
            if let Some(min) = min {
                bounds.push_str(&format!(", min={min}"));
            }
            if let Some(max) = max {
                bounds.push_str(&format!(", max={max}"));
            }
            format!("CInt({default}, allow_none={allow_none}{bounds})")
        }
        PropertyDescriptor::Float { .. } => format!("CFloat({default}, allow_none={allow_none})"),
        PropertyDescriptor::String { .. } => format!("Unicode({default}, allow_none={allow_none})"),
        PropertyDescriptor::Color { .. } => format!("Color({default}, allow_none={allow_none})"),
        PropertyDescriptor::Vector2 { .. } => format!("Vector2(default_value={default})"),
        PropertyDescriptor::Vector3 { .. } => format!("Vector3(default_value={default})"),
        PropertyDescriptor::Vector4 { .. } => format!("Vector4(default_value={default})"),
        PropertyDescriptor::Matrix3 { .. } => format!("Matrix3(default_value={default})"),
        PropertyDescriptor::Matrix4 { .. } => format!("Matrix4(default_value={default})"),
        PropertyDescriptor::Euler { .. } => format!("Euler(default_value={default})"),
        PropertyDescriptor::Enum { enum_type, .. } => {
            format!("Enum({enum_type}, {default}, allow_none={allow_none})")
        }
        PropertyDescriptor::ClassRef { class, .. } => match class {
            Some(target) if target == class_name => format!("This(allow_none={allow_none})"),
            Some(target) => format!("Instance({target}, allow_none={allow_none})"),
            None => format!("Instance({base}, allow_none={allow_none})"),
        },
        PropertyDescriptor::ClassRefArray { .. } => "Tuple()".to_string(),
        PropertyDescriptor::ClassRefDict { .. } => "Dict()".to_string(),
        PropertyDescriptor::Array { .. } => {
            format!("List(trait=CFloat(), default_value={default})")
        }
        PropertyDescriptor::Dict { .. } => format!("Dict(default_value={default})"),
        PropertyDescriptor::Any { .. } => format!("Any({default}, allow_none={allow_none})"),
    };

    match record.serializer {
        Some(serializer) => format!("{declaration}.tag(sync=True, **{serializer})"),
        None => format!("{declaration}.tag(sync=True)"),
    }
}
