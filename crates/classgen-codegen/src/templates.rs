//! Template engine for wrapper and aggregation files
//!
//! Templates are embedded in the binary via `include_str!` and registered once.
//! The engine is immutable after construction and shared read-only across
//! generation tasks.

use classgen_core::{GenError, GenResult};
use handlebars::Handlebars;
use serde::Serialize;

/// Wrapper module for one class, JavaScript
pub const JS_WRAPPER: &str = "js_wrapper";
/// Directory index, JavaScript
pub const JS_INDEX: &str = "js_index";
/// Wrapper module for one class, Python
pub const PY_WRAPPER: &str = "py_wrapper";
/// Top-level aggregator, Python
pub const PY_PACKAGE: &str = "py_package";

const TEMPLATES: [(&str, &str); 4] = [
    (JS_WRAPPER, include_str!("templates/wrapper.js.hbs")),
    (JS_INDEX, include_str!("templates/index.js.hbs")),
    (PY_WRAPPER, include_str!("templates/wrapper.py.hbs")),
    (PY_PACKAGE, include_str!("templates/package.py.hbs")),
];

/// Handlebars engine with every generator template loaded
pub struct TemplateEngine {
    handlebars: Handlebars<'static>,
}

impl TemplateEngine {
    /// Create a new template engine with all templates loaded
    pub fn new() -> GenResult<Self> {
        let mut hb = Handlebars::new();
        hb.set_strict_mode(true);
        hb.register_escape_fn(handlebars::no_escape);

        for (name, source) in TEMPLATES {
            hb.register_template_string(name, source).map_err(|e| {
                GenError::Config(format!("Failed to register {name} template: {e}"))
            })?;
        }

        Ok(Self { handlebars: hb })
    }

    /// Render a named template
    ///
    /// `subject` names the class or file being rendered, for error reporting.
    pub fn render(
        &self,
        template: &str,
        subject: &str,
        context: &impl Serialize,
    ) -> GenResult<String> {
        self.handlebars
            .render(template, context)
            .map_err(|e| GenError::render(subject, format!("{template}: {e}")))
    }

    /// Whether a template is registered
    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;
    use serde_json::json;

    #[test]
    fn TemplateEngine___new___registers_all_templates() {
        let engine = TemplateEngine::new().unwrap();

        for (name, _) in TEMPLATES {
            assert!(engine.has_template(name), "missing {name}");
        }
    }

    #[test]
    fn TemplateEngine___render___missing_field_is_render_error() {
        let engine = TemplateEngine::new().unwrap();

        let err = engine
            .render(PY_PACKAGE, "_package.py", &json!({}))
            .unwrap_err();

        assert!(matches!(err, GenError::TemplateRender { class, .. } if class == "_package.py"));
    }

    #[test]
    fn TemplateEngine___render___does_not_escape_html() {
        let engine = TemplateEngine::new().unwrap();
        let context = json!({
            "version": "0.0.0",
            "top": false,
            "library": {"module": "three", "namespace": "THREE"},
            "modules": ["./a&b.js"],
        });

        let output = engine.render(JS_INDEX, "index.js", &context).unwrap();

        assert!(output.contains("export * from './a&b.js';"));
    }

    #[test]
    fn TemplateEngine___render___unregistered_helper_is_render_error() {
        let mut engine = TemplateEngine::new().unwrap();
        engine
            .handlebars
            .register_template_string("cased", "{{snake_case name}}")
            .unwrap();

        let err = engine
            .render("cased", "Mesh", &json!({"name": "Mesh"}))
            .unwrap_err();

        assert!(matches!(err, GenError::TemplateRender { class, .. } if class == "Mesh"));
    }
}
