//! Naming conventions for generated symbols.
//!
//! | Language   | Canonical symbol | Symbol when an override exists |
//! |------------|------------------|--------------------------------|
//! | JavaScript | `CModel`         | `CModelAutogen`                |
//! | Python     | `C`              | `CAutogen`                     |
//!
//! The front end always registers the canonical model name, so an override
//! that extends the generated class re-exports the canonical symbol.

use classgen_core::Language;

const MODEL_SUFFIX: &str = "Model";
const AUTOGEN_SUFFIX: &str = "Autogen";

/// Model name registered with the front end.
///
/// # Examples
///
/// ```
/// use classgen_codegen::naming::model_name;
///
/// assert_eq!(model_name("Mesh"), "MeshModel");
/// ```
pub fn model_name(class_name: &str) -> String {
    format!("{class_name}{MODEL_SUFFIX}")
}

/// Symbol a module exports for a class, as imported by other wrappers.
///
/// # Examples
///
/// ```
/// use classgen_codegen::naming::symbol;
/// use classgen_core::Language;
///
/// assert_eq!(symbol(Language::JavaScript, "Mesh"), "MeshModel");
/// assert_eq!(symbol(Language::Python, "Mesh"), "Mesh");
/// ```
pub fn symbol(lang: Language, class_name: &str) -> String {
    match lang {
        Language::JavaScript => model_name(class_name),
        Language::Python => class_name.to_string(),
    }
}

/// Symbol defined by a generated artifact.
///
/// Carries the `Autogen` suffix when a hand-written override builds on it.
pub fn export_name(lang: Language, class_name: &str, has_override: bool) -> String {
    let symbol = symbol(lang, class_name);
    if has_override {
        format!("{symbol}{AUTOGEN_SUFFIX}")
    } else {
        symbol
    }
}

/// Whether a name is usable as an identifier in both target languages.
///
/// Property names become object keys in JavaScript and keyword arguments in
/// Python, so they must be plain identifiers.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
