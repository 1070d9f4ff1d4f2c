//! Property descriptors and their capability surface
//!
//! A [`PropertyDescriptor`] is a closed set of variants. Everything the generators
//! need from a property (default literals, referenced classes, converter and
//! serializer names) is answered by matching on the variant.

use crate::Language;
use serde::{Deserialize, Serialize};

/// A declared property of a configured class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum PropertyDescriptor {
    Bool {
        #[serde(default)]
        default: Option<bool>,
        #[serde(default)]
        nullable: bool,
    },
    Int {
        #[serde(default)]
        default: Option<i64>,
        #[serde(default)]
        nullable: bool,
        #[serde(default)]
        min: Option<i64>,
        #[serde(default)]
        max: Option<i64>,
    },
    Float {
        #[serde(default)]
        default: Option<f64>,
        #[serde(default)]
        nullable: bool,
    },
    String {
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        nullable: bool,
    },
    Color {
        #[serde(default)]
        default: Option<String>,
        #[serde(default)]
        nullable: bool,
    },
    Vector2 {
        #[serde(default)]
        default: Option<[f64; 2]>,
    },
    Vector3 {
        #[serde(default)]
        default: Option<[f64; 3]>,
    },
    Vector4 {
        #[serde(default)]
        default: Option<[f64; 4]>,
    },
    Matrix3 {
        #[serde(default)]
        default: Option<Vec<f64>>,
    },
    Matrix4 {
        #[serde(default)]
        default: Option<Vec<f64>>,
    },
    Euler {
        #[serde(default)]
        default: Option<[f64; 3]>,
        #[serde(default = "default_euler_order")]
        order: String,
    },
    Enum {
        enum_type: String,
        default: String,
    },
    /// Reference to a single instance; no class means any library type
    ClassRef {
        #[serde(default)]
        class: Option<String>,
        #[serde(default = "default_true")]
        nullable: bool,
    },
    ClassRefArray {
        #[serde(default)]
        classes: Vec<String>,
    },
    ClassRefDict {
        #[serde(default)]
        classes: Vec<String>,
    },
    Array {
        #[serde(default)]
        default: Option<Vec<f64>>,
    },
    Dict {
        #[serde(default)]
        default: Option<serde_json::Map<String, serde_json::Value>>,
    },
    /// Untyped value; cannot render without an explicit default
    Any {
        #[serde(default)]
        default: Option<serde_json::Value>,
        #[serde(default)]
        nullable: bool,
    },
}

fn default_euler_order() -> String {
    "XYZ".to_string()
}

fn default_true() -> bool {
    true
}

/// A class named by a property, or the base type when none is named
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClassTarget {
    Named(String),
    Base,
}

/// How a class-referencing property holds its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grouping {
    Child,
    Array,
    Dict,
}

impl Grouping {
    pub fn key(self) -> &'static str {
        match self {
            Grouping::Child => "child",
            Grouping::Array => "array",
            Grouping::Dict => "dict",
        }
    }
}

impl PropertyDescriptor {
    /// Short variant name, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyDescriptor::Bool { .. } => "bool",
            PropertyDescriptor::Int { .. } => "int",
            PropertyDescriptor::Float { .. } => "float",
            PropertyDescriptor::String { .. } => "string",
            PropertyDescriptor::Color { .. } => "color",
            PropertyDescriptor::Vector2 { .. } => "vector2",
            PropertyDescriptor::Vector3 { .. } => "vector3",
            PropertyDescriptor::Vector4 { .. } => "vector4",
            PropertyDescriptor::Matrix3 { .. } => "matrix3",
            PropertyDescriptor::Matrix4 { .. } => "matrix4",
            PropertyDescriptor::Euler { .. } => "euler",
            PropertyDescriptor::Enum { .. } => "enum",
            PropertyDescriptor::ClassRef { .. } => "classRef",
            PropertyDescriptor::ClassRefArray { .. } => "classRefArray",
            PropertyDescriptor::ClassRefDict { .. } => "classRefDict",
            PropertyDescriptor::Array { .. } => "array",
            PropertyDescriptor::Dict { .. } => "dict",
            PropertyDescriptor::Any { .. } => "any",
        }
    }

    /// Whether the property accepts an absent value
    pub fn is_nullable(&self) -> bool {
        match self {
            PropertyDescriptor::Bool { nullable, .. }
            | PropertyDescriptor::Int { nullable, .. }
            | PropertyDescriptor::Float { nullable, .. }
            | PropertyDescriptor::String { nullable, .. }
            | PropertyDescriptor::Color { nullable, .. }
            | PropertyDescriptor::ClassRef { nullable, .. }
            | PropertyDescriptor::Any { nullable, .. } => *nullable,
            _ => false,
        }
    }

    /// Default value literal in the given language
    ///
    /// Returns `None` when the descriptor has no way to produce one.
    pub fn default_literal(&self, lang: Language) -> Option<String> {
        let null = || Some(lang.null_literal().to_string());

        match self {
            PropertyDescriptor::Bool { default, nullable } => match default {
                Some(value) => Some(bool_literal(*value, lang)),
                None if *nullable => null(),
                None => Some(bool_literal(false, lang)),
            },
            PropertyDescriptor::Int {
                default, nullable, ..
            } => match default {
                Some(value) => Some(value.to_string()),
                None if *nullable => null(),
                None => Some("0".to_string()),
            },
            PropertyDescriptor::Float { default, nullable } => match default {
                Some(value) => Some(float_literal(*value, lang)),
                None if *nullable => null(),
                None => Some(float_literal(0.0, lang)),
            },
            PropertyDescriptor::String { default, nullable }
            | PropertyDescriptor::Color { default, nullable } => match default {
                Some(value) => Some(string_literal(value)),
                None if *nullable => null(),
                None if matches!(self, PropertyDescriptor::Color { .. }) => {
                    Some(string_literal("#ffffff"))
                }
                None => Some(string_literal("")),
            },
            PropertyDescriptor::Vector2 { default } => {
                Some(list_literal(&default.unwrap_or([0.0; 2]), lang))
            }
            PropertyDescriptor::Vector3 { default } => {
                Some(list_literal(&default.unwrap_or([0.0; 3]), lang))
            }
            PropertyDescriptor::Vector4 { default } => {
                Some(list_literal(&default.unwrap_or([0.0; 4]), lang))
            }
            PropertyDescriptor::Matrix3 { default } => Some(list_literal(
                default.as_deref().unwrap_or(&identity(3)),
                lang,
            )),
            PropertyDescriptor::Matrix4 { default } => Some(list_literal(
                default.as_deref().unwrap_or(&identity(4)),
                lang,
            )),
            PropertyDescriptor::Euler { default, order } => {
                let [x, y, z] = default.unwrap_or([0.0; 3]);
                Some(format!(
                    "[{}, {}, {}, {}]",
                    float_literal(x, lang),
                    float_literal(y, lang),
                    float_literal(z, lang),
                    string_literal(order)
                ))
            }
            PropertyDescriptor::Enum { default, .. } => Some(string_literal(default)),
            PropertyDescriptor::ClassRef { .. } => null(),
            PropertyDescriptor::ClassRefArray { .. } => Some("[]".to_string()),
            PropertyDescriptor::ClassRefDict { .. } => Some("{}".to_string()),
            PropertyDescriptor::Array { default } => {
                Some(list_literal(default.as_deref().unwrap_or(&[]), lang))
            }
            PropertyDescriptor::Dict { default } => Some(match default {
                Some(map) => json_literal(&serde_json::Value::Object(map.clone()), lang),
                None => "{}".to_string(),
            }),
            PropertyDescriptor::Any { default, nullable } => match default {
                Some(value) => Some(json_literal(value, lang)),
                None if *nullable => null(),
                None => None,
            },
        }
    }

    /// Classes this property refers to
    pub fn referenced_classes(&self) -> Vec<ClassTarget> {
        match self {
            PropertyDescriptor::ClassRef { class, .. } => vec![match class {
                Some(name) => ClassTarget::Named(name.clone()),
                None => ClassTarget::Base,
            }],
            PropertyDescriptor::ClassRefArray { classes }
            | PropertyDescriptor::ClassRefDict { classes } => {
                if classes.is_empty() {
                    vec![ClassTarget::Base]
                } else {
                    classes.iter().cloned().map(ClassTarget::Named).collect()
                }
            }
            _ => Vec::new(),
        }
    }

    /// Name of the value conversion applied before handing the value to the library
    pub fn converter(&self) -> Option<&'static str> {
        match self {
            PropertyDescriptor::Bool { .. } => Some("Bool"),
            PropertyDescriptor::Float { .. } => Some("Float"),
            PropertyDescriptor::Color { .. } => Some("Color"),
            PropertyDescriptor::Vector2 { .. }
            | PropertyDescriptor::Vector3 { .. }
            | PropertyDescriptor::Vector4 { .. } => Some("Vector"),
            PropertyDescriptor::Matrix3 { .. } | PropertyDescriptor::Matrix4 { .. } => {
                Some("Matrix")
            }
            PropertyDescriptor::Euler { .. } => Some("Euler"),
            PropertyDescriptor::Enum { .. } => Some("Enum"),
            PropertyDescriptor::ClassRef { .. } => Some("ClassRef"),
            PropertyDescriptor::ClassRefArray { .. } => Some("ClassRefArray"),
            PropertyDescriptor::ClassRefDict { .. } => Some("ClassRefDict"),
            PropertyDescriptor::Array { .. } => Some("Array"),
            PropertyDescriptor::Int { .. }
            | PropertyDescriptor::String { .. }
            | PropertyDescriptor::Dict { .. }
            | PropertyDescriptor::Any { .. } => None,
        }
    }

    /// Name of the in-place assignment used instead of plain property assignment
    pub fn assigner(&self) -> Option<&'static str> {
        match self {
            PropertyDescriptor::Color { .. } => Some("Color"),
            PropertyDescriptor::Vector2 { .. }
            | PropertyDescriptor::Vector3 { .. }
            | PropertyDescriptor::Vector4 { .. } => Some("Vector"),
            PropertyDescriptor::Matrix3 { .. } | PropertyDescriptor::Matrix4 { .. } => {
                Some("Matrix")
            }
            PropertyDescriptor::Euler { .. } => Some("Euler"),
            _ => None,
        }
    }

    /// Serializer attached to the synced value, per language
    pub fn serializer(&self, lang: Language) -> Option<&'static str> {
        match self {
            PropertyDescriptor::ClassRef { .. }
            | PropertyDescriptor::ClassRefArray { .. }
            | PropertyDescriptor::ClassRefDict { .. } => Some(match lang {
                Language::JavaScript => "unpackModels",
                Language::Python => "widget_serialization",
            }),
            _ => None,
        }
    }

    /// Enum type name, for enum-valued properties
    pub fn enum_type(&self) -> Option<&str> {
        match self {
            PropertyDescriptor::Enum { enum_type, .. } => Some(enum_type),
            _ => None,
        }
    }

    /// Grouping key for class-referencing properties
    pub fn grouping(&self) -> Option<Grouping> {
        match self {
            PropertyDescriptor::ClassRef { .. } => Some(Grouping::Child),
            PropertyDescriptor::ClassRefArray { .. } => Some(Grouping::Array),
            PropertyDescriptor::ClassRefDict { .. } => Some(Grouping::Dict),
            _ => None,
        }
    }
}

fn bool_literal(value: bool, lang: Language) -> String {
    match (lang, value) {
        (Language::JavaScript, true) => "true",
        (Language::JavaScript, false) => "false",
        (Language::Python, true) => "True",
        (Language::Python, false) => "False",
    }
    .to_string()
}

fn float_literal(value: f64, lang: Language) -> String {
    if value.is_nan() {
        return match lang {
            Language::JavaScript => "NaN".to_string(),
            Language::Python => "float('nan')".to_string(),
        };
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return match lang {
            Language::JavaScript => format!("{sign}Infinity"),
            Language::Python => format!("float('{sign}inf')"),
        };
    }
    if value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}

fn string_literal(value: &str) -> String {
    // JSON string escaping is valid in both target languages
    serde_json::Value::String(value.to_string()).to_string()
}

fn list_literal(values: &[f64], lang: Language) -> String {
    let items: Vec<String> = values.iter().map(|v| float_literal(*v, lang)).collect();
    format!("[{}]", items.join(", "))
}

fn identity(size: usize) -> Vec<f64> {
    (0..size * size)
        .map(|i| if i % (size + 1) == 0 { 1.0 } else { 0.0 })
        .collect()
}

fn json_literal(value: &serde_json::Value, lang: Language) -> String {
    use serde_json::Value;

    match value {
        Value::Null => lang.null_literal().to_string(),
        Value::Bool(b) => bool_literal(*b, lang),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_literal(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(|v| json_literal(v, lang)).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", string_literal(k), json_literal(v, lang)))
                .collect();
            format!("{{{}}}", entries.join(", "))
        }
    }
}

#[cfg(test)]
#[path = "property/property_tests.rs"]
mod property_tests;
