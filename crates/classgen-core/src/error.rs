//! Error types for configuration resolution and code generation

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for generator operations
pub type GenResult<T> = Result<T, GenError>;

/// Error type for generator operations
///
/// The first four variants are scoped to a single class: the orchestrator
/// logs them and moves on. The remaining variants abort the run.
#[derive(Error, Debug)]
pub enum GenError {
    /// Class name is absent from the config store
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// Superclass chain does not terminate at the root
    #[error("superclass cycle while resolving {class}: {}", .chain.join(" -> "))]
    ConfigCycle { class: String, chain: Vec<String> },

    /// A dependency or property names something that cannot be resolved
    #[error("invalid reference from {class}: {reference}")]
    InvalidReference { class: String, reference: String },

    /// Rendering context lacks something the template needs
    #[error("template render error for {class}: {message}")]
    TemplateRender { class: String, message: String },

    /// Run configuration or config store could not be loaded
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage failure
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GenError {
    /// Wrap an I/O error with the path it concerns
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GenError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a template error for a class
    pub fn render(class: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::TemplateRender {
            class: class.into(),
            message: message.into(),
        }
    }

    /// Stable numeric code, used as the process exit status of `check`
    pub fn error_code(&self) -> u32 {
        match self {
            GenError::UnknownClass(_) => 1,
            GenError::ConfigCycle { .. } => 2,
            GenError::InvalidReference { .. } => 3,
            GenError::TemplateRender { .. } => 4,
            GenError::Config(_) => 5,
            GenError::Io { .. } => 6,
        }
    }

    /// Whether the failure only concerns one class and the batch may continue
    pub fn is_class_scoped(&self) -> bool {
        matches!(
            self,
            GenError::UnknownClass(_)
                | GenError::ConfigCycle { .. }
                | GenError::InvalidReference { .. }
                | GenError::TemplateRender { .. }
        )
    }
}

impl From<serde_json::Error> for GenError {
    fn from(err: serde_json::Error) -> Self {
        GenError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for GenError {
    fn from(err: toml::de::Error) -> Self {
        GenError::Config(err.to_string())
    }
}


#[cfg(test)]
#[path = "error/error_parameterized_tests.rs"]
mod error_parameterized_tests;
