//! classgen-codegen - Wrapper and aggregation file generation
//!
//! This crate turns resolved class configurations into files:
//! - [`TemplateEngine`] owning the embedded Handlebars templates
//! - [`JsGenerator`] and [`PyGenerator`] rendering one wrapper per class
//! - [`aggregate`] producing JavaScript directory indexes and the Python aggregator
//! - [`sources`] enumerating the source units of a run
//! - [`Storage`] for whole-file writes
//! - [`Pipeline`] orchestrating both language pipelines
//!
//! # Architecture
//!
//! ```text
//! Source units
//!     ↓
//!  [ConfigResolver] ──→ ResolvedConfig
//!     ↓
//!  [ReferenceResolver] ──→ ReferenceTable
//!     ↓
//!  ├─→ [JsGenerator] → dir/C.autogen.js ──→ [index.js per directory]
//!  └─→ [PyGenerator] → dir/C_autogen.py ──→ [__init__.py, _package.py]
//! ```

pub mod aggregate;
mod context;
mod javascript;
pub mod naming;
mod pipeline;
mod python;
pub mod sources;
mod storage;
mod templates;

pub use context::{
    ArgContext, ClassInput, ImportContext, LibraryContext, PropertyContext, WrapperContext,
};
pub use javascript::JsGenerator;
pub use pipeline::{ClassUnit, LanguageReport, Pipeline, RunReport, SkippedClass};
pub use python::PyGenerator;
pub use sources::SourceUnit;
pub use storage::{FsStorage, Storage};
pub use templates::TemplateEngine;

/// Version stamped into every generated file header
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");
