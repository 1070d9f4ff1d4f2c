//! Run configuration (`classgen.toml`)

use crate::{GenError, GenResult, Language, Layout};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default run configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "classgen.toml";

/// Configuration for one generator run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub generator: GeneratorSection,
    pub layout: LayoutSection,
    pub javascript: JavaScriptSection,
    pub python: PythonSection,
}

/// Inputs and global settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// Class table (JSON or TOML)
    pub classes: PathBuf,

    /// Library source tree to enumerate; the class table is used when absent
    pub source_root: Option<PathBuf>,

    /// Extension of source units in the library tree
    pub source_extension: String,

    /// Relative path prefixes to keep; empty keeps everything
    pub include: Vec<String>,

    /// Relative path prefixes to drop
    pub exclude: Vec<String>,

    pub log_level: String,

    pub docs_base_url: String,
}

/// Root sentinel and shared helper locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSection {
    pub base_class: String,
    pub base_path: String,

    /// Directory holding hand-written base modules
    pub base_dir: String,

    pub traits_path: String,
    pub enums_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JavaScriptSection {
    pub enabled: bool,
    pub output_dir: PathBuf,
    pub library_module: String,
    pub library_namespace: String,

    /// Hand-written entry points never listed in an index
    pub entry_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PythonSection {
    pub enabled: bool,
    pub output_dir: PathBuf,

    /// Aggregator file name, written at the output root
    pub aggregator: String,

    /// Hand-written modules never imported by the aggregator
    pub deny_list: Vec<String>,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            classes: PathBuf::from("class-config.json"),
            source_root: None,
            source_extension: "js".to_string(),
            include: Vec::new(),
            exclude: Vec::new(),
            log_level: "info".to_string(),
            docs_base_url: "https://threejs.org/docs/#api/".to_string(),
        }
    }
}

impl Default for LayoutSection {
    fn default() -> Self {
        Self {
            base_class: crate::DEFAULT_ROOT_CLASS.to_string(),
            base_path: "_base/Three".to_string(),
            base_dir: "_base".to_string(),
            traits_path: "traits".to_string(),
            enums_path: "enums".to_string(),
        }
    }
}

impl Default for JavaScriptSection {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("js/src"),
            library_module: "three".to_string(),
            library_namespace: "THREE".to_string(),
            entry_points: vec![
                "embed.js".to_string(),
                "extension.js".to_string(),
                "jupyterlab-plugin.js".to_string(),
            ],
        }
    }
}

impl Default for PythonSection {
    fn default() -> Self {
        Self {
            enabled: true,
            output_dir: PathBuf::from("python"),
            aggregator: "_package.py".to_string(),
            deny_list: vec![
                "_package.py".to_string(),
                "_version.py".to_string(),
                "install.py".to_string(),
            ],
        }
    }
}

impl GeneratorConfig {
    /// Load configuration from a TOML file
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: impl AsRef<Path>) -> GenResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| GenError::io(path, e))?;

        let mut config = Self::from_toml(&content)?;
        if let Some(base) = path.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Parse configuration from TOML text, without path rebasing
    pub fn from_toml(content: &str) -> GenResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve relative paths against `base`
    pub fn rebase(&mut self, base: &Path) {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        rebase(&mut self.generator.classes);
        if let Some(root) = self.generator.source_root.as_mut() {
            rebase(root);
        }
        rebase(&mut self.javascript.output_dir);
        rebase(&mut self.python.output_dir);
    }

    /// Validate the configuration
    pub fn validate(&self) -> GenResult<()> {
        if self.layout.base_class.is_empty() {
            return Err(GenError::Config("layout.base_class cannot be empty".into()));
        }
        if self.generator.source_extension.is_empty() {
            return Err(GenError::Config(
                "generator.source_extension cannot be empty".into(),
            ));
        }
        if self.python.aggregator.is_empty() || !self.python.aggregator.ends_with(".py") {
            return Err(GenError::Config(format!(
                "python.aggregator must be a .py file name, got {:?}",
                self.python.aggregator
            )));
        }
        if !self.javascript.enabled && !self.python.enabled {
            return Err(GenError::Config(
                "at least one of javascript or python must be enabled".into(),
            ));
        }
        Ok(())
    }

    /// Whether a language pipeline runs
    pub fn is_enabled(&self, lang: Language) -> bool {
        match lang {
            Language::JavaScript => self.javascript.enabled,
            Language::Python => self.python.enabled,
        }
    }

    /// Output layout for a language
    pub fn layout_for(&self, lang: Language) -> Layout {
        match lang {
            Language::JavaScript => Layout::javascript(&self.javascript.output_dir),
            Language::Python => Layout::python(&self.python.output_dir),
        }
    }

    /// Documentation URL for a documentation path
    pub fn docs_url(&self, doc_path: &str) -> String {
        format!("{}{}", self.generator.docs_base_url, doc_path)
    }
}
