//! File naming and import path conventions per target language
//!
//! | Language   | Generated             | Override    | Import path form          |
//! |------------|-----------------------|-------------|---------------------------|
//! | JavaScript | `dir/Name.autogen.js` | `dir/Name.js` | `./Name.js`, `../dir/Name.js` |
//! | Python     | `dir/Name_autogen.py` | `dir/Name.py` | `.Name`, `..dir.Name`     |

use crate::Language;
use std::path::{Component, Path, PathBuf};

const JS_GENERATED_SUFFIX: &str = ".autogen.js";
const JS_EXTENSION: &str = ".js";
const PY_GENERATED_SUFFIX: &str = "_autogen.py";
const PY_EXTENSION: &str = ".py";

/// Output tree conventions for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    language: Language,
    output_dir: PathBuf,
}

impl Layout {
    pub fn new(language: Language, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            language,
            output_dir: output_dir.into(),
        }
    }

    pub fn javascript(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(Language::JavaScript, output_dir)
    }

    pub fn python(output_dir: impl Into<PathBuf>) -> Self {
        Self::new(Language::Python, output_dir)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Suffix distinguishing generated files from overrides
    pub fn generated_suffix(&self) -> &'static str {
        match self.language {
            Language::JavaScript => JS_GENERATED_SUFFIX,
            Language::Python => PY_GENERATED_SUFFIX,
        }
    }

    /// Plain module extension
    pub fn extension(&self) -> &'static str {
        match self.language {
            Language::JavaScript => JS_EXTENSION,
            Language::Python => PY_EXTENSION,
        }
    }

    /// Directory a class with this relative path is written to
    pub fn class_dir(&self, relative_path: &str) -> PathBuf {
        let normalized = normalize_relative_path(relative_path);
        let mut dir = self.output_dir.clone();
        if let Some((parent, _)) = normalized.rsplit_once('/') {
            dir.extend(parent.split('/'));
        }
        dir
    }

    /// Where the generated artifact for a class lives
    pub fn generated_path(&self, class_name: &str, relative_path: &str) -> PathBuf {
        self.class_dir(relative_path)
            .join(format!("{class_name}{}", self.generated_suffix()))
    }

    /// Where a hand-written override for a class would live
    pub fn override_path(&self, class_name: &str, relative_path: &str) -> PathBuf {
        self.class_dir(relative_path)
            .join(format!("{class_name}{}", self.extension()))
    }

    /// Whether a file name follows the generated naming scheme
    pub fn is_generated_file(&self, file_name: &str) -> bool {
        file_name.ends_with(self.generated_suffix())
    }

    /// Sibling override location for a generated file
    pub fn override_for(&self, generated: &Path) -> Option<PathBuf> {
        let file_name = generated.file_name()?.to_str()?;
        let stem = file_name.strip_suffix(self.generated_suffix())?;
        Some(generated.with_file_name(format!("{stem}{}", self.extension())))
    }

    /// Import path from the file being generated to a target file
    pub fn import_path(&self, from_file: &Path, to_file: &Path) -> String {
        let from_dir = from_file.parent().unwrap_or(Path::new(""));
        let (ups, segments) = relative_segments(from_dir, to_file);

        match self.language {
            Language::JavaScript => {
                let tail = segments.join("/");
                if ups == 0 {
                    format!("./{tail}")
                } else {
                    format!("{}{tail}", "../".repeat(ups))
                }
            }
            Language::Python => {
                let mut segments = segments;
                if let Some(last) = segments.last_mut() {
                    if let Some(module) = last.strip_suffix(PY_EXTENSION) {
                        *last = module.to_string();
                    }
                }
                format!("{}{}", ".".repeat(ups + 1), segments.join("."))
            }
        }
    }

    /// Package-relative module path of a file under the output root
    ///
    /// Only meaningful for Python, where the aggregator imports by module path.
    pub fn module_path(&self, file: &Path) -> Option<String> {
        let relative = file.strip_prefix(&self.output_dir).ok()?;
        let mut segments: Vec<String> = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let last = segments.last_mut()?;
        *last = last.strip_suffix(self.extension())?.to_string();
        Some(format!(".{}", segments.join(".")))
    }
}

/// Normalize a configured relative path to `dir/Unit` form
///
/// Strips `.` and `..` segments, empty segments, backslashes, and the file
/// extension, so the result always stays below the output directory.
pub fn normalize_relative_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    let mut path = path
        .split('/')
        .filter(|segment| !matches!(*segment, "" | "." | ".."))
        .collect::<Vec<_>>()
        .join("/");

    let last_start = path.rfind('/').map_or(0, |i| i + 1);
    if let Some(dot) = path[last_start..].rfind('.') {
        if dot > 0 {
            path.truncate(last_start + dot);
        }
    }

    path
}

/// Number of directories to ascend from `from_dir`, then the segments down to `to`
fn relative_segments(from_dir: &Path, to: &Path) -> (usize, Vec<String>) {
    let from: Vec<Component<'_>> = from_dir
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    let to: Vec<Component<'_>> = to
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let segments = to[common..]
        .iter()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    (from.len() - common, segments)
}
