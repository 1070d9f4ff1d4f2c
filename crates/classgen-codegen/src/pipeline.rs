//! Orchestration of one generator run
//!
//! ```text
//! enumerate units → resolve classes (memoized) ─┬─→ JavaScript: spawn per class → join → indexes
//!                                               └─→ Python:     spawn per class → join → markers, aggregator
//! ```
//!
//! Class-scoped failures are logged and reported; storage failures abort the run.

use crate::aggregate::{self, IndexSettings, PackageSettings};
use crate::context::ClassInput;
use crate::sources::{self, SourceUnit};
use crate::storage::{FsStorage, Storage};
use crate::templates::TemplateEngine;
use crate::{JsGenerator, PyGenerator};
use classgen_core::{
    ConfigResolver, ConfigStore, FsOverrideDetector, GenError, GenResult, GeneratorConfig,
    Language, Layout, OverrideDetector, ReferenceResolver, ReferenceTable, ResolvedConfig,
};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinSet;

/// A class that was not generated, with the reason
#[derive(Debug)]
pub struct SkippedClass {
    pub class_name: String,
    pub source_unit: String,
    pub error: GenError,
}

/// Outcome of one language pipeline
#[derive(Debug)]
pub struct LanguageReport {
    pub language: Language,

    /// Wrapper files written, sorted
    pub generated: Vec<PathBuf>,

    pub skipped: Vec<SkippedClass>,

    /// Index, marker and aggregator files written
    pub aggregates: Vec<PathBuf>,
}

/// Outcome of a whole run
#[derive(Debug, Default)]
pub struct RunReport {
    pub languages: Vec<LanguageReport>,

    /// Classes that failed before any language pipeline started
    pub unresolved: Vec<SkippedClass>,
}

impl RunReport {
    /// Total wrapper files written
    pub fn generated_count(&self) -> usize {
        self.languages.iter().map(|l| l.generated.len()).sum()
    }

    /// Every skipped class across the run
    pub fn skipped(&self) -> impl Iterator<Item = &SkippedClass> {
        self.unresolved
            .iter()
            .chain(self.languages.iter().flat_map(|l| l.skipped.iter()))
    }

    /// Whether every enumerated class was generated
    pub fn is_clean(&self) -> bool {
        self.skipped().next().is_none()
    }

    pub fn language(&self, lang: Language) -> Option<&LanguageReport> {
        self.languages.iter().find(|l| l.language == lang)
    }
}

/// A class scheduled for generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUnit {
    pub class_name: String,

    /// Relative path of the source unit that scheduled the class
    pub source_unit: String,
}

enum Generator {
    JavaScript(JsGenerator),
    Python(PyGenerator),
}

/// Per-language state shared read-only by every generation task
struct LanguageJob {
    store: Arc<ConfigStore>,
    layout: Layout,
    base_path: String,
    detector: Arc<dyn OverrideDetector>,
    storage: Arc<dyn Storage>,
    generator: Generator,
}

impl LanguageJob {
    /// Resolve references and render the wrapper for one class
    fn render_class(&self, config: &ResolvedConfig) -> GenResult<(PathBuf, String)> {
        let generated_path = self
            .layout
            .generated_path(&config.class_name, &config.relative_path);
        let resolver = ReferenceResolver::new(&self.store, &self.layout, self.detector.as_ref())
            .with_base_path(&self.base_path);

        let references = resolver.resolve_references(config, &generated_path)?;
        let superclass = resolver.superclass_reference(config, &generated_path)?;
        let base = resolver.base_reference(&generated_path);

        let override_path = self
            .layout
            .override_path(&config.class_name, &config.relative_path);
        let override_import = self
            .detector
            .is_override_present(&override_path)
            .then(|| self.layout.import_path(&generated_path, &override_path));

        let input = ClassInput {
            config,
            references: &references,
            superclass: &superclass,
            base: &base,
            generated_path: generated_path.clone(),
            override_import,
        };
        let contents = match &self.generator {
            Generator::JavaScript(generator) => generator.render(&input)?,
            Generator::Python(generator) => generator.render(&input)?,
        };

        Ok((generated_path, contents))
    }
}

/// Runs both language pipelines over one class table
pub struct Pipeline {
    config: Arc<GeneratorConfig>,
    store: Arc<ConfigStore>,
    engine: Arc<TemplateEngine>,
    storage: Arc<dyn Storage>,
    detector: Arc<dyn OverrideDetector>,
}

impl Pipeline {
    /// Create a pipeline writing to the filesystem
    ///
    /// The store's root sentinel is taken from `layout.base_class`.
    pub fn new(config: GeneratorConfig, store: ConfigStore) -> GenResult<Self> {
        let store = store.with_root(config.layout.base_class.clone());
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            engine: Arc::new(TemplateEngine::new()?),
            storage: Arc::new(FsStorage),
            detector: Arc::new(FsOverrideDetector),
        })
    }

    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = storage;
        self
    }

    #[must_use]
    pub fn with_detector(mut self, detector: Arc<dyn OverrideDetector>) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    /// Expand source units into distinct classes, primaries before their extras
    ///
    /// Units naming a class absent from the store are returned as skipped.
    pub fn plan(&self, units: &[SourceUnit]) -> (Vec<ClassUnit>, Vec<SkippedClass>) {
        let mut seen = HashSet::new();
        let mut classes = Vec::new();
        let mut skipped = Vec::new();

        for unit in units {
            let extras = match self.store.extra_definitions(&unit.class_name) {
                Ok(extras) => extras,
                Err(error) => {
                    tracing::warn!(
                        "Skipping source unit {}: {}",
                        unit.relative_path,
                        error
                    );
                    skipped.push(SkippedClass {
                        class_name: unit.class_name.clone(),
                        source_unit: unit.relative_path.clone(),
                        error,
                    });
                    continue;
                }
            };

            let names = std::iter::once(unit.class_name.as_str()).chain(extras);
            for name in names {
                if seen.insert(name.to_string()) {
                    classes.push(ClassUnit {
                        class_name: name.to_string(),
                        source_unit: unit.relative_path.clone(),
                    });
                }
            }
        }

        (classes, skipped)
    }

    /// Run every enabled language pipeline
    pub async fn run(&self) -> GenResult<RunReport> {
        self.run_languages(&Language::ALL).await
    }

    /// Run the given language pipelines, skipping disabled ones
    pub async fn run_languages(&self, languages: &[Language]) -> GenResult<RunReport> {
        let units = sources::enumerate(&self.config, &self.store)?;
        let (classes, mut unresolved) = self.plan(&units);
        tracing::info!(
            "Enumerated {} source units, {} classes",
            units.len(),
            classes.len()
        );

        let mut resolver = ConfigResolver::new(&self.store);
        let mut resolved = Vec::with_capacity(classes.len());
        for unit in classes {
            match resolver.resolve(&unit.class_name) {
                Ok(config) => resolved.push((unit, config)),
                Err(error) => {
                    tracing::warn!(
                        "Skipping {} ({}): {}",
                        unit.class_name,
                        unit.source_unit,
                        error
                    );
                    unresolved.push(SkippedClass {
                        class_name: unit.class_name,
                        source_unit: unit.source_unit,
                        error,
                    });
                }
            }
        }

        let wants = |lang: Language| languages.contains(&lang) && self.config.is_enabled(lang);
        let javascript = async {
            if wants(Language::JavaScript) {
                self.run_language(Language::JavaScript, &resolved)
                    .await
                    .map(Some)
            } else {
                Ok(None)
            }
        };
        let python = async {
            if wants(Language::Python) {
                self.run_language(Language::Python, &resolved).await.map(Some)
            } else {
                Ok(None)
            }
        };

        let (javascript, python) = tokio::try_join!(javascript, python)?;

        Ok(RunReport {
            languages: javascript.into_iter().chain(python).collect(),
            unresolved,
        })
    }

    /// References a class's wrapper would import, for inspection
    pub fn references(&self, lang: Language, class_name: &str) -> GenResult<ReferenceTable> {
        let config = self.store.resolve(class_name)?;
        let layout = self.config.layout_for(lang);
        let generated_path = layout.generated_path(&config.class_name, &config.relative_path);

        ReferenceResolver::new(&self.store, &layout, self.detector.as_ref())
            .with_base_path(&self.config.layout.base_path)
            .resolve_references(&config, &generated_path)
    }

    fn language_job(&self, lang: Language) -> LanguageJob {
        let generator = match lang {
            Language::JavaScript => {
                Generator::JavaScript(JsGenerator::new(Arc::clone(&self.engine), &self.config))
            }
            Language::Python => {
                Generator::Python(PyGenerator::new(Arc::clone(&self.engine), &self.config))
            }
        };

        LanguageJob {
            store: Arc::clone(&self.store),
            layout: self.config.layout_for(lang),
            base_path: self.config.layout.base_path.clone(),
            detector: Arc::clone(&self.detector),
            storage: Arc::clone(&self.storage),
            generator,
        }
    }

    async fn run_language(
        &self,
        lang: Language,
        classes: &[(ClassUnit, Arc<ResolvedConfig>)],
    ) -> GenResult<LanguageReport> {
        let job = Arc::new(self.language_job(lang));
        tracing::info!(
            "Generating {} {} wrappers into {}",
            classes.len(),
            lang,
            job.layout.output_dir().display()
        );

        let mut tasks = JoinSet::new();
        for (unit, config) in classes {
            let job = Arc::clone(&job);
            let unit = unit.clone();
            let config = Arc::clone(config);
            tasks.spawn(async move {
                let outcome = match job.render_class(&config) {
                    Ok((path, contents)) => {
                        let written = job.storage.write(&path, &contents).await;
                        written.map(|()| path)
                    }
                    Err(error) => Err(error),
                };
                (unit, outcome)
            });
        }

        let mut generated = Vec::new();
        let mut skipped = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (unit, outcome) = match joined {
                Ok(result) => result,
                Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
                Err(e) => {
                    tracing::warn!("Generation task cancelled: {}", e);
                    continue;
                }
            };

            match outcome {
                Ok(path) => {
                    tracing::debug!("Generated {} for {}", path.display(), unit.class_name);
                    generated.push(path);
                }
                Err(error) if error.is_class_scoped() => {
                    tracing::warn!(
                        "Skipping {} ({}): {}",
                        unit.class_name,
                        unit.source_unit,
                        error
                    );
                    skipped.push(SkippedClass {
                        class_name: unit.class_name,
                        source_unit: unit.source_unit,
                        error,
                    });
                }
                Err(error) => return Err(error),
            }
        }
        generated.sort();
        skipped.sort_by(|a, b| a.class_name.cmp(&b.class_name));

        let aggregates = self.aggregate(lang, &job.layout, &generated).await?;
        tracing::info!(
            "{}: {} generated, {} skipped, {} aggregation files",
            lang,
            generated.len(),
            skipped.len(),
            aggregates.len()
        );

        Ok(LanguageReport {
            language: lang,
            generated,
            skipped,
            aggregates,
        })
    }

    async fn aggregate(
        &self,
        lang: Language,
        layout: &Layout,
        generated: &[PathBuf],
    ) -> GenResult<Vec<PathBuf>> {
        let storage = self.storage.as_ref();

        match lang {
            Language::JavaScript => {
                let settings = IndexSettings::from_config(&self.config);
                aggregate::generate_indexes(&self.engine, storage, layout, &settings).await
            }
            Language::Python => {
                let settings = PackageSettings::from_config(&self.config);
                let mut written =
                    aggregate::ensure_package_markers(storage, layout, generated).await?;
                written.push(
                    aggregate::generate_package(&self.engine, storage, layout, &settings).await?,
                );
                Ok(written)
            }
        }
    }
}
