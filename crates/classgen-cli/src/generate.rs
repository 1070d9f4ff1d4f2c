//! `classgen generate`

use anyhow::Result;
use classgen_codegen::{Pipeline, RunReport};
use classgen_core::{GeneratorConfig, Language};

pub async fn run(config: GeneratorConfig, languages: &[Language]) -> Result<()> {
    let store = crate::load_store(&config)?;
    tracing::info!(
        "Generating wrappers for {} classes from {}",
        store.len(),
        config.generator.classes.display()
    );

    let pipeline = Pipeline::new(config, store)?;
    let report = pipeline.run_languages(languages).await?;

    print!("{}", summary(&report));
    Ok(())
}

/// Human-readable run summary
pub fn summary(report: &RunReport) -> String {
    let mut out = String::new();

    for language in &report.languages {
        out.push_str(&format!(
            "✓ {}: {} generated, {} skipped, {} aggregation files\n",
            language.language,
            language.generated.len(),
            language.skipped.len(),
            language.aggregates.len()
        ));
    }

    let skipped: Vec<_> = report.skipped().collect();
    if skipped.is_empty() {
        out.push_str("\nGeneration complete!\n");
    } else {
        out.push_str(&format!("\n{} classes skipped:\n", skipped.len()));
        for class in skipped {
            out.push_str(&format!(
                "✗ {} ({}): {}\n",
                class.class_name, class.source_unit, class.error
            ));
        }
    }

    out
}
