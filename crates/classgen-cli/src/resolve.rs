//! `classgen resolve`

use anyhow::Result;
use classgen_codegen::Pipeline;
use classgen_core::{GeneratorConfig, Language, ReferenceTable, ResolvedConfig};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct Resolution {
    pub config: ResolvedConfig,

    /// Reference tables keyed by language name
    pub references: BTreeMap<String, ReferenceTable>,
}

pub fn run(config: GeneratorConfig, class_name: &str, languages: &[Language]) -> Result<()> {
    let store = crate::load_store(&config)?;
    let pipeline = Pipeline::new(config, store)?;

    let resolution = resolve(&pipeline, class_name, languages)?;
    println!("{}", serde_json::to_string_pretty(&resolution)?);
    Ok(())
}

pub fn resolve(pipeline: &Pipeline, class_name: &str, languages: &[Language]) -> Result<Resolution> {
    let config = pipeline.store().resolve(class_name)?.as_ref().clone();

    let mut references = BTreeMap::new();
    for &lang in languages {
        references.insert(lang.to_string(), pipeline.references(lang, class_name)?);
    }

    Ok(Resolution { config, references })
}
