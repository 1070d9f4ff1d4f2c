//! `classgen check`
//!
//! Exits with the code of the first problem found, 0 when the table is valid.

use anyhow::Result;
use classgen_codegen::{Pipeline, sources};
use classgen_core::{GenError, GeneratorConfig};

pub fn run(config: GeneratorConfig) -> Result<i32> {
    println!("Checking class table: {}", config.generator.classes.display());

    let store = crate::load_store(&config)?;
    let pipeline = Pipeline::new(config, store)?;
    let problems = problems(&pipeline)?;

    println!("✓ Classes: {}", pipeline.store().len());
    if problems.is_empty() {
        println!("\nClass table is valid!");
        return Ok(0);
    }

    for problem in &problems {
        println!("✗ {problem}");
    }
    println!("\n{} problems found", problems.len());

    Ok(problems.first().map_or(0, |p| p.error_code() as i32))
}

/// Every class-scoped problem of the table and of the enumerated source units
pub fn problems(pipeline: &Pipeline) -> Result<Vec<GenError>> {
    let mut problems = pipeline.store().validate();

    let units = sources::enumerate(pipeline.config(), pipeline.store())?;
    let (_, unknown) = pipeline.plan(&units);
    problems.extend(unknown.into_iter().map(|skipped| skipped.error));

    Ok(problems)
}
