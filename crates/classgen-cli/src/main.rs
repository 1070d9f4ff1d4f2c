//! classgen CLI - Wrapper generator for configured library classes
//!
//! Commands:
//! - `classgen generate` - Generate JavaScript and Python wrappers plus aggregation files
//! - `classgen check` - Validate the class table and the source units it must cover
//! - `classgen resolve` - Print a class's resolved configuration and references

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use classgen_core::{ConfigStore, DEFAULT_CONFIG_FILE, GeneratorConfig, Language};
use std::path::{Path, PathBuf};

mod check;
mod generate;
mod logging;
mod resolve;

#[derive(Parser)]
#[command(name = "classgen")]
#[command(author, version, about = "Wrapper generator for configured library classes", long_about = None)]
struct Cli {
    /// Path to the run configuration
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate wrappers and aggregation files
    Generate {
        /// Target language
        #[arg(short, long, value_enum, default_value_t = LangArg::All)]
        lang: LangArg,
    },

    /// Validate the class table
    Check,

    /// Print the resolved configuration and references of one class
    Resolve {
        /// Class name
        class: String,

        /// Target language for the reference tables
        #[arg(short, long, value_enum, default_value_t = LangArg::All)]
        lang: LangArg,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LangArg {
    Js,
    Python,
    All,
}

impl LangArg {
    fn languages(self) -> Vec<Language> {
        match self {
            LangArg::Js => vec![Language::JavaScript],
            LangArg::Python => vec![Language::Python],
            LangArg::All => Language::ALL.to_vec(),
        }
    }
}

/// Load the run configuration
///
/// A missing file is only tolerated at the default location, where built-in
/// defaults apply.
fn load_config(path: &Path) -> Result<GeneratorConfig> {
    if !path.exists() && path == Path::new(DEFAULT_CONFIG_FILE) {
        return Ok(GeneratorConfig::default());
    }
    GeneratorConfig::from_file(path)
        .with_context(|| format!("failed to load configuration {}", path.display()))
}

/// Load the class table named by the configuration
fn load_store(config: &GeneratorConfig) -> Result<ConfigStore> {
    let path = &config.generator.classes;
    let store = ConfigStore::from_file(path)
        .with_context(|| format!("failed to load class table {}", path.display()))?;
    Ok(store.with_root(config.layout.base_class.clone()))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    logging::init(&config.generator.log_level, cli.verbose);

    match cli.command {
        Commands::Generate { lang } => {
            generate::run(config, &lang.languages()).await?;
        }
        Commands::Check => {
            let code = check::run(config)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
        Commands::Resolve { class, lang } => {
            resolve::run(config, &class, &lang.languages())?;
        }
    }

    Ok(())
}
