// archgen-cli/src/main.rs
// ============================================================================
// Module: ArchGen CLI Entry Point
// Description: Command dispatcher for diagram generation workflows.
// Purpose: Generate documents, check table and config integrity, and list
//          the catalog from the command line.
// Dependencies: archgen-config, archgen-core, clap, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Three commands: `generate` runs the full pipeline for a prompt and
//! prints the document as JSON, `check` validates the built-in tables and
//! the active config, and `catalog` lists the selectable products.
//! Validation warnings go to stderr; documents go to stdout.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod cache;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use archgen_config::ArchGenConfig;
use archgen_config::ConfigError;
use archgen_core::Catalog;
use archgen_core::DiagramEngine;
use archgen_core::EdgeRuleSet;
use archgen_core::GenerateError;
use archgen_core::NodeId;
use archgen_core::RuleClassifier;
use clap::Parser;
use clap::Subcommand;
use thiserror::Error;

use crate::cache::FileCache;

// ============================================================================
// SECTION: Arguments
// ============================================================================

/// ArchGen: prompt-to-architecture-diagram generator.
#[derive(Parser, Debug)]
#[command(name = "archgen", version, about)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Command to run.
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generates a diagram document from a prompt.
    Generate {
        /// Free-text integration prompt.
        prompt: String,
        /// Write the document to a file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Compact JSON instead of pretty-printed.
        #[arg(long)]
        compact: bool,
    },
    /// Validates the built-in tables and the active configuration.
    Check,
    /// Lists the product catalog, one entry per line.
    Catalog,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI failures surfaced to the user.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration failure.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Generation pipeline failure.
    #[error(transparent)]
    Generate(#[from] GenerateError),
    /// Output serialization failure.
    #[error("output error: {0}")]
    Output(String),
    /// Table integrity check failed.
    #[error("integrity check failed: {0} warning(s); rerun with `check` for details")]
    Integrity(usize),
}

// ============================================================================
// SECTION: Entry Point
// ============================================================================

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("archgen: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<ExitCode, CliError> {
    let cli = Cli::parse();
    let config = ArchGenConfig::load(cli.config.as_deref())?;
    match cli.command {
        Commands::Generate {
            prompt,
            output,
            compact,
        } => command_generate(&config, &prompt, output, compact),
        Commands::Check => command_check(&config),
        Commands::Catalog => command_catalog(),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

fn command_generate(
    config: &ArchGenConfig,
    prompt: &str,
    output: Option<PathBuf>,
    compact: bool,
) -> Result<ExitCode, CliError> {
    let classifier = RuleClassifier::default()
        .with_default_source(NodeId::from(config.classifier.default_source.as_str()));
    let mut engine = DiagramEngine::new(config.layout).with_classifier(classifier);
    if config.cache.enabled {
        if let Some(dir) = &config.cache.dir {
            // A cache that cannot be opened is skipped, not fatal.
            if let Ok(file_cache) = FileCache::open(dir.clone()) {
                engine = engine.with_cache(file_cache);
            }
        }
    }

    let doc = engine.generate(prompt)?;
    let json = if compact {
        serde_json::to_string(&doc)
    } else {
        serde_json::to_string_pretty(&doc)
    }
    .map_err(|err| CliError::Output(err.to_string()))?;

    match output {
        Some(path) => fs::write(path, json).map_err(|err| CliError::Output(err.to_string()))?,
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}").map_err(|err| CliError::Output(err.to_string()))?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn command_check(config: &ArchGenConfig) -> Result<ExitCode, CliError> {
    config.validate()?;
    let warnings = Catalog::builtin().validate(&EdgeRuleSet::builtin());
    for warning in &warnings {
        eprintln!("archgen: warning: {warning}");
    }
    if warnings.is_empty() {
        println!("ok: catalog, rules, and config are consistent");
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::Integrity(warnings.len()))
    }
}

fn command_catalog() -> Result<ExitCode, CliError> {
    let catalog = Catalog::builtin();
    let mut stdout = std::io::stdout().lock();
    // One JSON object per line so the output pipes cleanly into jq or grep.
    for entry in catalog.iter() {
        let line =
            serde_json::to_string(entry).map_err(|err| CliError::Output(err.to_string()))?;
        writeln!(stdout, "{line}").map_err(|err| CliError::Output(err.to_string()))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::panic, reason = "Test-only assertions are permitted.")]

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_generate_parses_prompt_and_flags() {
        let cli = Cli::try_parse_from(["archgen", "generate", "Oracle to BigQuery", "--compact"]).unwrap();
        match cli.command {
            Commands::Generate {
                prompt,
                compact,
                output,
            } => {
                assert_eq!(prompt, "Oracle to BigQuery");
                assert!(compact);
                assert!(output.is_none());
            }
            Commands::Check | Commands::Catalog => panic!("wrong command parsed"),
        }
    }

    #[test]
    fn test_check_passes_on_builtin_tables() {
        assert!(command_check(&ArchGenConfig::default()).is_ok());
    }
}
