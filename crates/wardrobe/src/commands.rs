//! Command handlers. Each one loads its inputs, calls the pipeline and writes
//! the result.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use wardrobe_codegen::{generate, GeneratedFile, GeneratorConfig, OutputMode};
use wardrobe_core::{MigrationPlan, ReferencePolicy};
use wardrobe_shared::{ChainId, SUPPORTED_CHAINS};

use crate::cli::{Commands, GenerateArgs, PlanArgs};
use crate::error::{Error, Result};
use crate::loader;

/// Runs a parsed subcommand.
///
/// # Errors
///
/// Returns whatever the subcommand fails with.
pub fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Generate(args) => {
            let written = run_generate(&args)?;
            for path in &written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Plan(args) => {
            let plan = run_plan(&args)?;
            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            serde_json::to_writer_pretty(&mut out, &PlanReport::new(&plan)).map_err(Error::Report)?;
            writeln!(out).map_err(|source| Error::Write {
                path: PathBuf::from("<stdout>"),
                source,
            })
        }
    }
}

/// Renders the contract(s) and writes them to disk.
///
/// Returns the paths written, in emission order.
///
/// # Errors
///
/// Fails on load, config, planning, emission or write errors.
pub fn run_generate(args: &GenerateArgs) -> Result<Vec<PathBuf>> {
    let mut config = GeneratorConfig::load(&args.config)?;
    config.strict_references |= args.strict;

    let items = loader::load(&args.input)?;
    let mode = if args.per_chain {
        OutputMode::PerChain
    } else {
        OutputMode::Unified
    };
    let files = generate(items, &config, mode)?;

    let dir = args.out_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    files
        .iter()
        .map(|file| {
            let path = match &args.out {
                Some(out) => out.clone(),
                None => dir.join(&file.file_name),
            };
            write_file(&path, file)?;
            Ok(path)
        })
        .collect()
}

/// Loads the export and plans every chain of the table.
///
/// # Errors
///
/// Fails on load errors and, with `--strict`, on unresolved references.
pub fn run_plan(args: &PlanArgs) -> Result<MigrationPlan> {
    let items = loader::load(&args.input)?;
    let policy = if args.strict {
        ReferencePolicy::Strict
    } else {
        ReferencePolicy::Fallback
    };
    Ok(MigrationPlan::build(items, &SUPPORTED_CHAINS, policy)?)
}

fn write_file(path: &Path, file: &GeneratedFile) -> Result<()> {
    let io_err = |source| Error::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, &file.source).map_err(io_err)?;
    tracing::info!(path = %path.display(), contract = %file.contract_name, "wrote contract");
    Ok(())
}

/// JSON document printed by `wardrobe plan`.
#[derive(Debug, Serialize)]
pub struct PlanReport<'a> {
    /// Items across all chains.
    pub total_items: usize,
    /// Hand-outs across all chains.
    pub total_transfers: usize,
    /// References that fell back to their old id.
    pub total_unresolved: usize,
    /// Chains with items but no entry in the chain table.
    pub unsupported_chains: Vec<ChainId>,
    /// Per-chain plans.
    pub plan: &'a MigrationPlan,
}

impl<'a> PlanReport<'a> {
    /// Summarizes a plan.
    #[must_use]
    pub fn new(plan: &'a MigrationPlan) -> Self {
        Self {
            total_items: plan.total_items(),
            total_transfers: plan.total_transfers(),
            total_unresolved: plan.total_unresolved(),
            unsupported_chains: plan.unsupported_chains(),
            plan,
        }
    }
}
