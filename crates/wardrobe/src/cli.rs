//! Command line surface of the `wardrobe` binary.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

// =============================================================================
// Entry + global options
// =============================================================================

/// V4 -> V5 dressed-NFT migration generator.
#[derive(Parser, Debug)]
#[command(name = "wardrobe", version, about, arg_required_else_help = true)]
pub struct Cli {
    /// Errors only.
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// More log output (repeat for more).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// What to do.
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the Solidity migration contract(s).
    Generate(GenerateArgs),

    /// Print the migration plan as JSON without rendering.
    Plan(PlanArgs),
}

// =============================================================================
// Command args
// =============================================================================

/// Arguments of `wardrobe generate`.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// V4 export (JSON).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Generator configuration (TOML).
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Output file for the unified contract.
    #[arg(short, long, value_name = "FILE", conflicts_with_all = ["out_dir", "per_chain"])]
    pub out: Option<PathBuf>,

    /// Directory for generated files (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Emit one contract per chain instead of a unified dispatcher.
    #[arg(long)]
    pub per_chain: bool,

    /// Fail on component references that cannot be resolved.
    #[arg(long)]
    pub strict: bool,
}

/// Arguments of `wardrobe plan`.
#[derive(Args, Debug)]
pub struct PlanArgs {
    /// V4 export (JSON).
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// Fail on component references that cannot be resolved.
    #[arg(long)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "wardrobe", "-vv", "generate", "--input", "export.json", "--config", "wardrobe.toml",
            "--out-dir", "out", "--per-chain", "--strict",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.input, PathBuf::from("export.json"));
        assert_eq!(args.out_dir, Some(PathBuf::from("out")));
        assert!(args.per_chain);
        assert!(args.strict);
        assert!(args.out.is_none());
    }

    #[test]
    fn test_out_conflicts_with_per_chain() {
        let result = Cli::try_parse_from([
            "wardrobe", "generate", "-i", "e.json", "-c", "w.toml", "--out", "M.sol", "--per-chain",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_plan() {
        let cli = Cli::try_parse_from(["wardrobe", "plan", "-i", "export.json", "-q"]).unwrap();
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Plan(PlanArgs { strict: false, .. })));
    }
}
