//! # wardrobe
//!
//! Generates the Solidity contract that re-creates a V4 dressed-NFT
//! collection on V5.
//!
//! ```bash
//! wardrobe -v generate --input export.json --config wardrobe.toml --out-dir contracts
//! ```

use std::process::ExitCode;

use clap::Parser;
use wardrobe::{telemetry, Cli};

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.verbose, cli.quiet);

    match wardrobe::run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
