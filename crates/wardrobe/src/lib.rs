//! # WARDROBE
//!
//! Command line front end of the V4 -> V5 dressed-NFT migration generator.
//!
//! ```text
//! export.json ─▶ loader ─▶ wardrobe_core (plan) ─▶ wardrobe_codegen ─▶ *.sol
//! wardrobe.toml ───────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! wardrobe generate --input export.json --config wardrobe.toml --out MigrationContractV5.sol
//! wardrobe generate --input export.json --config wardrobe.toml --out-dir contracts --per-chain
//! wardrobe plan --input export.json > plan.json
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod cli;
pub mod commands;
pub mod error;
pub mod loader;
pub mod telemetry;

pub use cli::{Cli, Commands, GenerateArgs, PlanArgs};
pub use commands::{run, run_generate, run_plan, PlanReport};
pub use error::{Error, Result};
pub use loader::{LoadError, LoadResult};
