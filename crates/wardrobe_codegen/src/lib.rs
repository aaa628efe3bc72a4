//! # WARDROBE Codegen
//!
//! Turns migration plans into Solidity source.
//!
//! ## Pipeline
//!
//! ```text
//! GeneratorConfig (TOML) ─┐
//!                         ├─▶ Emitter ─▶ GeneratedFile(s)
//! MigrationPlan ──────────┘
//! ```
//!
//! Output is a pure function of the plan and the configuration: no clocks,
//! no randomness, no iteration over unordered maps.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod emit;
pub mod error;
pub mod interfaces;
pub mod writer;

pub use config::{ChainAddresses, ChainConfig, GeneratorConfig};
pub use emit::{generate, render_reference, Emitter, GeneratedFile, OutputMode};
pub use error::{CodegenError, CodegenResult};
pub use interfaces::{CalledFunction, CALLED_FUNCTIONS};
pub use writer::SolidityWriter;
