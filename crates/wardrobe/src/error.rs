//! # Front End Error Types

use std::path::PathBuf;

use thiserror::Error;
use wardrobe_codegen::CodegenError;
use wardrobe_core::CoreError;

use crate::loader::LoadError;

/// Errors surfaced by a command.
#[derive(Error, Debug)]
pub enum Error {
    /// The export could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration or emission failed.
    #[error(transparent)]
    Codegen(#[from] CodegenError),

    /// Planning failed.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A generated file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The plan report could not be serialized.
    #[error("failed to write plan report: {0}")]
    Report(#[source] serde_json::Error),
}

/// Result type for commands.
pub type Result<T> = std::result::Result<T, Error>;
