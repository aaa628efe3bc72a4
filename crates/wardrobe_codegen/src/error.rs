//! # Codegen Error Types

use std::path::PathBuf;

use thiserror::Error;
use wardrobe_core::CoreError;
use wardrobe_shared::ChainId;

/// Errors that can occur while configuring or emitting.
#[derive(Error, Debug)]
pub enum CodegenError {
    /// A chain with items has no usable address for a required contract.
    #[error("chain {chain_id}: missing `{field}` address in configuration")]
    MissingAddress {
        /// The chain.
        chain_id: ChainId,
        /// Config field that is absent or zero.
        field: &'static str,
    },

    /// Items were exported for a chain outside the fixed chain table.
    #[error("unsupported chain {0}: not in the chain table")]
    UnsupportedChain(ChainId),

    /// Configuration parsed but is not usable.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration is not valid TOML for the expected schema.
    #[error("malformed configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Planning failed.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Result type for codegen operations.
pub type CodegenResult<T> = Result<T, CodegenError>;
