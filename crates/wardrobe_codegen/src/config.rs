//! # Generator Configuration
//!
//! Per-run settings and per-chain contract addresses, loaded once from TOML.
//!
//! ```toml
//! contract_name = "MigrationContractV5"
//! solidity_version = "0.8.23"
//! strict_references = false
//!
//! [[chains]]
//! id = 1
//! hook = "0x..."
//! resolver = "0x..."
//! ```
//!
//! A chain entry may omit addresses; the omission only becomes an error when
//! that chain actually has tokens to migrate.

use std::collections::HashSet;
use std::path::Path;

use alloy_primitives::Address;
use serde::{Deserialize, Serialize};
use wardrobe_core::ReferencePolicy;
use wardrobe_shared::ChainId;

use crate::error::{CodegenError, CodegenResult};

/// Contract addresses of one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    /// Chain id.
    pub id: ChainId,
    /// V5 721 hook that mints and holds the collection.
    #[serde(default)]
    pub hook: Option<Address>,
    /// Resolver that dresses bodies.
    #[serde(default)]
    pub resolver: Option<Address>,
}

/// Addresses of a chain once both are known to be present.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainAddresses {
    /// V5 721 hook.
    pub hook: Address,
    /// Dressing resolver.
    pub resolver: Address,
}

/// Settings for one generation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Name of the generated contract (per-chain mode appends the chain name).
    #[serde(default = "default_contract_name")]
    pub contract_name: String,
    /// Exact compiler version for the pragma.
    #[serde(default = "default_solidity_version")]
    pub solidity_version: String,
    /// SPDX license identifier.
    #[serde(default = "default_license")]
    pub license: String,
    /// Refuse unresolved component references instead of emitting old ids.
    #[serde(default)]
    pub strict_references: bool,
    /// Per-chain addresses.
    #[serde(default)]
    pub chains: Vec<ChainConfig>,
}

fn default_contract_name() -> String {
    "MigrationContractV5".to_string()
}

fn default_solidity_version() -> String {
    "0.8.23".to_string()
}

fn default_license() -> String {
    "MIT".to_string()
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            contract_name: default_contract_name(),
            solidity_version: default_solidity_version(),
            license: default_license(),
            strict_references: false,
            chains: Vec::new(),
        }
    }
}

impl GeneratorConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Toml`] for malformed input and
    /// [`CodegenError::InvalidConfig`] if validation fails.
    pub fn from_toml_str(source: &str) -> CodegenResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::Io`] if the file cannot be read, otherwise as
    /// [`GeneratorConfig::from_toml_str`].
    pub fn load(path: &Path) -> CodegenResult<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| CodegenError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), chains = config.chains.len(), "loaded generator config");
        Ok(config)
    }

    /// Checks names and chain entries.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::InvalidConfig`] for a contract name that is not
    /// a Solidity identifier, a version that is not `x.y.z`, or a chain id
    /// listed twice.
    pub fn validate(&self) -> CodegenResult<()> {
        if !is_identifier(&self.contract_name) {
            return Err(CodegenError::InvalidConfig(format!(
                "contract_name `{}` is not a valid Solidity identifier",
                self.contract_name
            )));
        }

        let parts: Vec<_> = self.solidity_version.split('.').collect();
        if parts.len() != 3 || parts.iter().any(|p| p.is_empty() || !p.bytes().all(|b| b.is_ascii_digit())) {
            return Err(CodegenError::InvalidConfig(format!(
                "solidity_version `{}` must look like 0.8.23",
                self.solidity_version
            )));
        }

        let mut seen = HashSet::new();
        for chain in &self.chains {
            if !seen.insert(chain.id) {
                return Err(CodegenError::InvalidConfig(format!(
                    "chain {} is configured twice",
                    chain.id
                )));
            }
        }

        Ok(())
    }

    /// Planning policy implied by `strict_references`.
    #[must_use]
    pub const fn reference_policy(&self) -> ReferencePolicy {
        if self.strict_references {
            ReferencePolicy::Strict
        } else {
            ReferencePolicy::Fallback
        }
    }

    /// The entry of one chain.
    #[must_use]
    pub fn chain(&self, chain_id: ChainId) -> Option<&ChainConfig> {
        self.chains.iter().find(|chain| chain.id == chain_id)
    }

    /// Both addresses of a chain.
    ///
    /// # Errors
    ///
    /// Returns [`CodegenError::MissingAddress`] if the chain has no entry or
    /// an address is absent or zero.
    pub fn addresses(&self, chain_id: ChainId) -> CodegenResult<ChainAddresses> {
        let chain = self.chain(chain_id);
        let require = |field: &'static str, value: Option<Address>| {
            value
                .filter(|address| *address != Address::ZERO)
                .ok_or(CodegenError::MissingAddress { chain_id, field })
        };

        Ok(ChainAddresses {
            hook: require("hook", chain.and_then(|c| c.hook))?,
            resolver: require("resolver", chain.and_then(|c| c.resolver))?,
        })
    }
}

/// True for `[A-Za-z_$][A-Za-z0-9_$]*`.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_' || b == b'$')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'$')
}
