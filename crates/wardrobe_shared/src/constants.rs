//! # Chain Table & Identifier Types
//!
//! The chains a migration run knows about, and the integer types used for
//! token identifiers and catalog codes.
//!
//! **CRITICAL:** The chain table drives both partitioning and the dispatch
//! logic of the generated contract. A chain missing here is rejected at
//! generation time and reverts at execution time.

use alloy_primitives::Address;
use serde::Serialize;

// =============================================================================
// IDENTIFIER TYPES
// =============================================================================

/// EVM chain identifier (`block.chainid`).
pub type ChainId = u64;

/// Token identifier as it exists in the V4 export.
pub type TokenId = u64;

/// Product catalog code (UPC) identifying a tier shared by many tokens.
///
/// The V5 hook mints from a `uint16[]`, so codes never exceed `u16::MAX`.
pub type CatalogCode = u16;

// =============================================================================
// FIXED CHAIN TABLE
// =============================================================================

/// Static description of a supported chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChainInfo {
    /// The chain id.
    pub id: ChainId,
    /// Identifier-safe display name, used for generated function names.
    pub name: &'static str,
}

/// Ethereum mainnet.
pub const ETHEREUM: ChainInfo = ChainInfo { id: 1, name: "Ethereum" };

/// Optimism mainnet.
pub const OPTIMISM: ChainInfo = ChainInfo { id: 10, name: "Optimism" };

/// Base mainnet.
pub const BASE: ChainInfo = ChainInfo { id: 8453, name: "Base" };

/// Arbitrum One.
pub const ARBITRUM: ChainInfo = ChainInfo { id: 42161, name: "Arbitrum" };

/// Every chain the generator emits a branch for, in dispatch order.
pub const SUPPORTED_CHAINS: [ChainInfo; 4] = [ETHEREUM, OPTIMISM, BASE, ARBITRUM];

/// Looks up a chain in the fixed table.
#[must_use]
pub fn chain_info(id: ChainId) -> Option<ChainInfo> {
    SUPPORTED_CHAINS.iter().copied().find(|chain| chain.id == id)
}

// =============================================================================
// WELL-KNOWN ADDRESSES
// =============================================================================

/// The zero address. An owner equal to this means "no transfer needed".
pub const NO_OWNER: Address = Address::ZERO;

/// Category code of a body in the V4 export.
pub const BODY_CATEGORY: u8 = 0;

/// Category code of a background in the V4 export.
pub const BACKGROUND_CATEGORY: u8 = 1;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_lookup() {
        assert_eq!(chain_info(8453), Some(BASE));
        assert_eq!(chain_info(1).map(|c| c.name), Some("Ethereum"));
        assert_eq!(chain_info(137), None);
    }

    #[test]
    fn test_chain_table_has_unique_ids() {
        for (i, a) in SUPPORTED_CHAINS.iter().enumerate() {
            for b in &SUPPORTED_CHAINS[i + 1..] {
                assert_ne!(a.id, b.id);
                assert_ne!(a.name, b.name);
            }
        }
    }
}
