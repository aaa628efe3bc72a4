//! # WARDROBE Shared
//!
//! Common types used by the planner, the emitter and the CLI.
//!
//! ## CRITICAL RULE
//!
//! This crate must NEVER depend on:
//! - `serde_json` / `toml` (loading belongs to the outer crates)
//! - anything that renders Solidity
//!
//! If you need formatting, put it in `wardrobe_codegen`.

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod constants;

pub use constants::{
    chain_info, CatalogCode, ChainId, ChainInfo, TokenId, ARBITRUM, BACKGROUND_CATEGORY, BASE,
    BODY_CATEGORY, ETHEREUM, NO_OWNER, OPTIMISM, SUPPORTED_CHAINS,
};
