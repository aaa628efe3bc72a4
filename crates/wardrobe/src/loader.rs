//! # V4 Export Loader
//!
//! Reads the indexer's JSON export into [`Item`]s.
//!
//! Two document shapes are accepted: the raw query response
//! (`{"data":{"nfts":{"items":[...]}}}`) and a bare `{"items":[...]}`.
//! Item order is preserved; the planner relies on it for stable output.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use alloy_primitives::Address;
use serde::Deserialize;
use thiserror::Error;
use wardrobe_core::{Category, Item};
use wardrobe_shared::{CatalogCode, ChainId, TokenId, NO_OWNER};

/// Errors while reading an export.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The document is not JSON of the expected shape.
    #[error("malformed export: {0}")]
    Json(#[from] serde_json::Error),

    /// Neither `data.nfts.items` nor `items` is present.
    #[error("export has no item list (expected `data.nfts.items` or `items`)")]
    MissingItems,

    /// An owner or wallet address does not parse.
    #[error("chain {chain_id} token {token_id}: invalid address `{value}`")]
    InvalidAddress {
        /// Chain of the token.
        chain_id: ChainId,
        /// The token.
        token_id: TokenId,
        /// Offending text.
        value: String,
    },

    /// The same token appears twice on one chain.
    #[error("chain {chain_id} token {token_id}: listed more than once")]
    DuplicateToken {
        /// The chain.
        chain_id: ChainId,
        /// The token.
        token_id: TokenId,
    },
}

/// Result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

#[derive(Debug, Deserialize)]
struct ExportDocument {
    #[serde(default)]
    data: Option<ExportData>,
    #[serde(default)]
    items: Option<Vec<ExportItem>>,
}

#[derive(Debug, Deserialize)]
struct ExportData {
    nfts: ExportNfts,
}

#[derive(Debug, Deserialize)]
struct ExportNfts {
    items: Vec<ExportItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportItem {
    chain_id: ChainId,
    token_id: TokenId,
    upc: CatalogCode,
    category: u8,
    #[serde(default)]
    owner: Option<ExportHolder>,
    #[serde(default)]
    wallet: Option<ExportHolder>,
    #[serde(default)]
    background: Option<TokenId>,
    #[serde(default)]
    outfits: Option<Vec<TokenId>>,
}

#[derive(Debug, Deserialize)]
struct ExportHolder {
    #[serde(default)]
    address: Option<String>,
}

impl ExportHolder {
    fn address(&self) -> Option<&str> {
        self.address.as_deref().map(str::trim).filter(|a| !a.is_empty())
    }
}

impl ExportItem {
    /// `owner` wins over `wallet`; neither means nobody.
    fn holder(&self) -> LoadResult<Address> {
        let text = self
            .owner
            .as_ref()
            .and_then(ExportHolder::address)
            .or_else(|| self.wallet.as_ref().and_then(ExportHolder::address));

        match text {
            None => Ok(NO_OWNER),
            Some(text) => text.parse().map_err(|_| LoadError::InvalidAddress {
                chain_id: self.chain_id,
                token_id: self.token_id,
                value: text.to_string(),
            }),
        }
    }

    fn into_item(self) -> LoadResult<Item> {
        let owner = self.holder()?;
        Ok(Item::new(self.chain_id, self.token_id, self.upc, Category::from_code(self.category))
            .with_owner(owner)
            .with_background(self.background.unwrap_or(0))
            .with_worn(self.outfits.unwrap_or_default()))
    }
}

/// Parses an export document.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed JSON, [`LoadError::MissingItems`]
/// if no item list is found, [`LoadError::InvalidAddress`] for an unparsable
/// holder and [`LoadError::DuplicateToken`] for a token listed twice on a
/// chain.
pub fn parse_str(source: &str) -> LoadResult<Vec<Item>> {
    let document: ExportDocument = serde_json::from_str(source)?;
    let raw = match (document.data, document.items) {
        (Some(data), _) => data.nfts.items,
        (None, Some(items)) => items,
        (None, None) => return Err(LoadError::MissingItems),
    };

    let mut seen = HashSet::with_capacity(raw.len());
    let mut items = Vec::with_capacity(raw.len());
    for entry in raw {
        if !seen.insert((entry.chain_id, entry.token_id)) {
            return Err(LoadError::DuplicateToken {
                chain_id: entry.chain_id,
                token_id: entry.token_id,
            });
        }
        items.push(entry.into_item()?);
    }
    Ok(items)
}

/// Reads and parses an export file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise as
/// [`parse_str`].
pub fn load(path: &Path) -> LoadResult<Vec<Item>> {
    let source = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let items = parse_str(&source)?;
    tracing::info!(path = %path.display(), items = items.len(), "loaded export");
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: &str = "0x1111111111111111111111111111111111111111";
    const WALLET: &str = "0x2222222222222222222222222222222222222222";

    #[test]
    fn test_parse_query_response() {
        let source = format!(
            r#"{{"data":{{"nfts":{{"items":[
                {{"chainId":1,"tokenId":10,"upc":5,"category":0,
                  "owner":{{"address":"{OWNER}"}},"background":12,"outfits":[11]}},
                {{"chainId":1,"tokenId":11,"upc":7,"category":3}},
                {{"chainId":1,"tokenId":12,"upc":7,"category":1,"background":null,"outfits":null}}
            ]}}}}}}"#
        );
        let items = parse_str(&source).unwrap();

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].category, Category::Body);
        assert_eq!(items[0].owner, OWNER.parse::<Address>().unwrap());
        assert_eq!(items[0].background_old_id, 12);
        assert_eq!(items[0].worn_old_ids, vec![11]);
        assert_eq!(items[1].category, Category::Outfit);
        assert_eq!(items[1].owner, NO_OWNER);
        assert_eq!(items[2].category, Category::Background);
        assert_eq!(items[2].background_old_id, 0);
        assert!(items[2].worn_old_ids.is_empty());
    }

    #[test]
    fn test_parse_bare_items() {
        let items = parse_str(r#"{"items":[{"chainId":10,"tokenId":1,"upc":2,"category":0}]}"#).unwrap();
        assert_eq!(items[0].chain_id, 10);
    }

    #[test]
    fn test_owner_precedence() {
        let source = format!(
            r#"{{"items":[
                {{"chainId":1,"tokenId":1,"upc":1,"category":0,
                  "owner":{{"address":"{OWNER}"}},"wallet":{{"address":"{WALLET}"}}}},
                {{"chainId":1,"tokenId":2,"upc":1,"category":0,
                  "owner":{{"address":""}},"wallet":{{"address":"{WALLET}"}}}},
                {{"chainId":1,"tokenId":3,"upc":1,"category":0,
                  "owner":{{"address":null}},"wallet":{{}}}}
            ]}}"#
        );
        let items = parse_str(&source).unwrap();

        assert_eq!(items[0].owner, OWNER.parse::<Address>().unwrap());
        assert_eq!(items[1].owner, WALLET.parse::<Address>().unwrap());
        assert_eq!(items[2].owner, NO_OWNER);
        assert!(!items[2].has_owner());
    }

    #[test]
    fn test_rejects_duplicate_token() {
        let source = r#"{"items":[
            {"chainId":1,"tokenId":7,"upc":1,"category":0},
            {"chainId":10,"tokenId":7,"upc":1,"category":0},
            {"chainId":1,"tokenId":7,"upc":2,"category":2}
        ]}"#;
        assert!(matches!(
            parse_str(source),
            Err(LoadError::DuplicateToken { chain_id: 1, token_id: 7 })
        ));
    }

    #[test]
    fn test_rejects_bad_documents() {
        assert!(matches!(parse_str("{}"), Err(LoadError::MissingItems)));
        assert!(matches!(parse_str("[1, 2"), Err(LoadError::Json(_))));
        assert!(matches!(
            parse_str(r#"{"items":[{"chainId":1,"tokenId":7,"upc":70000,"category":0}]}"#),
            Err(LoadError::Json(_))
        ));
        assert!(matches!(
            parse_str(r#"{"items":[{"chainId":1,"tokenId":7,"upc":1,"category":0,"owner":{"address":"0xnope"}}]}"#),
            Err(LoadError::InvalidAddress { token_id: 7, .. })
        ));
    }
}
