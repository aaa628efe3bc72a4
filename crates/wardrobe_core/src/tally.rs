//! # Quantity Aggregator
//!
//! Counts how many units of each catalog code a chain must re-issue.

use std::collections::BTreeMap;

use serde::Serialize;
use wardrobe_shared::CatalogCode;

use crate::model::Item;

/// Units to issue per catalog code, iterated in ascending code order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CatalogTally {
    counts: BTreeMap<CatalogCode, usize>,
}

impl CatalogTally {
    /// Tallies items regardless of category.
    #[must_use]
    pub fn from_items(items: &[Item]) -> Self {
        let mut counts = BTreeMap::new();
        for item in items {
            *counts.entry(item.catalog_code).or_insert(0) += 1;
        }
        Self { counts }
    }

    /// Units required for `code` (zero if absent).
    #[inline]
    #[must_use]
    pub fn quantity(&self, code: CatalogCode) -> usize {
        self.counts.get(&code).copied().unwrap_or(0)
    }

    /// Total units, which sizes the issued sequence.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Number of distinct catalog codes.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True if nothing is issued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// `(code, quantity)` pairs in ascending code order.
    pub fn iter(&self) -> impl Iterator<Item = (CatalogCode, usize)> + '_ {
        self.counts.iter().map(|(&code, &quantity)| (code, quantity))
    }
}
