//! # Partitioner
//!
//! Groups export items by chain. Each chain is planned independently, so this
//! is the only stage that sees the whole export.
//!
//! Input order is preserved inside every group; every later stage depends on
//! it for stable output.

use std::collections::BTreeMap;

use serde::Serialize;
use wardrobe_shared::{ChainId, ChainInfo};

use crate::model::{Category, Item};

/// All items of one chain, in export order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChainGroup {
    /// The chain every item belongs to.
    pub chain_id: ChainId,
    items: Vec<Item>,
}

impl ChainGroup {
    /// Creates an empty group.
    #[must_use]
    pub const fn new(chain_id: ChainId) -> Self {
        Self {
            chain_id,
            items: Vec::new(),
        }
    }

    /// Creates a group from items already known to share `chain_id`.
    #[must_use]
    pub fn from_items(chain_id: ChainId, items: Vec<Item>) -> Self {
        debug_assert!(items.iter().all(|item| item.chain_id == chain_id));
        Self { chain_id, items }
    }

    /// All items in export order.
    #[inline]
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the chain has nothing to migrate.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items of one category, in export order.
    pub fn of_category(&self, category: Category) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter().filter(move |item| item.category == category)
    }

    /// Bodies in export order.
    pub fn bodies(&self) -> impl Iterator<Item = &Item> + '_ {
        self.of_category(Category::Body)
    }

    /// Outfits in export order.
    pub fn outfits(&self) -> impl Iterator<Item = &Item> + '_ {
        self.of_category(Category::Outfit)
    }

    /// Backgrounds in export order.
    pub fn backgrounds(&self) -> impl Iterator<Item = &Item> + '_ {
        self.of_category(Category::Background)
    }

    fn push(&mut self, item: Item) {
        self.items.push(item);
    }
}

/// Groups items by chain.
///
/// Every chain of `table` is present in the result, even with no items, so
/// the emitter can render a no-op branch for it. Items on chains outside the
/// table get their own group; rejecting them is the caller's decision.
#[must_use]
pub fn partition<I>(items: I, table: &[ChainInfo]) -> BTreeMap<ChainId, ChainGroup>
where
    I: IntoIterator<Item = Item>,
{
    let mut groups: BTreeMap<ChainId, ChainGroup> = table
        .iter()
        .map(|chain| (chain.id, ChainGroup::new(chain.id)))
        .collect();

    for item in items {
        groups
            .entry(item.chain_id)
            .or_insert_with(|| ChainGroup::new(item.chain_id))
            .push(item);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use wardrobe_shared::{BASE, ETHEREUM, SUPPORTED_CHAINS};

    fn item(chain_id: ChainId, old_id: u64, category: Category) -> Item {
        Item::new(chain_id, old_id, 1, category)
    }

    #[test]
    fn test_partition_keeps_input_order() {
        let items = vec![
            item(1, 3, Category::Body),
            item(8453, 1, Category::Body),
            item(1, 1, Category::Outfit),
            item(1, 2, Category::Body),
        ];

        let groups = partition(items, &SUPPORTED_CHAINS);
        let eth: Vec<_> = groups[&ETHEREUM.id].items().iter().map(|i| i.old_id).collect();
        assert_eq!(eth, vec![3, 1, 2]);
        assert_eq!(groups[&BASE.id].len(), 1);
    }

    #[test]
    fn test_partition_declares_empty_chains() {
        let groups = partition(Vec::<Item>::new(), &SUPPORTED_CHAINS);
        assert_eq!(groups.len(), SUPPORTED_CHAINS.len());
        assert!(groups.values().all(ChainGroup::is_empty));
    }

    #[test]
    fn test_partition_keeps_unknown_chains() {
        let groups = partition(vec![item(137, 1, Category::Body)], &SUPPORTED_CHAINS);
        assert_eq!(groups.len(), SUPPORTED_CHAINS.len() + 1);
        assert_eq!(groups[&137].len(), 1);
    }

    #[test]
    fn test_category_views() {
        let group = ChainGroup::from_items(
            1,
            vec![
                item(1, 1, Category::Background),
                item(1, 2, Category::Body),
                item(1, 3, Category::Outfit),
                item(1, 4, Category::Body),
            ],
        );
        fn ids<'a>(it: impl Iterator<Item = &'a Item>) -> Vec<u64> {
            it.map(|i| i.old_id).collect()
        }
        assert_eq!(ids(group.bodies()), vec![2, 4]);
        assert_eq!(ids(group.outfits()), vec![3]);
        assert_eq!(ids(group.backgrounds()), vec![1]);
    }
}
