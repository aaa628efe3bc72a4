//! # Ownership Planner
//!
//! Decides which issued positions leave the staging holder, and for whom.
//!
//! A token is handed out unless its owner is the zero address or some body
//! on the chain wears it. Items are visited bodies first, then outfits, then
//! backgrounds, in export order inside each category. Every transfer targets
//! the position the remapper assigned to that exact item.

use std::collections::HashSet;

use alloy_primitives::Address;
use serde::Serialize;
use wardrobe_shared::TokenId;

use crate::model::{Category, Item};
use crate::partition::ChainGroup;
use crate::remap::{Position, RemapIndex};

/// One hand-out from the staging holder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Transfer {
    /// Issued position of the token.
    pub position: Position,
    /// Old id of the token (for reports).
    pub old_id: TokenId,
    /// Receiver.
    pub owner: Address,
}

/// Ordered transfers for one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct OwnershipPlan {
    transfers: Vec<Transfer>,
}

impl OwnershipPlan {
    /// Plans the transfers of one chain.
    #[must_use]
    pub fn build(group: &ChainGroup, remap: &RemapIndex) -> Self {
        let consumed = consumed_components(group.items());
        let mut seen = HashSet::with_capacity(group.len());
        let mut transfers = Vec::new();

        for category in Category::TRANSFER_ORDER {
            let placed = group
                .items()
                .iter()
                .zip(remap.placements())
                .filter(|(item, _)| item.category == category);

            for (item, &position) in placed {
                if !item.has_owner() || consumed.contains(&item.old_id) {
                    continue;
                }
                if seen.insert(position) {
                    transfers.push(Transfer {
                        position,
                        old_id: item.old_id,
                        owner: item.owner,
                    });
                }
            }
        }

        Self { transfers }
    }

    /// Transfers in emission order.
    #[inline]
    #[must_use]
    pub fn transfers(&self) -> &[Transfer] {
        &self.transfers
    }

    /// Number of transfers.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.transfers.len()
    }

    /// True if nothing leaves the staging holder.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transfers.is_empty()
    }

    /// True if `position` is handed out.
    #[must_use]
    pub fn contains_position(&self, position: Position) -> bool {
        self.transfers.iter().any(|t| t.position == position)
    }
}

/// Old ids worn by some body: every outfit and every non-zero background.
#[must_use]
pub fn consumed_components(items: &[Item]) -> HashSet<TokenId> {
    items.iter().flat_map(|item| item.components()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tally::CatalogTally;

    fn plan(items: Vec<Item>) -> (RemapIndex, OwnershipPlan) {
        let group = ChainGroup::from_items(1, items);
        let remap = RemapIndex::build(group.items(), &CatalogTally::from_items(group.items()));
        let plan = OwnershipPlan::build(&group, &remap);
        (remap, plan)
    }

    fn owner(byte: u8) -> Address {
        Address::repeat_byte(byte)
    }

    #[test]
    fn test_worked_example_excludes_consumed() {
        let (_, plan) = plan(vec![
            Item::new(1, 10, 5, Category::Body)
                .with_worn(vec![11])
                .with_background(12)
                .with_owner(owner(1)),
            Item::new(1, 11, 7, Category::Outfit).with_owner(owner(1)),
            Item::new(1, 12, 7, Category::Background).with_owner(owner(1)),
        ]);

        assert_eq!(
            plan.transfers(),
            &[Transfer {
                position: 0,
                old_id: 10,
                owner: owner(1),
            }]
        );
        assert!(!plan.contains_position(1));
        assert!(!plan.contains_position(2));
    }

    #[test]
    fn test_zero_owner_is_skipped() {
        let (_, plan) = plan(vec![
            Item::new(1, 10, 5, Category::Body),
            Item::new(1, 11, 7, Category::Outfit).with_owner(owner(2)),
        ]);

        assert_eq!(plan.len(), 1);
        assert_eq!(plan.transfers()[0].old_id, 11);
        assert_eq!(plan.transfers()[0].position, 1);
    }

    #[test]
    fn test_category_order_with_explicit_positions() {
        // Codes disagree with category order: the outfit has the lowest
        // code and is issued first, yet bodies are walked first.
        let (remap, plan) = plan(vec![
            Item::new(1, 30, 9, Category::Background).with_owner(owner(3)),
            Item::new(1, 10, 5, Category::Body).with_owner(owner(1)),
            Item::new(1, 20, 2, Category::Outfit).with_owner(owner(2)),
        ]);

        let order: Vec<_> = plan.transfers().iter().map(|t| t.old_id).collect();
        assert_eq!(order, vec![10, 20, 30]);

        for transfer in plan.transfers() {
            assert_eq!(remap.position_of(transfer.old_id), Some(transfer.position));
        }
        let positions: Vec<_> = plan.transfers().iter().map(|t| t.position).collect();
        assert_eq!(positions, vec![1, 0, 2]);
    }

    #[test]
    fn test_consumed_components() {
        let items = vec![
            Item::new(1, 10, 5, Category::Body).with_worn(vec![11, 13]).with_background(12),
            Item::new(1, 20, 5, Category::Body),
            Item::new(1, 11, 7, Category::Outfit),
        ];
        let consumed = consumed_components(&items);
        assert_eq!(consumed, HashSet::from([11, 12, 13]));
    }
}
