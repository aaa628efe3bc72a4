//! # Identifier Remapper
//!
//! Lays out the freshly issued sequence and places every old token in it.
//!
//! ## Layout
//!
//! ```text
//! tally {5: 1, 7: 2}
//!
//! position:  0    1    2
//! code:      5    7    7
//! old id:   10   11   12      (items of a code in export order)
//! ```
//!
//! Catalog codes occupy contiguous runs in ascending order. Inside a run,
//! positions go to the code's items first-seen-first-assigned.
//!
//! Each item's position is recorded once here and carried to every later
//! stage; nothing downstream recomputes it from a running counter.

use std::collections::{BTreeMap, HashMap};
use std::ops::Range;

use serde::Serialize;
use wardrobe_shared::{CatalogCode, TokenId};

use crate::model::Item;
use crate::tally::CatalogTally;

/// Index into the issued sequence (and into the minted id array).
pub type Position = usize;

/// Where every old token lands in the issued sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RemapIndex {
    /// First position of each code's run.
    starts: BTreeMap<CatalogCode, Position>,
    /// Catalog code of every issued position.
    issued: Vec<CatalogCode>,
    /// Position of each item, aligned with the slice the index was built from.
    placements: Vec<Position>,
    #[serde(skip)]
    by_old_id: HashMap<TokenId, Position>,
}

impl RemapIndex {
    /// Builds the index for one chain.
    ///
    /// `tally` must have been built from the same `items`.
    #[must_use]
    pub fn build(items: &[Item], tally: &CatalogTally) -> Self {
        let mut starts = BTreeMap::new();
        let mut issued = Vec::with_capacity(tally.total());
        for (code, quantity) in tally.iter() {
            starts.insert(code, issued.len());
            issued.extend(std::iter::repeat(code).take(quantity));
        }

        let mut cursors = starts.clone();
        let mut placements = Vec::with_capacity(items.len());
        let mut by_old_id = HashMap::with_capacity(items.len());
        for item in items {
            let cursor = cursors
                .entry(item.catalog_code)
                .or_insert_with(|| issued.len());
            let position = *cursor;
            *cursor += 1;

            placements.push(position);
            // Duplicate old ids keep their first placement
            by_old_id.entry(item.old_id).or_insert(position);
        }

        debug_assert_eq!(placements.len(), issued.len());

        Self {
            starts,
            issued,
            placements,
            by_old_id,
        }
    }

    /// Position of an old token, if it belongs to this chain.
    #[inline]
    #[must_use]
    pub fn position_of(&self, old_id: TokenId) -> Option<Position> {
        self.by_old_id.get(&old_id).copied()
    }

    /// Positions of the items the index was built from, in the same order.
    #[inline]
    #[must_use]
    pub fn placements(&self) -> &[Position] {
        &self.placements
    }

    /// Catalog code of every issued position; this is the mint list.
    #[inline]
    #[must_use]
    pub fn issued(&self) -> &[CatalogCode] {
        &self.issued
    }

    /// Positions allocated to `code`.
    #[must_use]
    pub fn run(&self, code: CatalogCode) -> Option<Range<Position>> {
        let start = *self.starts.get(&code)?;
        let end = self
            .issued
            .get(start..)
            .map_or(start, |rest| start + rest.iter().take_while(|&&c| c == code).count());
        Some(start..end)
    }

    /// Catalog code issued at `position`.
    #[inline]
    #[must_use]
    pub fn code_at(&self, position: Position) -> Option<CatalogCode> {
        self.issued.get(position).copied()
    }

    /// Length of the issued sequence.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.issued.len()
    }

    /// True if nothing is issued.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issued.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    fn build(items: &[Item]) -> RemapIndex {
        RemapIndex::build(items, &CatalogTally::from_items(items))
    }

    #[test]
    fn test_worked_example_layout() {
        let items = vec![
            Item::new(1, 10, 5, Category::Body),
            Item::new(1, 11, 7, Category::Outfit),
            Item::new(1, 12, 7, Category::Background),
        ];
        let remap = build(&items);

        assert_eq!(remap.issued(), &[5, 7, 7]);
        assert_eq!(remap.position_of(10), Some(0));
        assert_eq!(remap.position_of(11), Some(1));
        assert_eq!(remap.position_of(12), Some(2));
        assert_eq!(remap.run(5), Some(0..1));
        assert_eq!(remap.run(7), Some(1..3));
        assert_eq!(remap.run(6), None);
    }

    #[test]
    fn test_every_position_assigned_once() {
        let codes = [9u16, 2, 9, 4, 2, 9, 1];
        let items: Vec<_> = codes
            .iter()
            .enumerate()
            .map(|(i, &code)| Item::new(1, 100 + i as u64, code, Category::Outfit))
            .collect();
        let remap = build(&items);

        assert_eq!(remap.len(), items.len());
        let mut seen = remap.placements().to_vec();
        seen.sort_unstable();
        assert_eq!(seen, (0..items.len()).collect::<Vec<_>>());

        // Each item lands inside its own code's run
        for (item, &position) in items.iter().zip(remap.placements()) {
            assert!(remap.run(item.catalog_code).unwrap().contains(&position));
            assert_eq!(remap.code_at(position), Some(item.catalog_code));
        }
    }

    #[test]
    fn test_first_seen_first_assigned() {
        let items = vec![
            Item::new(1, 50, 3, Category::Outfit),
            Item::new(1, 40, 1, Category::Body),
            Item::new(1, 30, 3, Category::Outfit),
        ];
        let remap = build(&items);

        assert_eq!(remap.placements(), &[1, 0, 2]);
        assert_eq!(remap.position_of(50), Some(1));
        assert_eq!(remap.position_of(30), Some(2));
        assert_eq!(remap.position_of(99), None);
    }

    #[test]
    fn test_empty_chain() {
        let remap = build(&[]);
        assert!(remap.is_empty());
        assert!(remap.placements().is_empty());
    }
}
