//! # Item Model
//!
//! One record of the V4 export: a token, its tier, its role and its owner.

use alloy_primitives::Address;
use serde::Serialize;
use wardrobe_shared::{CatalogCode, ChainId, TokenId, BACKGROUND_CATEGORY, BODY_CATEGORY, NO_OWNER};

/// Role a token plays in the dressing scheme.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Can wear a background and outfits.
    Body,
    /// Worn behind a body.
    Background,
    /// Worn on a body.
    Outfit,
}

impl Category {
    /// Order in which the ownership planner visits categories.
    pub const TRANSFER_ORDER: [Self; 3] = [Self::Body, Self::Outfit, Self::Background];

    /// Maps an export category code to a role.
    ///
    /// Every code other than body and background is an outfit slot.
    #[inline]
    #[must_use]
    pub const fn from_code(code: u8) -> Self {
        match code {
            BODY_CATEGORY => Self::Body,
            BACKGROUND_CATEGORY => Self::Background,
            _ => Self::Outfit,
        }
    }
}

/// A token of the V4 export.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Item {
    /// V4 token id.
    pub old_id: TokenId,
    /// Tier the token is re-minted from.
    pub catalog_code: CatalogCode,
    /// Role in the dressing scheme.
    pub category: Category,
    /// Chain the token lives on.
    pub chain_id: ChainId,
    /// Current owner; the zero address means nobody receives it.
    pub owner: Address,
    /// Background worn by a body, `0` for none.
    pub background_old_id: TokenId,
    /// Outfits worn by a body, in wear order.
    pub worn_old_ids: Vec<TokenId>,
}

impl Item {
    /// Creates an item with no owner and no components.
    #[must_use]
    pub const fn new(
        chain_id: ChainId,
        old_id: TokenId,
        catalog_code: CatalogCode,
        category: Category,
    ) -> Self {
        Self {
            old_id,
            catalog_code,
            category,
            chain_id,
            owner: NO_OWNER,
            background_old_id: 0,
            worn_old_ids: Vec::new(),
        }
    }

    /// Sets the owner.
    #[must_use]
    pub const fn with_owner(mut self, owner: Address) -> Self {
        self.owner = owner;
        self
    }

    /// Sets the background worn by this body.
    #[must_use]
    pub const fn with_background(mut self, background_old_id: TokenId) -> Self {
        self.background_old_id = background_old_id;
        self
    }

    /// Sets the outfits worn by this body.
    #[must_use]
    pub fn with_worn(mut self, worn_old_ids: Vec<TokenId>) -> Self {
        self.worn_old_ids = worn_old_ids;
        self
    }

    /// True if someone should receive this token.
    #[inline]
    #[must_use]
    pub fn has_owner(&self) -> bool {
        self.owner != NO_OWNER
    }

    /// True if this is a body that wears anything.
    #[inline]
    #[must_use]
    pub fn is_dressed(&self) -> bool {
        self.category == Category::Body
            && (self.background_old_id != 0 || !self.worn_old_ids.is_empty())
    }

    /// Old ids this item consumes as components (background first).
    ///
    /// Empty for anything but a body.
    pub fn components(&self) -> impl Iterator<Item = TokenId> + '_ {
        let is_body = self.category == Category::Body;
        let background = (is_body && self.background_old_id != 0).then_some(self.background_old_id);
        let worn = if is_body { self.worn_old_ids.as_slice() } else { &[] };
        background.into_iter().chain(worn.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes() {
        assert_eq!(Category::from_code(0), Category::Body);
        assert_eq!(Category::from_code(1), Category::Background);
        assert_eq!(Category::from_code(2), Category::Outfit);
        assert_eq!(Category::from_code(17), Category::Outfit);
    }

    #[test]
    fn test_components_only_for_bodies() {
        let body = Item::new(1, 10, 5, Category::Body)
            .with_background(12)
            .with_worn(vec![11, 13]);
        assert_eq!(body.components().collect::<Vec<_>>(), vec![12, 11, 13]);
        assert!(body.is_dressed());

        // An outfit carrying stray references consumes nothing
        let outfit = Item::new(1, 11, 7, Category::Outfit).with_worn(vec![99]);
        assert_eq!(outfit.components().count(), 0);
        assert!(!outfit.is_dressed());
    }

    #[test]
    fn test_zero_background_is_not_a_component() {
        let body = Item::new(1, 10, 5, Category::Body).with_worn(vec![11]);
        assert_eq!(body.components().collect::<Vec<_>>(), vec![11]);

        let naked = Item::new(1, 20, 5, Category::Body);
        assert!(!naked.is_dressed());
        assert!(!naked.has_owner());
    }
}
