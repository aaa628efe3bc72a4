//! # Composition Resolver
//!
//! Rewrites every dressed body's background and outfits from old token ids
//! to positions in the issued sequence.
//!
//! A reference to a token that is not on the body's chain cannot be
//! resolved. It falls back to the raw old id, is logged, and is recorded so
//! the caller can report it or refuse the plan.

use std::fmt;

use serde::Serialize;
use wardrobe_shared::{ChainId, TokenId};

use crate::model::Item;
use crate::partition::ChainGroup;
use crate::remap::{Position, RemapIndex};

/// A component reference after resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Reference {
    /// Resolved to an issued position.
    Issued(Position),
    /// Not found on the chain; the raw old id is emitted verbatim.
    Unresolved(TokenId),
    /// No component (a body without background).
    Empty,
}

impl Reference {
    /// The issued position, if resolved.
    #[inline]
    #[must_use]
    pub const fn position(self) -> Option<Position> {
        match self {
            Self::Issued(position) => Some(position),
            Self::Unresolved(_) | Self::Empty => None,
        }
    }
}

/// How a body refers to a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceRole {
    /// The body's background.
    Background,
    /// One of the body's worn outfits.
    Worn,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Background => f.write_str("background"),
            Self::Worn => f.write_str("worn component"),
        }
    }
}

/// A reference that fell back to its raw old id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct UnresolvedReference {
    /// Chain of the body.
    pub chain_id: ChainId,
    /// Old id of the body holding the reference.
    pub body: TokenId,
    /// Background or worn.
    pub role: ReferenceRole,
    /// The old id that was not found.
    pub old_id: TokenId,
}

/// A body with its components expressed in issued positions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedBody {
    /// Old id of the body.
    pub old_id: TokenId,
    /// Issued position of the body itself.
    pub position: Position,
    /// Resolved background, [`Reference::Empty`] when the body has none.
    pub background: Reference,
    /// Resolved outfits, in wear order.
    pub worn: Vec<Reference>,
}

/// Output of the resolver for one chain.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Composition {
    /// Dressed bodies in export order.
    pub bodies: Vec<ResolvedBody>,
    /// Every reference that fell back to its old id.
    pub unresolved: Vec<UnresolvedReference>,
}

struct Resolver<'a> {
    chain_id: ChainId,
    remap: &'a RemapIndex,
    unresolved: Vec<UnresolvedReference>,
}

impl Resolver<'_> {
    fn resolve(&mut self, body: &Item, role: ReferenceRole, old_id: TokenId) -> Reference {
        if let Some(position) = self.remap.position_of(old_id) {
            return Reference::Issued(position);
        }

        tracing::warn!(
            chain_id = self.chain_id,
            body = body.old_id,
            %role,
            old_id,
            "unresolved reference, emitting raw old id"
        );
        self.unresolved.push(UnresolvedReference {
            chain_id: self.chain_id,
            body: body.old_id,
            role,
            old_id,
        });
        Reference::Unresolved(old_id)
    }
}

/// Resolves every dressed body of a chain.
///
/// A body is dressed when it wears outfits or a background. Bodies wearing
/// nothing are left out; they only need a transfer.
#[must_use]
pub fn resolve_bodies(group: &ChainGroup, remap: &RemapIndex) -> Composition {
    let mut resolver = Resolver {
        chain_id: group.chain_id,
        remap,
        unresolved: Vec::new(),
    };

    let bodies = group
        .items()
        .iter()
        .zip(remap.placements())
        .filter(|(item, _)| item.is_dressed())
        .map(|(body, &position)| {
            let background = match body.background_old_id {
                0 => Reference::Empty,
                old_id => resolver.resolve(body, ReferenceRole::Background, old_id),
            };
            let worn = body
                .worn_old_ids
                .iter()
                .map(|&old_id| resolver.resolve(body, ReferenceRole::Worn, old_id))
                .collect();
            ResolvedBody {
                old_id: body.old_id,
                position,
                background,
                worn,
            }
        })
        .collect();

    Composition {
        bodies,
        unresolved: resolver.unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;
    use crate::tally::CatalogTally;

    fn resolve(items: Vec<Item>) -> Composition {
        let group = ChainGroup::from_items(1, items);
        let remap = RemapIndex::build(group.items(), &CatalogTally::from_items(group.items()));
        resolve_bodies(&group, &remap)
    }

    #[test]
    fn test_worked_example() {
        let composition = resolve(vec![
            Item::new(1, 10, 5, Category::Body).with_worn(vec![11]).with_background(12),
            Item::new(1, 11, 7, Category::Outfit),
            Item::new(1, 12, 7, Category::Background),
        ]);

        assert_eq!(
            composition.bodies,
            vec![ResolvedBody {
                old_id: 10,
                position: 0,
                background: Reference::Issued(2),
                worn: vec![Reference::Issued(1)],
            }]
        );
        assert!(composition.unresolved.is_empty());
    }

    #[test]
    fn test_missing_background_is_empty() {
        let composition = resolve(vec![
            Item::new(1, 10, 5, Category::Body).with_worn(vec![11]),
            Item::new(1, 11, 7, Category::Outfit),
        ]);

        assert_eq!(composition.bodies[0].background, Reference::Empty);
        assert_eq!(composition.bodies[0].background.position(), None);
    }

    #[test]
    fn test_unresolved_worn_falls_back_to_old_id() {
        let composition = resolve(vec![
            Item::new(1, 10, 5, Category::Body).with_worn(vec![11, 4_000_000_077]),
            Item::new(1, 11, 7, Category::Outfit),
        ]);

        let body = &composition.bodies[0];
        assert_eq!(
            body.worn,
            vec![Reference::Issued(1), Reference::Unresolved(4_000_000_077)]
        );
        assert_eq!(
            composition.unresolved,
            vec![UnresolvedReference {
                chain_id: 1,
                body: 10,
                role: ReferenceRole::Worn,
                old_id: 4_000_000_077,
            }]
        );
    }

    #[test]
    fn test_background_only_body_is_dressed() {
        let composition = resolve(vec![
            Item::new(1, 10, 5, Category::Body).with_background(12),
            Item::new(1, 12, 7, Category::Background),
            Item::new(1, 20, 5, Category::Body),
        ]);

        assert_eq!(composition.bodies.len(), 1);
        assert_eq!(composition.bodies[0].background, Reference::Issued(2));
        assert!(composition.bodies[0].worn.is_empty());
    }
}
