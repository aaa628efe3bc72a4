//! # Chain & Migration Plans
//!
//! Runs the pipeline stages for each chain and bundles their outputs:
//!
//! ```text
//! items ─▶ partition ─▶ tally ─▶ remap ─▶ compose ─▶ ownership
//!                                  │                      ▲
//!                                  └── positions ─────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use wardrobe_shared::{chain_info, ChainId, ChainInfo};

use crate::compose::{resolve_bodies, ResolvedBody, UnresolvedReference};
use crate::error::{CoreError, CoreResult};
use crate::model::Item;
use crate::ownership::OwnershipPlan;
use crate::partition::{partition, ChainGroup};
use crate::remap::RemapIndex;
use crate::tally::CatalogTally;

/// What to do with a component reference that is not on its body's chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferencePolicy {
    /// Emit the raw old id and carry on (logged and reported).
    #[default]
    Fallback,
    /// Refuse to plan the chain.
    Strict,
}

/// Everything the emitter needs for one chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainPlan {
    /// The chain.
    pub chain_id: ChainId,
    /// Number of export items on the chain.
    pub item_count: usize,
    /// Units per catalog code.
    pub tally: CatalogTally,
    /// Issued sequence layout and per-item positions.
    pub remap: RemapIndex,
    /// Dressed bodies with resolved components.
    pub bodies: Vec<ResolvedBody>,
    /// Hand-outs from the staging holder.
    pub transfers: OwnershipPlan,
    /// References that fell back to their old id.
    pub unresolved: Vec<UnresolvedReference>,
}

impl ChainPlan {
    /// Plans one chain.
    ///
    /// # Errors
    ///
    /// Under [`ReferencePolicy::Strict`], returns
    /// [`CoreError::UnresolvedReference`] for the first reference that is not
    /// on the chain.
    pub fn build(group: &ChainGroup, policy: ReferencePolicy) -> CoreResult<Self> {
        let tally = CatalogTally::from_items(group.items());
        let remap = RemapIndex::build(group.items(), &tally);
        tracing::debug!(
            chain_id = group.chain_id,
            codes = tally.len(),
            issued = remap.len(),
            "laid out issued sequence"
        );

        let composition = resolve_bodies(group, &remap);
        if policy == ReferencePolicy::Strict {
            if let Some(first) = composition.unresolved.first() {
                return Err(CoreError::UnresolvedReference {
                    chain_id: first.chain_id,
                    body: first.body,
                    role: first.role,
                    reference: first.old_id,
                });
            }
        }

        let transfers = OwnershipPlan::build(group, &remap);
        tracing::info!(
            chain_id = group.chain_id,
            items = group.len(),
            dressed = composition.bodies.len(),
            transfers = transfers.len(),
            unresolved = composition.unresolved.len(),
            "planned chain"
        );

        Ok(Self {
            chain_id: group.chain_id,
            item_count: group.len(),
            tally,
            remap,
            bodies: composition.bodies,
            transfers,
            unresolved: composition.unresolved,
        })
    }

    /// True if the chain has nothing to migrate.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Plans for every chain of a run, keyed by chain id.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MigrationPlan {
    chains: BTreeMap<ChainId, ChainPlan>,
}

impl MigrationPlan {
    /// Partitions `items` and plans every chain.
    ///
    /// Every chain of `table` gets a plan, possibly empty.
    ///
    /// # Errors
    ///
    /// Propagates the first [`CoreError`] of any chain.
    pub fn build<I>(items: I, table: &[ChainInfo], policy: ReferencePolicy) -> CoreResult<Self>
    where
        I: IntoIterator<Item = Item>,
    {
        let chains = partition(items, table)
            .values()
            .map(|group| ChainPlan::build(group, policy).map(|plan| (group.chain_id, plan)))
            .collect::<CoreResult<_>>()?;
        Ok(Self { chains })
    }

    /// The plan of one chain.
    #[must_use]
    pub fn chain(&self, chain_id: ChainId) -> Option<&ChainPlan> {
        self.chains.get(&chain_id)
    }

    /// Plans in ascending chain id order.
    pub fn iter(&self) -> impl Iterator<Item = &ChainPlan> + '_ {
        self.chains.values()
    }

    /// Chains that carry items but are not in the fixed chain table.
    #[must_use]
    pub fn unsupported_chains(&self) -> Vec<ChainId> {
        self.chains
            .values()
            .filter(|plan| !plan.is_empty() && chain_info(plan.chain_id).is_none())
            .map(|plan| plan.chain_id)
            .collect()
    }

    /// Total items across all chains.
    #[must_use]
    pub fn total_items(&self) -> usize {
        self.chains.values().map(|plan| plan.item_count).sum()
    }

    /// Total transfers across all chains.
    #[must_use]
    pub fn total_transfers(&self) -> usize {
        self.chains.values().map(|plan| plan.transfers.len()).sum()
    }

    /// Total unresolved references across all chains.
    #[must_use]
    pub fn total_unresolved(&self) -> usize {
        self.chains.values().map(|plan| plan.unresolved.len()).sum()
    }
}
