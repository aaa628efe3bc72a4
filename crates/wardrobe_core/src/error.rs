//! # Planner Error Types
//!
//! All errors that can occur while planning a migration.

use thiserror::Error;
use wardrobe_shared::{ChainId, TokenId};

use crate::compose::ReferenceRole;

/// Errors that can occur in the planning pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A body references a component that does not exist on its chain.
    ///
    /// Only raised under [`ReferencePolicy::Strict`](crate::ReferencePolicy::Strict);
    /// the default policy falls back to the raw identifier.
    #[error("chain {chain_id}: body {body} references unknown {role} {reference}")]
    UnresolvedReference {
        /// Chain the body lives on.
        chain_id: ChainId,
        /// Old id of the body.
        body: TokenId,
        /// How the body references the missing token.
        role: ReferenceRole,
        /// The unresolved old id.
        reference: TokenId,
    },
}

/// Result type for planning operations.
pub type CoreResult<T> = Result<T, CoreError>;
