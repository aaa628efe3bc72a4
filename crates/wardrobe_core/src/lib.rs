//! # WARDROBE Core
//!
//! Pure planning logic for the V4 -> V5 dressed-NFT migration.
//!
//! ## Design Principles
//!
//! 1. **Chains are independent** - no state crosses a chain boundary
//! 2. **Explicit positions** - every item carries its issued position from the
//!    remapper to every later stage
//! 3. **Stable output** - export order inside a chain, ascending catalog codes
//!    for the issued sequence
//! 4. **Degrade loudly** - unresolved component references fall back to the
//!    raw old id, are logged, and are reported
//!
//! ## Example
//!
//! ```rust,ignore
//! use wardrobe_core::{Item, Category, MigrationPlan, ReferencePolicy};
//! use wardrobe_shared::SUPPORTED_CHAINS;
//!
//! let items = vec![
//!     Item::new(1, 10, 5, Category::Body).with_worn(vec![11]).with_background(12),
//!     Item::new(1, 11, 7, Category::Outfit),
//!     Item::new(1, 12, 7, Category::Background),
//! ];
//! let plan = MigrationPlan::build(items, &SUPPORTED_CHAINS, ReferencePolicy::Fallback)?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod compose;
pub mod error;
pub mod model;
pub mod ownership;
pub mod partition;
pub mod plan;
pub mod remap;
pub mod tally;

pub use compose::{resolve_bodies, Composition, Reference, ReferenceRole, ResolvedBody, UnresolvedReference};
pub use error::{CoreError, CoreResult};
pub use model::{Category, Item};
pub use ownership::{consumed_components, OwnershipPlan, Transfer};
pub use partition::{partition, ChainGroup};
pub use plan::{ChainPlan, MigrationPlan, ReferencePolicy};
pub use remap::{Position, RemapIndex};
pub use tally::CatalogTally;
