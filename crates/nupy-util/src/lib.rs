//! nupy-util - Core Utilities and Foundation Types
//!
//! Foundation types shared across the nuPy interpreter crates:
//!
//! - Diagnostics: the closed set of user-visible messages ([`Diag`]),
//!   their severity ([`Level`]), and the [`Handler`] that records and
//!   prints them.
//! - Typed indices: [`Idx`], [`IndexVec`], and the [`define_idx!`]
//!   macro, used by the statement graph to keep node ids distinct from
//!   other integer spaces.
//! - Hash maps: `FxHashMap`/`FxHashSet` re-exports for identifier
//!   indexing.

pub mod diagnostic;
pub mod index_vec;

pub use diagnostic::{Diag, Handler, Level};
pub use index_vec::{Idx, IndexVec};

// Re-export commonly used map types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;
