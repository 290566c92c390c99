//! Collection type aliases and small buffers used throughout the triangulation.
//!
//! Hash maps use `rustc-hash` for speed (keys are small integers, never
//! attacker-controlled), simplices live in a `slotmap` keyed by [`SimplexKey`],
//! and per-simplex vertex/facet lists are stack-allocated `SmallVec`s.

mod aliases;
mod buffers;

pub use aliases::*;
pub use buffers::*;
