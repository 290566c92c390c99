use rustc_hash::{FxHashMap, FxHashSet};
use slotmap::SlotMap;
use smallvec::SmallVec;

/// Index of a vertex in the vertex store.
///
/// Indices `0..2^D` are the sentinel corners; input points follow in insertion
/// order.
pub type VertexIndex = usize;

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage for the live simplex set.
///
/// Removal during cavity carving leaves keys of surviving simplices valid.
pub type StorageMap<K, V> = SlotMap<K, V>;

slotmap::new_key_type! {
    /// Key type for accessing simplices in the live simplex set.
    pub struct SimplexKey;
}

// =============================================================================
// CORE OPTIMIZED TYPES
// =============================================================================

/// Fast hash map for integer-like keys.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::collections::FastHashMap;
///
/// let mut counts: FastHashMap<usize, u32> = FastHashMap::default();
/// *counts.entry(7).or_insert(0) += 1;
/// assert_eq!(counts[&7], 1);
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Fast hash set for integer-like keys.
pub type FastHashSet<T> = FxHashSet<T>;

/// Stack-first vector that spills to the heap beyond `N` elements.
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

// =============================================================================
// SIZE CONSTANTS
// =============================================================================

/// Vertices in the largest supported simplex (a tetrahedron).
pub const MAX_SIMPLEX_VERTICES: usize = 4;

/// Vertices in the largest supported facet (a triangle).
pub const MAX_FACET_VERTICES: usize = 3;
