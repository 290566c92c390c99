//! Common trait for vertex insertion algorithms.
//!
//! The driver talks to its inserter through [`InsertionAlgorithm`], so the
//! cavity-based Bowyer-Watson step can be swapped for an instrumented or
//! alternative implementation without touching seeding or extraction.

use crate::core::algorithms::bowyer_watson::{InsertionError, InsertionStatistics};
use crate::core::collections::{SimplexKey, StorageMap, VertexIndex};
use crate::core::simplex::Simplex;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Information about a single vertex insertion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsertionInfo {
    /// Index of the inserted vertex in the vertex store.
    pub vertex: VertexIndex,
    /// Number of simplices removed (the cavity size).
    pub simplices_removed: usize,
    /// Number of new simplices created (the cavity boundary size).
    pub simplices_created: usize,
}

/// Trait for vertex insertion algorithms.
pub trait InsertionAlgorithm<T, const D: usize>
where
    T: CoordinateScalar,
{
    /// Inserts `vertex` (already present in `vertices`) into the live simplex set.
    ///
    /// On error the simplex set is left exactly as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertionError`] if the vertex index is unknown, the cavity is
    /// malformed, or a new simplex is degenerate.
    fn insert_vertex(
        &mut self,
        vertices: &[Point<T, D>],
        simplices: &mut StorageMap<SimplexKey, Simplex<T, D>>,
        vertex: VertexIndex,
    ) -> Result<InsertionInfo, InsertionError>;

    /// Cumulative statistics since construction or the last [`reset`](Self::reset).
    fn statistics(&self) -> &InsertionStatistics;

    /// Clears statistics and scratch buffers for reuse.
    fn reset(&mut self);
}
