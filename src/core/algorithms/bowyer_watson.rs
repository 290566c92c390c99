//! Incremental Bowyer-Watson algorithm for Delaunay triangulation.
//!
//! Each insertion step carves the *cavity* of the new vertex out of the current
//! Delaunay complex and re-triangulates it as a star around that vertex.
//!
//! # Algorithm Overview
//!
//! For a vertex `v` already appended to the vertex store:
//!
//! 1. Scan every live simplex and mark it bad if `v` lies strictly inside its
//!    cached circumsphere.
//! 2. Collect the `D + 1` facets of every bad simplex into one flat list.
//! 3. Sort the list and keep facets that occur exactly once: these bound the
//!    cavity. Facets occurring twice are interior; three or more is an error.
//! 4. Join every boundary facet with `v` to build the new simplices.
//! 5. Remove the bad simplices and insert the new ones.
//!
//! New simplices are built before anything is removed, so a failing step
//! leaves the complex untouched.
//!
//! # References
//!
//! - **Bowyer, A.** "Computing Dirichlet tessellations." *The Computer Journal* 24.2 (1981): 162-166.
//!   DOI: [10.1093/comjnl/24.2.162](https://doi.org/10.1093/comjnl/24.2.162)
//!
//! - **Watson, D.F.** "Computing the n-dimensional Delaunay tessellation with application to
//!   Voronoi polytopes." *The Computer Journal* 24.2 (1981): 167-172.
//!   DOI: [10.1093/comjnl/24.2.167](https://doi.org/10.1093/comjnl/24.2.167)

use thiserror::Error;

use crate::core::collections::{BadSimplexBuffer, SimplexKey, StorageMap, VertexIndex};
use crate::core::facet::{FacetError, FacetKey, boundary_facets};
use crate::core::simplex::Simplex;
use crate::core::traits::insertion_algorithm::{InsertionAlgorithm, InsertionInfo};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::GeometryError;

/// Ways a cavity can fail to be a topological ball.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CavityError {
    /// No simplex contains the vertex in its circumsphere.
    #[error("No simplex circumsphere contains the vertex")]
    Empty,

    /// The bad simplices have no boundary facets.
    #[error("Cavity of {removed} simplices has no boundary facets")]
    NoBoundaryFacets {
        /// Number of bad simplices.
        removed: usize,
    },

    /// A cavity facet was shared by more than two bad simplices.
    #[error(transparent)]
    Facet(#[from] FacetError),
}

/// Error during incremental insertion.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InsertionError {
    /// The vertex index is not in the vertex store.
    #[error("Vertex {vertex} is not in the vertex store ({vertex_count} vertices)")]
    UnknownVertex {
        /// Requested index.
        vertex: VertexIndex,
        /// Size of the vertex store.
        vertex_count: usize,
    },

    /// The cavity of the vertex is malformed.
    #[error("Invalid cavity while inserting vertex {vertex}: {source}")]
    InvalidCavity {
        /// Vertex being inserted.
        vertex: VertexIndex,
        /// What was wrong with the cavity.
        source: CavityError,
    },

    /// A new simplex could not be built.
    #[error("Degenerate simplex {vertices:?}: {source}")]
    DegenerateSimplex {
        /// Vertex indices of the simplex.
        vertices: Vec<VertexIndex>,
        /// Underlying geometry error.
        source: GeometryError,
    },
}

/// Cumulative counters for an inserter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionStatistics {
    /// Vertices inserted successfully.
    pub vertices_inserted: usize,
    /// Simplices created.
    pub simplices_created: usize,
    /// Simplices removed.
    pub simplices_removed: usize,
    /// Largest number of simplices removed by one insertion.
    pub largest_cavity: usize,
}

impl InsertionStatistics {
    /// Fresh, zeroed statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices_inserted: 0,
            simplices_created: 0,
            simplices_removed: 0,
            largest_cavity: 0,
        }
    }

    /// Records one successful insertion.
    pub fn record(&mut self, info: &InsertionInfo) {
        self.vertices_inserted += 1;
        self.simplices_created += info.simplices_created;
        self.simplices_removed += info.simplices_removed;
        self.largest_cavity = self.largest_cavity.max(info.simplices_removed);
    }

    /// Net change in the number of live simplices.
    #[must_use]
    pub const fn net_simplices(&self) -> isize {
        self.simplices_created.cast_signed() - self.simplices_removed.cast_signed()
    }
}

/// Cavity-based Bowyer-Watson inserter with reusable scratch buffers.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::algorithms::bounding_volume::BoundingVolume;
/// use bowyer_watson::core::algorithms::bowyer_watson::IncrementalBowyerWatson;
/// use bowyer_watson::core::collections::StorageMap;
/// use bowyer_watson::core::traits::insertion_algorithm::InsertionAlgorithm;
/// use bowyer_watson::geometry::point::Point;
///
/// let input = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0]), Point::new([0.0, 1.0])];
/// let (mut vertices, seeds) = BoundingVolume::around(&input, 1000.0).unwrap().into_parts();
/// let mut simplices = StorageMap::with_key();
/// for seed in seeds {
///     simplices.insert(seed);
/// }
///
/// let mut inserter = IncrementalBowyerWatson::new();
/// for p in input {
///     vertices.push(p);
///     inserter.insert_vertex(&vertices, &mut simplices, vertices.len() - 1).unwrap();
/// }
/// assert_eq!(inserter.statistics().vertices_inserted, 3);
/// assert_eq!(simplices.len(), 2 + 2 * 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct IncrementalBowyerWatson {
    stats: InsertionStatistics,
    bad_simplices: BadSimplexBuffer,
    facets: Vec<FacetKey>,
}

impl IncrementalBowyerWatson {
    /// Creates an inserter with empty statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative statistics since construction or the last reset.
    #[must_use]
    pub const fn statistics(&self) -> &InsertionStatistics {
        &self.stats
    }

    /// Clears statistics and scratch buffers.
    pub fn reset(&mut self) {
        self.stats = InsertionStatistics::new();
        self.bad_simplices.clear();
        self.facets.clear();
    }

    /// Marks every simplex whose circumsphere strictly contains `point`.
    fn find_bad_simplices<T, const D: usize>(
        &mut self,
        simplices: &mut StorageMap<SimplexKey, Simplex<T, D>>,
        point: &Point<T, D>,
    ) where
        T: CoordinateScalar,
    {
        self.bad_simplices.clear();
        for (key, simplex) in simplices.iter_mut() {
            if simplex.circumsphere_contains(point) {
                simplex.mark_bad();
                self.bad_simplices.push(key);
            }
        }
    }

    fn clear_marks<T, const D: usize>(&self, simplices: &mut StorageMap<SimplexKey, Simplex<T, D>>)
    where
        T: CoordinateScalar,
    {
        for key in &self.bad_simplices {
            if let Some(simplex) = simplices.get_mut(*key) {
                simplex.clear_bad();
            }
        }
    }

    /// Boundary facets of the marked cavity.
    fn cavity_boundary<T, const D: usize>(
        &mut self,
        simplices: &StorageMap<SimplexKey, Simplex<T, D>>,
    ) -> Result<Vec<FacetKey>, CavityError>
    where
        T: CoordinateScalar,
    {
        if self.bad_simplices.is_empty() {
            return Err(CavityError::Empty);
        }

        self.facets.clear();
        for key in &self.bad_simplices {
            if let Some(simplex) = simplices.get(*key) {
                self.facets.extend(simplex.facets());
            }
        }

        let boundary = boundary_facets(&mut self.facets)?;
        if boundary.is_empty() {
            return Err(CavityError::NoBoundaryFacets {
                removed: self.bad_simplices.len(),
            });
        }
        Ok(boundary)
    }

    fn build_star<T, const D: usize>(
        vertices: &[Point<T, D>],
        boundary: &[FacetKey],
        vertex: VertexIndex,
    ) -> Result<Vec<Simplex<T, D>>, InsertionError>
    where
        T: CoordinateScalar,
    {
        boundary
            .iter()
            .map(|facet| {
                let joined = facet.join(vertex);
                Simplex::new(vertices, &joined).map_err(|source| InsertionError::DegenerateSimplex {
                    vertices: joined.to_vec(),
                    source,
                })
            })
            .collect()
    }
}

impl<T, const D: usize> InsertionAlgorithm<T, D> for IncrementalBowyerWatson
where
    T: CoordinateScalar,
{
    fn insert_vertex(
        &mut self,
        vertices: &[Point<T, D>],
        simplices: &mut StorageMap<SimplexKey, Simplex<T, D>>,
        vertex: VertexIndex,
    ) -> Result<InsertionInfo, InsertionError> {
        let point = vertices.get(vertex).ok_or(InsertionError::UnknownVertex {
            vertex,
            vertex_count: vertices.len(),
        })?;

        self.find_bad_simplices(simplices, point);

        let boundary = match self.cavity_boundary(simplices) {
            Ok(boundary) => boundary,
            Err(source) => {
                self.clear_marks(simplices);
                tracing::warn!(vertex, error = %source, "cavity extraction failed");
                return Err(InsertionError::InvalidCavity { vertex, source });
            }
        };

        let star = match Self::build_star(vertices, &boundary, vertex) {
            Ok(star) => star,
            Err(err) => {
                self.clear_marks(simplices);
                tracing::warn!(vertex, error = %err, "cavity re-triangulation failed");
                return Err(err);
            }
        };

        let removed = self.bad_simplices.len();
        simplices.retain(|_, simplex| !simplex.is_bad());
        let created = star.len();
        for simplex in star {
            simplices.insert(simplex);
        }

        let info = InsertionInfo {
            vertex,
            simplices_removed: removed,
            simplices_created: created,
        };
        self.stats.record(&info);
        tracing::trace!(vertex, removed, created, "inserted vertex");
        Ok(info)
    }

    fn statistics(&self) -> &InsertionStatistics {
        Self::statistics(self)
    }

    fn reset(&mut self) {
        Self::reset(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::algorithms::bounding_volume::BoundingVolume;

    type Complex<const D: usize> = (Vec<Point<f64, D>>, StorageMap<SimplexKey, Simplex<f64, D>>);

    fn seeded<const D: usize>(input: &[Point<f64, D>]) -> Complex<D> {
        let (vertices, seeds) = BoundingVolume::around(input, 1000.0).unwrap().into_parts();
        let mut simplices = StorageMap::with_key();
        for seed in seeds {
            simplices.insert(seed);
        }
        (vertices, simplices)
    }

    fn sorted_simplices<const D: usize>(
        simplices: &StorageMap<SimplexKey, Simplex<f64, D>>,
    ) -> Vec<Vec<usize>> {
        let mut all: Vec<Vec<usize>> = simplices
            .values()
            .map(|s| s.sorted_vertices().to_vec())
            .collect();
        all.sort();
        all
    }

    #[test]
    fn first_vertex_splits_containing_seeds() {
        let input = [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
        ];
        let (mut vertices, mut simplices) = seeded(&input);
        let mut inserter = IncrementalBowyerWatson::new();
        vertices.push(input[0]);
        let info = inserter.insert_vertex(&vertices, &mut simplices, 4).unwrap();
        assert_eq!(info.vertex, 4);
        assert_eq!(info.simplices_created, info.simplices_removed + 2);
        assert!(simplices.values().all(|s| !s.is_bad()));
        assert!(simplices.values().all(|s| s.contains_vertex(4)));
    }

    #[test]
    fn statistics_accumulate_and_reset() {
        let input = [
            Point::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 0.0, 0.0]),
            Point::new([0.0, 1.0, 0.0]),
            Point::new([0.0, 0.0, 1.0]),
        ];
        let (mut vertices, mut simplices) = seeded(&input);
        let mut inserter = IncrementalBowyerWatson::new();
        for p in input {
            vertices.push(p);
            inserter
                .insert_vertex(&vertices, &mut simplices, vertices.len() - 1)
                .unwrap();
        }
        let stats = *inserter.statistics();
        assert_eq!(stats.vertices_inserted, 4);
        assert!(stats.largest_cavity >= 1);
        assert_eq!(
            stats.net_simplices(),
            isize::try_from(simplices.len()).unwrap() - 5
        );
        inserter.reset();
        assert_eq!(*inserter.statistics(), InsertionStatistics::new());
    }

    #[test]
    fn unknown_vertex_is_rejected() {
        let input = [Point::new([0.0, 0.0]), Point::new([1.0, 1.0])];
        let (vertices, mut simplices) = seeded(&input);
        let mut inserter = IncrementalBowyerWatson::new();
        assert_eq!(
            inserter.insert_vertex(&vertices, &mut simplices, 10),
            Err(InsertionError::UnknownVertex {
                vertex: 10,
                vertex_count: 4,
            })
        );
    }

    #[test]
    fn vertex_outside_every_circumsphere_leaves_complex_untouched() {
        let input = [Point::new([0.0, 0.0]), Point::new([1.0, 1.0])];
        let (mut vertices, mut simplices) = seeded(&input);
        let before = sorted_simplices(&simplices);
        vertices.push(Point::new([1.0e9, 1.0e9]));
        let mut inserter = IncrementalBowyerWatson::new();
        let err = inserter.insert_vertex(&vertices, &mut simplices, 4).unwrap_err();
        assert_eq!(
            err,
            InsertionError::InvalidCavity {
                vertex: 4,
                source: CavityError::Empty,
            }
        );
        assert_eq!(sorted_simplices(&simplices), before);
    }

    fn hand_built(
        vertices: &[Point<f64, 2>],
        triangles: &[[usize; 3]],
    ) -> StorageMap<SimplexKey, Simplex<f64, 2>> {
        let mut simplices = StorageMap::with_key();
        for t in triangles {
            simplices.insert(Simplex::new(vertices, t).unwrap());
        }
        simplices
    }

    #[test]
    fn vertex_on_cavity_boundary_fails_without_mutating() {
        // Vertex 3 lies on the edge (0, 1), so joining that edge with it is collinear.
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([4.0, 0.0]),
            Point::new([0.0, 4.0]),
            Point::new([2.0, 0.0]),
        ];
        let mut simplices = hand_built(&vertices, &[[0, 1, 2]]);
        let before = sorted_simplices(&simplices);
        let mut inserter = IncrementalBowyerWatson::new();
        let err = inserter.insert_vertex(&vertices, &mut simplices, 3).unwrap_err();
        assert!(matches!(
            err,
            InsertionError::DegenerateSimplex {
                ref vertices,
                source: GeometryError::SingularSystem { .. },
            } if vertices == &vec![0, 1, 3]
        ));
        assert_eq!(sorted_simplices(&simplices), before);
        assert!(simplices.values().all(|s| !s.is_bad()));
        assert_eq!(inserter.statistics().vertices_inserted, 0);
    }

    #[test]
    fn non_manifold_cavity_is_rejected() {
        // Three triangles share the edge (0, 1) and all contain vertex 5.
        let vertices = vec![
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.5, 1.0]),
            Point::new([0.5, -1.0]),
            Point::new([0.5, 2.0]),
            Point::new([0.5, 0.1]),
        ];
        let mut simplices = hand_built(&vertices, &[[0, 1, 2], [0, 1, 3], [0, 1, 4]]);
        let mut inserter = IncrementalBowyerWatson::new();
        let err = inserter.insert_vertex(&vertices, &mut simplices, 5).unwrap_err();
        assert_eq!(
            err,
            InsertionError::InvalidCavity {
                vertex: 5,
                source: CavityError::Facet(FacetError::Overshared {
                    facet: FacetKey::new(&[0, 1]),
                    occurrences: 3,
                }),
            }
        );
        assert_eq!(simplices.len(), 3);
        assert!(simplices.values().all(|s| !s.is_bad()));
    }
}
