//! Data and operations on d-dimensional [simplices](https://en.wikipedia.org/wiki/Simplex).
//!
//! A [`Simplex`] stores the indices of its `D + 1` vertices in the vertex store
//! plus its circumsphere, computed once at construction. Simplices never hold a
//! reference to the store; geometry is computed by [`Simplex::new`] from
//! `(store, indices)`.
//!
//! # Examples
//!
//! ```rust
//! use bowyer_watson::core::simplex::Simplex;
//! use bowyer_watson::geometry::point::Point;
//!
//! let store = vec![
//!     Point::new([0.0, 0.0]),
//!     Point::new([4.0, 0.0]),
//!     Point::new([0.0, 4.0]),
//!     Point::new([1.0, 1.0]),
//! ];
//! let triangle = Simplex::new(&store, &[0, 1, 2]).unwrap();
//! assert!(triangle.circumsphere_contains(&store[3]));
//! assert!(triangle.is_bounding(1));
//! assert!(!triangle.is_bounding(0));
//! ```

use std::fmt;

use crate::core::collections::{SimplexVertexBuffer, VertexIndex};
use crate::core::facet::{FacetKey, simplex_facets};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::{Circumsphere, GeometryError, circumsphere};

/// A triangle (`D = 2`) or tetrahedron (`D = 3`) over the vertex store.
#[derive(Clone, Debug, PartialEq)]
pub struct Simplex<T, const D: usize>
where
    T: CoordinateScalar,
{
    vertices: SimplexVertexBuffer,
    circumsphere: Circumsphere<T, D>,
    bad: bool,
}

impl<T, const D: usize> Simplex<T, D>
where
    T: CoordinateScalar,
{
    /// Builds a simplex from vertex indices into `store`, computing its circumsphere.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::InvalidSimplex`] if `vertices` does not hold `D + 1`
    ///   indices or one of them is outside `store`.
    /// - [`GeometryError::SingularSystem`] (or another circumsphere error) if the
    ///   vertices are affinely dependent.
    pub fn new(store: &[Point<T, D>], vertices: &[VertexIndex]) -> Result<Self, GeometryError> {
        let points: Vec<Point<T, D>> = vertices
            .iter()
            .filter_map(|&v| store.get(v).copied())
            .collect();
        if vertices.len() != D + 1 || points.len() != vertices.len() {
            return Err(GeometryError::InvalidSimplex {
                actual: points.len(),
                expected: D + 1,
                dimension: D,
            });
        }
        let circumsphere = circumsphere(&points)?;
        Ok(Self {
            vertices: vertices.iter().copied().collect(),
            circumsphere,
            bad: false,
        })
    }

    /// Vertex indices in construction order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.vertices
    }

    /// The cached circumsphere.
    #[inline]
    #[must_use]
    pub const fn circumsphere(&self) -> &Circumsphere<T, D> {
        &self.circumsphere
    }

    /// Strict in-circumsphere test against the cached sphere.
    #[inline]
    #[must_use]
    pub fn circumsphere_contains(&self, point: &Point<T, D>) -> bool {
        self.circumsphere.contains(point)
    }

    /// `true` if any vertex is a sentinel (index below `sentinel_count`).
    #[must_use]
    pub fn is_bounding(&self, sentinel_count: usize) -> bool {
        self.vertices.iter().any(|&v| v < sentinel_count)
    }

    /// `true` if `vertex` is one of this simplex's vertices.
    #[must_use]
    pub fn contains_vertex(&self, vertex: VertexIndex) -> bool {
        self.vertices.contains(&vertex)
    }

    /// The `D + 1` facets; facet `i` omits vertex `i`.
    pub fn facets(&self) -> impl Iterator<Item = FacetKey> + '_ {
        simplex_facets(&self.vertices)
    }

    /// Vertex indices sorted ascending; equal for simplices over the same vertex set.
    #[must_use]
    pub fn sorted_vertices(&self) -> SimplexVertexBuffer {
        let mut sorted = self.vertices.clone();
        sorted.sort_unstable();
        sorted
    }

    /// Flags the simplex for removal in the current insertion step.
    #[inline]
    pub const fn mark_bad(&mut self) {
        self.bad = true;
    }

    /// Clears the removal flag.
    #[inline]
    pub const fn clear_bad(&mut self) {
        self.bad = false;
    }

    /// `true` if the simplex is flagged for removal.
    #[inline]
    #[must_use]
    pub const fn is_bad(&self) -> bool {
        self.bad
    }
}

impl<T, const D: usize> fmt::Display for Simplex<T, D>
where
    T: CoordinateScalar,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Simplex{:?}", self.vertices.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn store_3d() -> Vec<Point<f64, 3>> {
        vec![
            Point::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 0.0, 0.0]),
            Point::new([0.0, 1.0, 0.0]),
            Point::new([0.0, 0.0, 1.0]),
            Point::new([1.0, 1.0, 0.0]),
        ]
    }

    #[test]
    fn tetrahedron_caches_circumsphere() {
        let store = store_3d();
        let tet = Simplex::new(&store, &[0, 1, 2, 3]).unwrap();
        assert_eq!(tet.vertices(), &[0, 1, 2, 3]);
        assert_relative_eq!(tet.circumsphere().radius_squared(), 0.75, epsilon = 1e-12);
        // (1, 1, 0) lies exactly on the sphere centered at (0.5, 0.5, 0.5).
        assert!(!tet.circumsphere_contains(&store[4]));
        assert!(tet.circumsphere_contains(&Point::new([0.4, 0.4, 0.4])));
    }

    #[test]
    fn facets_omit_one_vertex_each() {
        let store = store_3d();
        let tet = Simplex::new(&store, &[3, 0, 2, 1]).unwrap();
        let facets: Vec<FacetKey> = tet.facets().collect();
        assert_eq!(facets.len(), 4);
        assert_eq!(facets[0], FacetKey::new(&[0, 1, 2]));
        assert_eq!(tet.sorted_vertices().as_slice(), &[0, 1, 2, 3]);
    }

    #[test]
    fn bad_flag_round_trips() {
        let store = store_3d();
        let mut tet = Simplex::new(&store, &[0, 1, 2, 3]).unwrap();
        assert!(!tet.is_bad());
        tet.mark_bad();
        assert!(tet.is_bad());
        tet.clear_bad();
        assert!(!tet.is_bad());
    }

    #[test]
    fn sentinel_membership() {
        let store = store_3d();
        let tet = Simplex::new(&store, &[1, 2, 3, 4]).unwrap();
        assert!(!tet.is_bounding(1));
        assert!(tet.is_bounding(2));
        assert!(tet.contains_vertex(4));
        assert!(!tet.contains_vertex(0));
        assert_eq!(tet.to_string(), "Simplex[1, 2, 3, 4]");
    }

    #[test]
    fn invalid_construction_is_rejected() {
        let store = store_3d();
        assert!(matches!(
            Simplex::new(&store, &[0, 1, 2]),
            Err(GeometryError::InvalidSimplex { .. })
        ));
        assert!(matches!(
            Simplex::new(&store, &[0, 1, 2, 99]),
            Err(GeometryError::InvalidSimplex { .. })
        ));
        // Coplanar vertices.
        assert!(matches!(
            Simplex::new(&store, &[0, 1, 2, 4]),
            Err(GeometryError::SingularSystem { .. })
        ));
    }
}
