//! Facets of simplices and cavity boundary extraction.
//!
//! A facet of a `D`-simplex is the `(D-1)`-simplex obtained by dropping one
//! vertex: an edge in 2D, a triangle in 3D. Facets are identified by a
//! [`FacetKey`], the sorted tuple of their vertex indices, so the same facet seen
//! from two neighboring simplices produces equal keys.
//!
//! # Boundary extraction
//!
//! The facets of every simplex in a cavity are collected into one list, sorted,
//! and scanned in runs of equal keys. A run of length 1 is a boundary facet, a
//! run of length 2 is shared by two cavity simplices (interior), and anything
//! longer means the cavity is not a manifold and is reported as an error.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::core::collections::{FacetVertexBuffer, SimplexVertexBuffer, VertexIndex};

/// Errors raised while analyzing facets.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FacetError {
    /// A facet appeared in more than two simplices of the same collection.
    #[error("Facet {facet} is shared by {occurrences} simplices; at most 2 are allowed")]
    Overshared {
        /// The offending facet.
        facet: FacetKey,
        /// How many times it appeared.
        occurrences: usize,
    },
}

/// Order-independent identity of a facet: its vertex indices, sorted ascending.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::facet::FacetKey;
///
/// assert_eq!(FacetKey::new(&[5, 1, 3]), FacetKey::new(&[3, 5, 1]));
/// assert_eq!(FacetKey::new(&[5, 1, 3]).vertices(), &[1, 3, 5]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacetKey(FacetVertexBuffer);

impl FacetKey {
    /// Builds the canonical key for a facet with the given vertices.
    #[must_use]
    pub fn new(vertices: &[VertexIndex]) -> Self {
        let mut sorted: FacetVertexBuffer = vertices.iter().copied().collect();
        sorted.sort_unstable();
        Self(sorted)
    }

    /// The facet's vertex indices in ascending order.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[VertexIndex] {
        &self.0
    }

    /// Number of vertices in the facet.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` for the key of a vertex-less facet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `true` if `vertex` is one of the facet's vertices.
    #[must_use]
    pub fn contains(&self, vertex: VertexIndex) -> bool {
        self.0.binary_search(&vertex).is_ok()
    }

    /// `true` if any vertex index is below `sentinel_count`.
    #[must_use]
    pub fn touches_sentinel(&self, sentinel_count: usize) -> bool {
        self.0.first().is_some_and(|&v| v < sentinel_count)
    }

    /// The simplex formed by this facet and `apex`; the apex comes last.
    ///
    /// ```rust
    /// use bowyer_watson::core::facet::FacetKey;
    ///
    /// let simplex = FacetKey::new(&[4, 2]).join(9);
    /// assert_eq!(simplex.as_slice(), &[2, 4, 9]);
    /// ```
    #[must_use]
    pub fn join(&self, apex: VertexIndex) -> SimplexVertexBuffer {
        let mut vertices: SimplexVertexBuffer = self.0.iter().copied().collect();
        vertices.push(apex);
        vertices
    }
}

impl fmt::Display for FacetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, ")")
    }
}

/// The facets of a simplex: facet `i` omits vertex `i`.
///
/// ```rust
/// use bowyer_watson::core::facet::{simplex_facets, FacetKey};
///
/// let facets: Vec<FacetKey> = simplex_facets(&[0, 1, 2]).collect();
/// assert_eq!(facets, vec![
///     FacetKey::new(&[1, 2]),
///     FacetKey::new(&[0, 2]),
///     FacetKey::new(&[0, 1]),
/// ]);
/// ```
pub fn simplex_facets(vertices: &[VertexIndex]) -> impl Iterator<Item = FacetKey> + '_ {
    (0..vertices.len()).map(move |omit| {
        let remaining: FacetVertexBuffer = vertices
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != omit)
            .map(|(_, &v)| v)
            .collect();
        FacetKey::new(&remaining)
    })
}

/// Returns the facets that occur exactly once in `facets`, in ascending key order.
///
/// `facets` is sorted in place. Facets occurring twice are interior and dropped.
///
/// # Errors
///
/// Returns [`FacetError::Overshared`] for the first facet that occurs three or
/// more times.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::facet::{boundary_facets, simplex_facets, FacetKey};
///
/// // Two triangles sharing the edge (1, 2).
/// let mut facets: Vec<FacetKey> = simplex_facets(&[0, 1, 2])
///     .chain(simplex_facets(&[1, 2, 3]))
///     .collect();
/// let boundary = boundary_facets(&mut facets).unwrap();
/// assert_eq!(boundary.len(), 4);
/// assert!(!boundary.contains(&FacetKey::new(&[1, 2])));
/// ```
pub fn boundary_facets(facets: &mut [FacetKey]) -> Result<Vec<FacetKey>, FacetError> {
    facets.sort_unstable();

    let mut boundary = Vec::new();
    let mut start = 0;
    while start < facets.len() {
        let mut end = start + 1;
        while end < facets.len() && facets[end] == facets[start] {
            end += 1;
        }
        match end - start {
            1 => boundary.push(facets[start].clone()),
            2 => {}
            occurrences => {
                return Err(FacetError::Overshared {
                    facet: facets[start].clone(),
                    occurrences,
                });
            }
        }
        start = end;
    }
    Ok(boundary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_key_is_order_independent() {
        let a = FacetKey::new(&[9, 4, 7]);
        let b = FacetKey::new(&[7, 9, 4]);
        assert_eq!(a, b);
        assert_eq!(a.vertices(), &[4, 7, 9]);
        assert_eq!(a.len(), 3);
        assert!(a.contains(7));
        assert!(!a.contains(5));
        assert_eq!(a.to_string(), "(4, 7, 9)");
    }

    #[test]
    fn sentinel_detection_uses_smallest_index() {
        assert!(FacetKey::new(&[10, 3]).touches_sentinel(4));
        assert!(!FacetKey::new(&[10, 4]).touches_sentinel(4));
    }

    #[test]
    fn tetrahedron_has_four_distinct_facets() {
        let facets: Vec<FacetKey> = simplex_facets(&[3, 1, 4, 0]).collect();
        assert_eq!(facets.len(), 4);
        assert!(facets.iter().all(|f| f.len() == 3));
        let mut unique = facets.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn single_simplex_boundary_is_all_facets() {
        let mut facets: Vec<FacetKey> = simplex_facets(&[0, 1, 2, 3]).collect();
        let boundary = boundary_facets(&mut facets).unwrap();
        assert_eq!(boundary.len(), 4);
    }

    #[test]
    fn fan_around_interior_vertex_has_polygon_boundary() {
        // Four triangles around vertex 4 form a closed fan over the quad 0-1-2-3.
        let mut facets: Vec<FacetKey> = [[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]]
            .iter()
            .flat_map(|t| simplex_facets(t).collect::<Vec<_>>())
            .collect();
        let boundary = boundary_facets(&mut facets).unwrap();
        assert_eq!(
            boundary,
            vec![
                FacetKey::new(&[0, 1]),
                FacetKey::new(&[0, 3]),
                FacetKey::new(&[1, 2]),
                FacetKey::new(&[2, 3]),
            ]
        );
    }

    #[test]
    fn facet_in_three_simplices_is_rejected() {
        let mut facets: Vec<FacetKey> = [[0, 1, 2], [0, 1, 3], [0, 1, 4]]
            .iter()
            .flat_map(|t| simplex_facets(t).collect::<Vec<_>>())
            .collect();
        assert_eq!(
            boundary_facets(&mut facets),
            Err(FacetError::Overshared {
                facet: FacetKey::new(&[0, 1]),
                occurrences: 3,
            })
        );
    }

    #[test]
    fn facet_key_serializes_as_index_list() {
        let key = FacetKey::new(&[2, 0, 1]);
        assert_eq!(serde_json::to_string(&key).unwrap(), "[0,1,2]");
    }
}
