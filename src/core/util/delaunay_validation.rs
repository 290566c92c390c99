//! Delaunay empty-circumsphere property validation utilities.
//!
//! Insertion uses the strict in-circumsphere test without tolerance. Validation
//! recomputes every circumsphere and reports a vertex as a violation only when it
//! lies inside by more than `relative_tolerance * r²`, so round-off on
//! co-circular input is not flagged.

#![forbid(unsafe_code)]

use thiserror::Error;

use crate::core::collections::VertexIndex;
use crate::geometry::point::Point;
use crate::geometry::predicates::{InSphere, insphere_with_tolerance};
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::{GeometryError, circumsphere};

/// A vertex found strictly inside the circumsphere of a simplex that does not use it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelaunayViolation {
    /// Position of the simplex in the checked list.
    pub simplex_index: usize,
    /// Vertex indices of the simplex.
    pub simplex: Vec<VertexIndex>,
    /// Offending vertex.
    pub vertex: VertexIndex,
}

/// Errors that can occur during Delaunay property validation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DelaunayValidationError {
    /// At least one simplex has a foreign vertex inside its circumsphere.
    #[error(
        "{count} Delaunay violation(s); first: vertex {} inside circumsphere of simplex {:?}",
        first.vertex,
        first.simplex
    )]
    DelaunayViolation {
        /// Number of violations found.
        count: usize,
        /// The first violation, in simplex order.
        first: DelaunayViolation,
    },

    /// A circumsphere could not be computed.
    #[error("Invalid simplex {simplex:?}: {source}")]
    InvalidSimplex {
        /// Vertex indices of the simplex.
        simplex: Vec<VertexIndex>,
        /// Underlying geometry error.
        #[source]
        source: GeometryError,
    },
}

/// Finds every (simplex, vertex) pair violating the empty-circumsphere property.
///
/// Each simplex is a list of indices into `vertices`. Every vertex of
/// `vertices` not used by a simplex is tested against that simplex.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::InvalidSimplex`] if a simplex refers to a
/// missing vertex or its circumsphere is singular.
///
/// # Examples
///
/// ```
/// use bowyer_watson::core::util::find_delaunay_violations;
/// use bowyer_watson::geometry::point::Point;
///
/// let vertices = [
///     Point::new([0.0, 0.0]),
///     Point::new([1.0, 0.0]),
///     Point::new([0.0, 1.0]),
///     Point::new([0.9, 0.9]),
/// ];
/// // Splitting along (1, 2) leaves vertex 3 inside the circle through 0, 1, 2.
/// let bad = [[0, 1, 2], [1, 3, 2]];
/// let good = [[0, 1, 3], [0, 3, 2]];
/// assert!(!find_delaunay_violations(&vertices, &bad, 1e-10).unwrap().is_empty());
/// assert!(find_delaunay_violations(&vertices, &good, 1e-10).unwrap().is_empty());
/// ```
pub fn find_delaunay_violations<T, S, const D: usize>(
    vertices: &[Point<T, D>],
    simplices: &[S],
    relative_tolerance: T,
) -> Result<Vec<DelaunayViolation>, DelaunayValidationError>
where
    T: CoordinateScalar,
    S: AsRef<[VertexIndex]>,
{
    let mut violations = Vec::new();
    let mut points: Vec<Point<T, D>> = Vec::with_capacity(D + 1);

    for (simplex_index, simplex) in simplices.iter().enumerate() {
        let simplex = simplex.as_ref();
        points.clear();
        for &v in simplex {
            let point = vertices
                .get(v)
                .ok_or_else(|| DelaunayValidationError::InvalidSimplex {
                    simplex: simplex.to_vec(),
                    source: GeometryError::InvalidSimplex {
                        actual: points.len(),
                        expected: D + 1,
                        dimension: D,
                    },
                })?;
            points.push(*point);
        }
        let sphere =
            circumsphere(&points).map_err(|source| DelaunayValidationError::InvalidSimplex {
                simplex: simplex.to_vec(),
                source,
            })?;

        for (vertex, point) in vertices.iter().enumerate() {
            if simplex.contains(&vertex) {
                continue;
            }
            if insphere_with_tolerance(&sphere, point, relative_tolerance) == InSphere::INSIDE {
                violations.push(DelaunayViolation {
                    simplex_index,
                    simplex: simplex.to_vec(),
                    vertex,
                });
            }
        }
    }

    tracing::debug!(
        simplices = simplices.len(),
        violations = violations.len(),
        "checked Delaunay property"
    );
    Ok(violations)
}

/// Checks the empty-circumsphere property, failing on the first violation found.
///
/// # Errors
///
/// Returns [`DelaunayValidationError::DelaunayViolation`] with the total count
/// and the first violation, or [`DelaunayValidationError::InvalidSimplex`].
pub fn validate_delaunay<T, S, const D: usize>(
    vertices: &[Point<T, D>],
    simplices: &[S],
    relative_tolerance: T,
) -> Result<(), DelaunayValidationError>
where
    T: CoordinateScalar,
    S: AsRef<[VertexIndex]>,
{
    let mut violations =
        find_delaunay_violations(vertices, simplices, relative_tolerance)?.into_iter();
    let count = violations.len();
    match violations.next() {
        None => Ok(()),
        Some(first) => {
            tracing::warn!(
                count,
                vertex = first.vertex,
                simplex = ?first.simplex,
                "Delaunay violations found"
            );
            Err(DelaunayValidationError::DelaunayViolation { count, first })
        }
    }
}
