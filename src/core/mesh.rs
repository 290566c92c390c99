//! Index-based output meshes.
//!
//! A [`Mesh`] is what remains of a triangulation once every simplex touching a
//! sentinel is dropped: the input points (in insertion order) and the simplices
//! over them as dense index tuples. A [`SurfaceMesh`] is a plain triangle list
//! in 3D, used for surface output of tetrahedralizations.
//!
//! Simplices are stored canonically: vertex indices sorted, then the last two
//! swapped if needed so the simplex is positively oriented. The simplex list
//! itself is sorted, so equal point sets always produce equal meshes.

use serde::{Deserialize, Serialize};

use crate::core::collections::{FastHashMap, SimplexVertexBuffer, VertexIndex};
use crate::core::facet::{FacetKey, simplex_facets};
use crate::core::util::{DelaunayValidationError, DelaunayViolation};
use crate::core::util::{find_delaunay_violations, validate_delaunay};
use crate::geometry::point::Point;
use crate::geometry::predicates::{Orientation, simplex_orientation};
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Outward faces of a positively oriented tetrahedron, as local vertex positions.
pub const TETRAHEDRON_FACES: [[usize; 3]; 4] = [[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];

/// Triangles or tetrahedra over a dense vertex list.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::triangulation::Triangulation;
/// use bowyer_watson::geometry::point::Point;
///
/// let points = [
///     Point::new([0.0, 0.0]),
///     Point::new([2.0, 0.0]),
///     Point::new([1.0, 2.0]),
/// ];
/// let mesh = Triangulation::new(&points).unwrap().extract_mesh();
/// assert_eq!(mesh.triangles(), vec![[0, 2, 1]]);
/// assert_eq!(mesh.boundary_facets().len(), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct Mesh<T, const D: usize>
where
    T: CoordinateScalar,
{
    vertices: Vec<Point<T, D>>,
    input_indices: Vec<usize>,
    simplices: Vec<SimplexVertexBuffer>,
}

impl<T, const D: usize> Mesh<T, D>
where
    T: CoordinateScalar,
{
    /// Builds a mesh, canonicalizing the orientation and order of `simplices`.
    pub(crate) fn from_parts<I>(
        vertices: Vec<Point<T, D>>,
        input_indices: Vec<usize>,
        simplices: I,
    ) -> Self
    where
        I: IntoIterator<Item = SimplexVertexBuffer>,
    {
        let mut simplices: Vec<SimplexVertexBuffer> = simplices
            .into_iter()
            .map(|simplex| orient_positive(&vertices, simplex))
            .collect();
        simplices.sort_unstable();
        Self {
            vertices,
            input_indices,
            simplices,
        }
    }

    /// Output vertices, in insertion order.
    #[must_use]
    pub fn vertices(&self) -> &[Point<T, D>] {
        &self.vertices
    }

    /// Caller-side index of each output vertex.
    #[must_use]
    pub fn input_indices(&self) -> &[usize] {
        &self.input_indices
    }

    /// Simplices as index tuples into [`vertices`](Self::vertices).
    #[must_use]
    pub fn simplices(&self) -> &[SimplexVertexBuffer] {
        &self.simplices
    }

    /// Number of output vertices.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of output simplices.
    #[must_use]
    pub fn number_of_simplices(&self) -> usize {
        self.simplices.len()
    }

    /// Whether the mesh has no simplices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.simplices.is_empty()
    }

    /// Facets used by exactly one simplex (the convex hull boundary), sorted.
    #[must_use]
    pub fn boundary_facets(&self) -> Vec<FacetKey> {
        let mut counts: FastHashMap<FacetKey, usize> = FastHashMap::default();
        for simplex in &self.simplices {
            for facet in simplex_facets(simplex) {
                *counts.entry(facet).or_insert(0) += 1;
            }
        }
        let mut hull: Vec<FacetKey> = counts
            .into_iter()
            .filter_map(|(facet, count)| (count == 1).then_some(facet))
            .collect();
        hull.sort_unstable();
        hull
    }

    /// Every (simplex, vertex) pair violating the empty-circumsphere property.
    ///
    /// # Errors
    ///
    /// Returns [`DelaunayValidationError::InvalidSimplex`] if a circumsphere
    /// cannot be computed.
    pub fn find_delaunay_violations(
        &self,
        relative_tolerance: T,
    ) -> Result<Vec<DelaunayViolation>, DelaunayValidationError> {
        find_delaunay_violations(&self.vertices, &self.simplices, relative_tolerance)
    }

    /// Checks the empty-circumsphere property over the output vertices.
    ///
    /// # Errors
    ///
    /// Returns a [`DelaunayValidationError`] describing the first violation.
    pub fn validate_delaunay(&self, relative_tolerance: T) -> Result<(), DelaunayValidationError> {
        validate_delaunay(&self.vertices, &self.simplices, relative_tolerance)
    }
}

impl<T> Mesh<T, 2>
where
    T: CoordinateScalar,
{
    /// Counter-clockwise triangles.
    #[must_use]
    pub fn triangles(&self) -> Vec<[VertexIndex; 3]> {
        self.simplices.iter().map(|s| [s[0], s[1], s[2]]).collect()
    }
}

impl<T> Mesh<T, 3>
where
    T: CoordinateScalar,
{
    /// Positively oriented tetrahedra.
    #[must_use]
    pub fn tetrahedra(&self) -> Vec<[VertexIndex; 4]> {
        self.simplices
            .iter()
            .map(|s| [s[0], s[1], s[2], s[3]])
            .collect()
    }

    /// Outward faces of every tetrahedron with per-tetrahedron vertex copies.
    ///
    /// Tetrahedron `t` owns vertices `4t..4t + 4` of the result and faces
    /// `4t..4t + 4`. Interior faces appear twice, once from each side.
    #[must_use]
    pub fn face_soup(&self) -> SurfaceMesh<T> {
        let mut vertices = Vec::with_capacity(4 * self.simplices.len());
        let mut faces = Vec::with_capacity(4 * self.simplices.len());
        for simplex in &self.simplices {
            let base = vertices.len();
            vertices.extend(simplex.iter().map(|&v| self.vertices[v]));
            faces.extend(
                TETRAHEDRON_FACES
                    .iter()
                    .map(|[a, b, c]| [base + a, base + b, base + c]),
            );
        }
        SurfaceMesh { vertices, faces }
    }

    /// Outward faces of every tetrahedron over the shared output vertices.
    #[must_use]
    pub fn shared_faces(&self) -> SurfaceMesh<T> {
        let faces = self
            .simplices
            .iter()
            .flat_map(|s| {
                TETRAHEDRON_FACES
                    .iter()
                    .map(move |&[a, b, c]| [s[a], s[b], s[c]])
            })
            .collect();
        SurfaceMesh {
            vertices: self.vertices.clone(),
            faces,
        }
    }
}

fn orient_positive<T, const D: usize>(
    vertices: &[Point<T, D>],
    mut simplex: SimplexVertexBuffer,
) -> SimplexVertexBuffer
where
    T: CoordinateScalar,
{
    simplex.sort_unstable();
    let points: Vec<Point<T, D>> = simplex
        .iter()
        .filter_map(|&v| vertices.get(v).copied())
        .collect();
    if matches!(simplex_orientation(&points), Ok(Orientation::NEGATIVE)) {
        let n = simplex.len();
        simplex.swap(n - 2, n - 1);
    }
    simplex
}

/// A triangle list in 3D.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct SurfaceMesh<T>
where
    T: CoordinateScalar,
{
    vertices: Vec<Point<T, 3>>,
    faces: Vec<[VertexIndex; 3]>,
}

impl<T> SurfaceMesh<T>
where
    T: CoordinateScalar,
{
    /// Creates a surface mesh from positions and index triples.
    #[must_use]
    pub const fn new(vertices: Vec<Point<T, 3>>, faces: Vec<[VertexIndex; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Vertex positions.
    #[must_use]
    pub fn vertices(&self) -> &[Point<T, 3>] {
        &self.vertices
    }

    /// Triangles as index triples into [`vertices`](Self::vertices).
    #[must_use]
    pub fn faces(&self) -> &[[VertexIndex; 3]] {
        &self.faces
    }

    /// Number of triangles.
    #[must_use]
    pub fn number_of_faces(&self) -> usize {
        self.faces.len()
    }

    /// Consumes the mesh, returning positions and faces.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point<T, 3>>, Vec<[VertexIndex; 3]>) {
        (self.vertices, self.faces)
    }
}
