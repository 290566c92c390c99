//! Surface-mesh entry points for hosts that exchange plain 3D point lists.
//!
//! Both functions take a flat list of 3D positions and return a
//! [`SurfaceMesh`] whose faces index its own vertex list:
//!
//! - [`triangulate_2d`] triangulates the x/y projection and keeps each point's
//!   original z in the output.
//! - [`tetrahedralize_3d`] tetrahedralizes the points and emits the four outward
//!   faces of every tetrahedron, each tetrahedron with its own vertex copies.

use crate::core::config::TriangulationConfig;
use crate::core::mesh::SurfaceMesh;
use crate::core::triangulation::{Triangulation, TriangulationError};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

/// Delaunay-triangulates the x/y projection of `points`.
///
/// Output vertices are the input points in sorted order, z included.
///
/// # Errors
///
/// Returns a [`TriangulationError`] if the projected points cannot be
/// triangulated, for example when fewer than 3 are given or all are collinear
/// in x/y.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::surface::triangulate_2d;
/// use bowyer_watson::geometry::point::Point;
///
/// let points = [
///     Point::new([0.0, 0.0, 5.0]),
///     Point::new([1.0, 0.0, 6.0]),
///     Point::new([0.0, 1.0, 7.0]),
/// ];
/// let surface = triangulate_2d(&points).unwrap();
/// assert_eq!(surface.faces(), &[[0, 2, 1]]);
/// assert_eq!(surface.vertices()[1].to_array(), [0.0, 1.0, 7.0]);
/// ```
pub fn triangulate_2d<T>(points: &[Point<T, 3>]) -> Result<SurfaceMesh<T>, TriangulationError>
where
    T: CoordinateScalar,
{
    triangulate_2d_with_config(points, TriangulationConfig::default())
}

/// [`triangulate_2d`] with an explicit configuration.
///
/// # Errors
///
/// See [`triangulate_2d`].
pub fn triangulate_2d_with_config<T>(
    points: &[Point<T, 3>],
    config: TriangulationConfig<T>,
) -> Result<SurfaceMesh<T>, TriangulationError>
where
    T: CoordinateScalar,
{
    let projected: Vec<Point<T, 2>> = points.iter().map(Point::project).collect();
    let mesh = Triangulation::with_config(&projected, config)?.extract_mesh();
    let vertices = mesh
        .input_indices()
        .iter()
        .map(|&i| points[i])
        .collect();
    Ok(SurfaceMesh::new(vertices, mesh.triangles()))
}

/// Delaunay-tetrahedralizes `points` and returns the outward faces of every
/// tetrahedron.
///
/// The output has `4 * t` vertices and `4 * t` faces for `t` tetrahedra; see
/// [`Mesh::face_soup`](crate::core::mesh::Mesh::face_soup).
///
/// # Errors
///
/// Returns a [`TriangulationError`] if the points cannot be tetrahedralized,
/// for example when fewer than 4 are given or all are coplanar.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::core::surface::tetrahedralize_3d;
/// use bowyer_watson::geometry::point::Point;
///
/// let points = [
///     Point::new([1.0, 1.0, 1.0]),
///     Point::new([1.0, -1.0, -1.0]),
///     Point::new([-1.0, 1.0, -1.0]),
///     Point::new([-1.0, -1.0, 1.0]),
/// ];
/// let surface = tetrahedralize_3d(&points).unwrap();
/// assert_eq!(surface.vertices().len(), 4);
/// assert_eq!(surface.number_of_faces(), 4);
/// ```
pub fn tetrahedralize_3d<T>(points: &[Point<T, 3>]) -> Result<SurfaceMesh<T>, TriangulationError>
where
    T: CoordinateScalar,
{
    tetrahedralize_3d_with_config(points, TriangulationConfig::default())
}

/// [`tetrahedralize_3d`] with an explicit configuration.
///
/// # Errors
///
/// See [`tetrahedralize_3d`].
pub fn tetrahedralize_3d_with_config<T>(
    points: &[Point<T, 3>],
    config: TriangulationConfig<T>,
) -> Result<SurfaceMesh<T>, TriangulationError>
where
    T: CoordinateScalar,
{
    Ok(Triangulation::with_config(points, config)?
        .extract_mesh()
        .face_soup())
}
