//! Serialization round trips and host-facing surface output.
//!
//! - `Mesh`, `SurfaceMesh`, `FacetKey` and `Point` JSON round trips
//! - `triangulate_2d` keeps input z, `tetrahedralize_3d` emits per-tetrahedron faces

use approx::relative_eq;
use bowyer_watson::prelude::*;

fn points_approx_equal<const D: usize>(p1: &Point<f64, D>, p2: &Point<f64, D>) -> bool {
    p1.coords()
        .iter()
        .zip(p2.coords().iter())
        .all(|(a, b)| relative_eq!(a, b, epsilon = 1e-14, max_relative = 1e-14))
}

// =============================================================================
// SERIALIZATION
// =============================================================================

#[test]
fn mesh_json_round_trip_preserves_structure() {
    let points: Vec<Point<f64, 3>> = generate_random_points_seeded(15, (-1.0, 1.0), 5).unwrap();
    let mesh = Triangulation::new(&points).unwrap().extract_mesh();

    let json = serde_json::to_string(&mesh).unwrap();
    let back: Mesh<f64, 3> = serde_json::from_str(&json).unwrap();

    assert_eq!(back.simplices(), mesh.simplices());
    assert_eq!(back.input_indices(), mesh.input_indices());
    assert!(
        back.vertices()
            .iter()
            .zip(mesh.vertices())
            .all(|(a, b)| points_approx_equal(a, b))
    );
    assert!(back.validate_delaunay(1e-10).is_ok());
}

#[test]
fn points_and_facets_serialize_as_arrays() {
    let p = Point::new([1.5, -2.0]);
    assert_eq!(serde_json::to_string(&p).unwrap(), "[1.5,-2.0]");
    let back: Point<f64, 2> = serde_json::from_str("[1.5,-2.0]").unwrap();
    assert_eq!(back, p);

    let facet = FacetKey::new(&[4, 2]);
    assert_eq!(serde_json::to_string(&facet).unwrap(), "[2,4]");
}

#[test]
fn surface_mesh_round_trip() {
    let points = [
        Point::new([0.0, 0.0, 0.0]),
        Point::new([2.0, 0.0, 0.0]),
        Point::new([0.0, 2.0, 0.0]),
        Point::new([0.0, 0.0, 2.0]),
        Point::new([0.5, 0.5, 0.5]),
    ];
    let surface = tetrahedralize_3d(&points).unwrap();
    let json = serde_json::to_string(&surface).unwrap();
    let back: SurfaceMesh<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, surface);
}

// =============================================================================
// SURFACE OUTPUT
// =============================================================================

#[test]
fn triangulate_2d_uses_xy_and_keeps_z() {
    let points: Vec<Point<f64, 3>> = generate_random_points_seeded(30, (0.0, 10.0), 21).unwrap();
    let surface = triangulate_2d(&points).unwrap();

    let flat: Vec<Point<f64, 2>> = points.iter().map(Point::project).collect();
    let mesh = Triangulation::new(&flat).unwrap().extract_mesh();
    assert_eq!(surface.faces(), mesh.triangles().as_slice());
    for (out, &caller) in surface.vertices().iter().zip(mesh.input_indices()) {
        assert_eq!(*out, points[caller]);
    }
}

#[test]
fn tetrahedralize_3d_matches_face_soup() {
    let points: Vec<Point<f64, 3>> = generate_random_points_seeded(12, (-3.0, 3.0), 8).unwrap();
    let surface = tetrahedralize_3d(&points).unwrap();
    let mesh = Triangulation::new(&points).unwrap().extract_mesh();

    assert_eq!(surface, mesh.face_soup());
    assert_eq!(surface.number_of_faces(), 4 * mesh.number_of_simplices());

    // Shared-vertex output uses the same faces, remapped onto the shared list.
    let shared = mesh.shared_faces();
    assert_eq!(shared.number_of_faces(), surface.number_of_faces());
    for (soup_face, shared_face) in surface.faces().iter().zip(shared.faces()) {
        for (&a, &b) in soup_face.iter().zip(shared_face) {
            assert_eq!(surface.vertices()[a], shared.vertices()[b]);
        }
    }
}

#[test]
fn surface_entry_points_accept_configs() {
    let points = [
        Point::new([0.0, 0.0, 1.0]),
        Point::new([1.0, 0.0, 1.0]),
        Point::new([0.0, 1.0, 1.0]),
        Point::new([1.0, 1.0, 1.0]),
    ];
    let config = TriangulationConfigBuilder::default()
        .sentinel_margin_factor(50.0)
        .build()
        .unwrap();
    assert_eq!(
        triangulate_2d_with_config(&points, config)
            .unwrap()
            .number_of_faces(),
        2
    );
    assert!(matches!(
        tetrahedralize_3d_with_config(&points, config),
        Err(TriangulationError::DegenerateSimplex { .. })
    ));
}
