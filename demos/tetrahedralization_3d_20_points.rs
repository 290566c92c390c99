//! # 3D Tetrahedralization Example with 20 Points
//!
//! Tetrahedralizes 20 seeded random points in `[-3, 3]^3` and shows both surface
//! outputs:
//!
//! - `face_soup`: 4 vertex copies and 4 outward faces per tetrahedron
//! - `shared_faces`: the same faces over the shared vertex list
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example tetrahedralization_3d_20_points
//! ```

use bowyer_watson::prelude::*;
use std::time::Instant;

fn main() {
    println!("=================================================================");
    println!("3D Delaunay Tetrahedralization Example - 20 Random Points");
    println!("=================================================================\n");

    let points: Vec<Point<f64, 3>> = match generate_random_points_seeded(20, (-3.0, 3.0), 666) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("✗ Failed to generate points: {e}");
            return;
        }
    };

    println!("First few points:");
    for (i, p) in points.iter().take(5).enumerate() {
        let [x, y, z] = p.to_array();
        println!("  p{i:2}: [{x:8.3}, {y:8.3}, {z:8.3}]");
    }

    let start = Instant::now();
    let tri = match Triangulation::with_config(&points, config_presets::general_triangulation()) {
        Ok(tri) => {
            println!("\n✓ Tetrahedralization created successfully in {:?}", start.elapsed());
            tri
        }
        Err(e) => {
            eprintln!("✗ Failed to create tetrahedralization: {e}");
            return;
        }
    };
    println!(
        "  {} sentinels, {} live simplices before extraction",
        tri.sentinel_count(),
        tri.number_of_simplices()
    );

    let mesh = tri.extract_mesh();
    let soup = mesh.face_soup();
    let shared = mesh.shared_faces();
    println!("\nMesh:");
    println!("  tetrahedra:          {}", mesh.number_of_simplices());
    println!("  hull triangles:      {}", mesh.boundary_facets().len());
    println!("  face soup vertices:  {}", soup.vertices().len());
    println!("  face soup faces:     {}", soup.number_of_faces());
    println!("  shared vertices:     {}", shared.vertices().len());

    match tri.validate_delaunay() {
        Ok(()) => println!("\n✓ Delaunay property holds (sentinels included)"),
        Err(e) => println!("\n✗ Delaunay validation failed: {e}"),
    }
}
