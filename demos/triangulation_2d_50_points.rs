//! # 2D Triangulation Example with 50 Points
//!
//! Triangulates 50 seeded random points in `[-10, 10]^2` and reports:
//!
//! - Construction time and insertion statistics
//! - Triangle and hull edge counts (`2n - h - 2`)
//! - Delaunay validation of the output mesh
//!
//! ## Usage
//!
//! ```bash
//! cargo run --example triangulation_2d_50_points
//! ```

use bowyer_watson::prelude::*;
use std::time::Instant;

fn main() {
    println!("=================================================================");
    println!("2D Delaunay Triangulation Example - 50 Random Points");
    println!("=================================================================\n");

    let points: Vec<Point<f64, 2>> = match generate_random_points_seeded(50, (-10.0, 10.0), 42) {
        Ok(points) => points,
        Err(e) => {
            eprintln!("✗ Failed to generate points: {e}");
            return;
        }
    };

    let start = Instant::now();
    let tri = match Triangulation::new(&points) {
        Ok(tri) => {
            println!("✓ Triangulation created successfully in {:?}", start.elapsed());
            tri
        }
        Err(e) => {
            eprintln!("✗ Failed to create triangulation: {e}");
            return;
        }
    };

    let stats = tri.statistics();
    println!("\nInsertion statistics:");
    println!("  vertices inserted:  {}", stats.vertices_inserted);
    println!("  simplices created:  {}", stats.simplices_created);
    println!("  simplices removed:  {}", stats.simplices_removed);
    println!("  largest cavity:     {}", stats.largest_cavity);

    let mesh = tri.extract_mesh();
    let n = mesh.number_of_vertices();
    let h = mesh.boundary_facets().len();
    println!("\nMesh:");
    println!("  vertices:   {n}");
    println!("  triangles:  {}", mesh.number_of_simplices());
    println!("  hull edges: {h}");
    println!("  2n - h - 2: {}", 2 * n - h - 2);

    println!("\nFirst few triangles:");
    for t in mesh.triangles().iter().take(5) {
        println!("  {t:?}");
    }

    match mesh.validate_delaunay(1e-10) {
        Ok(()) => println!("\n✓ Delaunay property holds"),
        Err(e) => println!("\n✗ Delaunay validation failed: {e}"),
    }
}
