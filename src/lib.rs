//! # bowyer-watson
//!
//! Incremental [Bowyer-Watson](https://en.wikipedia.org/wiki/Bowyer%E2%80%93Watson_algorithm)
//! Delaunay triangulation in 2D and Delaunay tetrahedralization in 3D.
//!
//! # Features
//!
//! - 2D triangulation and 3D tetrahedralization from a single generic driver
//! - Sentinel bounding volume seeding (2 seed triangles, 5 seed tetrahedra)
//! - Atomic, cavity-based insertion with sort-and-scan boundary extraction
//! - Deterministic output: inputs are inserted in lexicographic order and output
//!   simplices are positively oriented and sorted
//! - Generic floating-point coordinate types (`f32`, `f64`)
//! - Serialization/Deserialization with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! ```rust
//! use bowyer_watson::prelude::*;
//!
//! let points = vec![
//!     Point::new([0.0, 0.0]),
//!     Point::new([1.0, 0.0]),
//!     Point::new([0.0, 1.0]),
//!     Point::new([1.0, 1.0]),
//!     Point::new([0.4, 0.6]),
//! ];
//!
//! let tri = Triangulation::new(&points).unwrap();
//! let mesh = tri.extract_mesh();
//!
//! // 2n - h - 2 triangles for n points with h on the convex hull.
//! assert_eq!(mesh.number_of_simplices(), 2 * 5 - 4 - 2);
//! assert!(mesh.validate_delaunay(1e-10).is_ok());
//! ```
//!
//! # Surface Output
//!
//! Hosts that exchange flat 3D point lists can use [`core::surface`]:
//!
//! ```rust
//! use bowyer_watson::prelude::*;
//!
//! let points = [
//!     Point::new([0.0, 0.0, 0.0]),
//!     Point::new([1.0, 0.0, 0.0]),
//!     Point::new([0.0, 1.0, 0.0]),
//!     Point::new([0.0, 0.0, 1.0]),
//! ];
//! let surface = tetrahedralize_3d(&points).unwrap();
//! assert_eq!(surface.number_of_faces(), 4);
//!
//! let terrain = triangulate_2d(&points[..3]).unwrap();
//! assert_eq!(terrain.number_of_faces(), 1);
//! ```
//!
//! # Errors
//!
//! Construction either returns a complete triangulation or a
//! [`TriangulationError`](core::triangulation::TriangulationError): too few
//! points, non-finite coordinates, duplicate or affinely dependent input, or a
//! malformed cavity. No partial result is ever returned.
//!
//! # Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events (`debug` for
//! construction milestones, `trace` per insertion, `warn` on failures) and never
//! installs a subscriber.

#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// Triangulation data structures and algorithms.
///
/// Vertices live in one store and are referenced by index; simplices hold only
/// indices plus their cached circumsphere.
pub mod core {
    /// Seeding and insertion algorithms
    pub mod algorithms {
        pub mod bounding_volume;
        pub mod bowyer_watson;
        pub use bounding_volume::*;
        pub use bowyer_watson::*;
    }
    /// Collection aliases and small-buffer types used throughout the crate
    pub mod collections;
    pub mod config;
    pub mod facet;
    pub mod mesh;
    pub mod simplex;
    pub mod surface;
    pub mod triangulation;
    pub mod util;
    /// Traits for pluggable insertion algorithms.
    pub mod traits {
        pub mod insertion_algorithm;
        pub use insertion_algorithm::*;
    }
    pub use config::*;
    pub use facet::*;
    pub use mesh::*;
    pub use simplex::*;
    pub use surface::*;
    pub use traits::*;
    pub use triangulation::*;
    pub use util::*;
}

/// Geometric types and predicates.
pub mod geometry {
    pub mod bounding_box;
    pub mod matrix;
    pub mod point;
    pub mod predicates;
    /// Geometric utility functions: circumspheres, affine rank, point generation
    pub mod util;
    /// Coordinate scalar abstraction and conversion helpers.
    pub mod traits {
        pub mod coordinate;
        pub use coordinate::*;
    }
    pub use bounding_box::*;
    pub use matrix::*;
    pub use point::*;
    pub use predicates::*;
    pub use traits::*;
    pub use util::*;
}

/// A prelude module that re-exports commonly used types.
pub mod prelude {
    pub use crate::core::{
        algorithms::{bounding_volume::*, bowyer_watson::*},
        config::*,
        facet::*,
        mesh::*,
        simplex::*,
        surface::*,
        traits::insertion_algorithm::*,
        triangulation::*,
        util::*,
    };

    pub use crate::core::collections::{FastHashMap, FastHashSet, SmallBuffer, VertexIndex};

    pub use crate::geometry::{
        bounding_box::*, point::*, predicates::*, traits::coordinate::*, util::*,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use crate::{
        core::{mesh::Mesh, mesh::SurfaceMesh, simplex::Simplex, triangulation::Triangulation},
        geometry::Point,
        is_normal,
    };

    #[test]
    fn normal_types() {
        assert!(is_normal::<Point<f64, 3>>());
        assert!(is_normal::<Point<f32, 2>>());
        assert!(is_normal::<Simplex<f64, 3>>());
        assert!(is_normal::<Mesh<f64, 2>>());
        assert!(is_normal::<SurfaceMesh<f32>>());
        assert!(is_normal::<Triangulation<f64, 3>>());
    }

    #[test]
    fn prelude_exports_driver_and_collections() {
        use crate::prelude::*;

        let mut map: FastHashMap<FacetKey, usize> = FastHashMap::default();
        map.insert(FacetKey::new(&[2, 1]), 1);
        assert_eq!(map.get(&FacetKey::new(&[1, 2])), Some(&1));

        let config: TriangulationConfig<f64> = config_presets::general_triangulation();
        let points = generate_random_points_seeded::<f64, 2>(12, (-1.0, 1.0), 7).unwrap();
        let tri = Triangulation::with_config(&points, config).unwrap();
        assert_eq!(tri.statistics().vertices_inserted, 12);
    }
}
