//! Sentinel bounding volume used to seed the triangulation.
//!
//! The input's bounding box is enlarged additively by
//! `margin_factor * longest_edge` and its `2^D` corners become the sentinel
//! vertices, which occupy the lowest indices of the vertex store. The box is
//! tiled by seed simplices over those corners:
//!
//! - 2D: 2 triangles split along the `0-3` diagonal.
//! - 3D: 5 tetrahedra, one central tetrahedron on the odd-parity corners
//!   `{1, 2, 4, 7}` and one tetrahedron cutting off each even-parity corner.
//!
//! Corner `i` takes `max` on axis `a` when bit `a` of `i` is set (see
//! [`BoundingBox::corner`]). Every input point lies strictly inside the box, so
//! it lies strictly inside at least one seed circumsphere.

use crate::core::collections::VertexIndex;
use crate::core::simplex::Simplex;
use crate::geometry::bounding_box::BoundingBox;
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::GeometryError;

/// Seed triangles over the 4 corners of a rectangle.
pub const SEED_TRIANGLES: [[VertexIndex; 3]; 2] = [[0, 1, 3], [0, 3, 2]];

/// Seed tetrahedra over the 8 corners of a box.
pub const SEED_TETRAHEDRA: [[VertexIndex; 4]; 5] = [
    [0, 1, 2, 4],
    [1, 2, 3, 7],
    [1, 4, 5, 7],
    [2, 4, 6, 7],
    [1, 2, 4, 7],
];

/// Number of sentinel vertices for dimension `D` (`2^D`).
///
/// ```rust
/// use bowyer_watson::core::algorithms::bounding_volume::sentinel_count;
///
/// assert_eq!(sentinel_count::<2>(), 4);
/// assert_eq!(sentinel_count::<3>(), 8);
/// ```
#[must_use]
pub const fn sentinel_count<const D: usize>() -> usize {
    1 << D
}

/// Vertex index lists of the seed simplices for dimension `D`.
///
/// # Errors
///
/// Returns [`GeometryError::UnsupportedDimension`] unless `D` is 2 or 3.
pub fn seed_simplex_indices<const D: usize>() -> Result<Vec<Vec<VertexIndex>>, GeometryError> {
    match D {
        2 => Ok(SEED_TRIANGLES.iter().map(|t| t.to_vec()).collect()),
        3 => Ok(SEED_TETRAHEDRA.iter().map(|t| t.to_vec()).collect()),
        dimension => Err(GeometryError::UnsupportedDimension { dimension }),
    }
}

/// Sentinel vertices and seed simplices covering a point set.
#[derive(Clone, Debug)]
pub struct BoundingVolume<T, const D: usize>
where
    T: CoordinateScalar,
{
    input_bounds: BoundingBox<T, D>,
    bounds: BoundingBox<T, D>,
    margin: T,
    sentinels: Vec<Point<T, D>>,
    seed_simplices: Vec<Simplex<T, D>>,
}

impl<T, const D: usize> BoundingVolume<T, D>
where
    T: CoordinateScalar,
{
    /// Builds the sentinel volume around `points`.
    ///
    /// The margin is `margin_factor * longest_edge`, or `margin_factor` itself when
    /// all points coincide on every axis.
    ///
    /// # Errors
    ///
    /// - [`GeometryError::EmptyPointSet`] if `points` is empty.
    /// - [`GeometryError::UnsupportedDimension`] unless `D` is 2 or 3.
    /// - Any circumsphere error from building a seed simplex.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::core::algorithms::bounding_volume::BoundingVolume;
    /// use bowyer_watson::geometry::point::Point;
    ///
    /// let points = [Point::new([0.0, 0.0]), Point::new([2.0, 1.0])];
    /// let volume = BoundingVolume::around(&points, 10.0).unwrap();
    /// assert_eq!(volume.margin(), 20.0);
    /// assert_eq!(volume.sentinels().len(), 4);
    /// assert_eq!(volume.seed_simplices().len(), 2);
    /// assert_eq!(volume.bounds().min().to_array(), [-20.0, -20.0]);
    /// ```
    pub fn around(points: &[Point<T, D>], margin_factor: T) -> Result<Self, GeometryError> {
        let seeds = seed_simplex_indices::<D>()?;
        let input_bounds = BoundingBox::from_points(points)?;
        let longest = input_bounds.longest_edge();
        let margin = if longest > T::zero() {
            margin_factor * longest
        } else {
            margin_factor
        };
        let bounds = input_bounds.enlarged(margin);
        let sentinels = bounds.corners();
        let seed_simplices = seeds
            .iter()
            .map(|vertices| Simplex::new(&sentinels, vertices))
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            sentinels = sentinels.len(),
            seeds = seed_simplices.len(),
            margin = ?margin,
            "seeded bounding volume"
        );

        Ok(Self {
            input_bounds,
            bounds,
            margin,
            sentinels,
            seed_simplices,
        })
    }

    /// Bounding box of the input points.
    #[must_use]
    pub const fn input_bounds(&self) -> &BoundingBox<T, D> {
        &self.input_bounds
    }

    /// Enlarged box whose corners are the sentinels.
    #[must_use]
    pub const fn bounds(&self) -> &BoundingBox<T, D> {
        &self.bounds
    }

    /// Additive enlargement applied on every side.
    #[must_use]
    pub const fn margin(&self) -> T {
        self.margin
    }

    /// Sentinel vertices, in corner order.
    #[must_use]
    pub fn sentinels(&self) -> &[Point<T, D>] {
        &self.sentinels
    }

    /// Seed simplices over the sentinel indices.
    #[must_use]
    pub fn seed_simplices(&self) -> &[Simplex<T, D>] {
        &self.seed_simplices
    }

    /// Consumes the volume, returning the sentinels and seed simplices.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Point<T, D>>, Vec<Simplex<T, D>>) {
        (self.sentinels, self.seed_simplices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::predicates::{Orientation, simplex_orientation};
    use approx::assert_relative_eq;

    fn triangle_area(store: &[Point<f64, 2>], t: &[usize; 3]) -> f64 {
        let a = store[t[1]].difference(&store[t[0]]);
        let b = store[t[2]].difference(&store[t[0]]);
        (a[0] * b[1] - a[1] * b[0]).abs() / 2.0
    }

    fn tetrahedron_volume(store: &[Point<f64, 3>], t: &[usize; 4]) -> f64 {
        let a = store[t[1]].difference(&store[t[0]]);
        let b = store[t[2]].difference(&store[t[0]]);
        let c = store[t[3]].difference(&store[t[0]]);
        let det = a[0] * (b[1] * c[2] - b[2] * c[1]) - a[1] * (b[0] * c[2] - b[2] * c[0])
            + a[2] * (b[0] * c[1] - b[1] * c[0]);
        det.abs() / 6.0
    }

    #[test]
    fn seed_triangles_tile_the_rectangle() {
        let points = [Point::new([0.0, 0.0]), Point::new([1.0, 3.0])];
        let volume = BoundingVolume::around(&points, 1.0).unwrap();
        let store = volume.sentinels();
        let total: f64 = SEED_TRIANGLES.iter().map(|t| triangle_area(store, t)).sum();
        let extent = volume.bounds().extent();
        assert_relative_eq!(total, extent[0] * extent[1], max_relative = 1e-12);
    }

    #[test]
    fn seed_tetrahedra_tile_the_box() {
        let points = [Point::new([0.0, 0.0, 0.0]), Point::new([1.0, 2.0, 3.0])];
        let volume = BoundingVolume::around(&points, 1.0).unwrap();
        let store = volume.sentinels();
        let total: f64 = SEED_TETRAHEDRA.iter().map(|t| tetrahedron_volume(store, t)).sum();
        let extent = volume.bounds().extent();
        assert_relative_eq!(total, extent[0] * extent[1] * extent[2], max_relative = 1e-12);
        for tet in &SEED_TETRAHEDRA {
            let pts: Vec<_> = tet.iter().map(|&v| store[v]).collect();
            assert_ne!(simplex_orientation(&pts).unwrap(), Orientation::DEGENERATE);
        }
    }

    #[test]
    fn every_input_point_is_inside_some_seed_circumsphere() {
        let points = [
            Point::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 0.0, 0.0]),
            Point::new([0.0, 1.0, 0.0]),
            Point::new([0.0, 0.0, 1.0]),
            Point::new([1.0, 1.0, 1.0]),
        ];
        let volume = BoundingVolume::around(&points, 1000.0).unwrap();
        for p in &points {
            assert!(volume.seed_simplices().iter().any(|s| s.circumsphere_contains(p)));
            assert!(volume.bounds().contains(p));
        }
        assert_eq!(volume.margin(), 1000.0);
        assert_eq!(volume.input_bounds().longest_edge(), 1.0);
    }

    #[test]
    fn coincident_points_fall_back_to_absolute_margin() {
        let points = [Point::new([5.0, 5.0]), Point::new([5.0, 5.0])];
        let volume = BoundingVolume::around(&points, 3.0).unwrap();
        assert_eq!(volume.margin(), 3.0);
        assert_eq!(volume.bounds().min().to_array(), [2.0, 2.0]);
    }

    #[test]
    fn unsupported_dimensions_are_rejected() {
        let points = [Point::new([0.0, 0.0, 0.0, 0.0])];
        assert_eq!(
            BoundingVolume::around(&points, 10.0).unwrap_err(),
            GeometryError::UnsupportedDimension { dimension: 4 }
        );
        assert!(seed_simplex_indices::<1>().is_err());
        let (sentinels, seeds) = BoundingVolume::around(&[Point::new([0.0, 0.0])], 1.0)
            .unwrap()
            .into_parts();
        assert_eq!((sentinels.len(), seeds.len()), (4, 2));
    }
}
