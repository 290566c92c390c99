//! Circumsphere computation for d-dimensional simplices.
//!
//! The circumcenter `C` of points `p0..pD` satisfies `|C - pi|² = |C - p0|²` for all
//! `i`, which reduces to the linear system `A x = b` with row `i` of `A` equal to
//! `pi - p0`, `b_i = |pi - p0|²`, and `C = p0 + x / 2`. The system is solved in
//! `f64` with an LU factorization from `la-stack`.

#![forbid(unsafe_code)]

use la_stack::{DEFAULT_PIVOT_TOL, LaError, Vector as LaVector};
use serde::{Deserialize, Serialize};

use super::{GeometryError, squared_norm};
use crate::geometry::matrix::{Matrix, matrix_set};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{
    CoordinateScalar, coords_to_f64, scalar_from_f64, scalar_to_f64,
};

/// The circumscribed sphere of a simplex: its center and squared radius.
///
/// Only the squared radius is stored; the point-in-sphere test compares squared
/// distances so no square root is needed during insertion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct Circumsphere<T, const D: usize>
where
    T: CoordinateScalar,
{
    center: Point<T, D>,
    radius_squared: T,
}

impl<T, const D: usize> Circumsphere<T, D>
where
    T: CoordinateScalar,
{
    /// Center of the sphere.
    #[inline]
    #[must_use]
    pub const fn center(&self) -> &Point<T, D> {
        &self.center
    }

    /// Squared radius of the sphere.
    #[inline]
    #[must_use]
    pub const fn radius_squared(&self) -> T {
        self.radius_squared
    }

    /// Radius of the sphere.
    #[must_use]
    pub fn radius(&self) -> T {
        self.radius_squared.sqrt()
    }

    /// Strict interior test: `r² - |point - center|² > 0`.
    ///
    /// Points exactly on the sphere are *not* contained, so co-circular input
    /// does not trigger re-triangulation of an already Delaunay configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::geometry::point::Point;
    /// use bowyer_watson::geometry::util::circumsphere;
    ///
    /// let tri = [Point::new([0.0, 0.0]), Point::new([2.0, 0.0]), Point::new([0.0, 2.0])];
    /// let sphere = circumsphere(&tri).unwrap();
    /// assert!(sphere.contains(&Point::new([1.0, 1.0])));
    /// assert!(!sphere.contains(&Point::new([2.0, 2.0]))); // on the circle
    /// assert!(!sphere.contains(&Point::new([5.0, 5.0])));
    /// ```
    #[must_use]
    pub fn contains(&self, point: &Point<T, D>) -> bool {
        self.radius_squared - self.center.squared_distance(point) > T::zero()
    }

    /// Signed clearance `r² - |point - center|²`; positive inside, negative outside.
    #[must_use]
    pub fn power(&self, point: &Point<T, D>) -> T {
        self.radius_squared - self.center.squared_distance(point)
    }
}

/// Computes the circumsphere of the `D + 1` points of a `D`-simplex.
///
/// # Errors
///
/// - [`GeometryError::InvalidSimplex`] if `points.len() != D + 1`.
/// - [`GeometryError::SingularSystem`] if the points are affinely dependent.
/// - [`GeometryError::NonFiniteSolution`] if the solve overflows.
/// - [`GeometryError::CoordinateConversion`] for non-finite input coordinates.
///
/// # Examples
///
/// ```rust
/// use approx::assert_relative_eq;
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::util::circumsphere;
///
/// let tet = [
///     Point::new([0.0, 0.0, 0.0]),
///     Point::new([1.0, 0.0, 0.0]),
///     Point::new([0.0, 1.0, 0.0]),
///     Point::new([0.0, 0.0, 1.0]),
/// ];
/// let sphere = circumsphere(&tet).unwrap();
/// assert_eq!(sphere.center().to_array(), [0.5, 0.5, 0.5]);
/// assert_relative_eq!(sphere.radius_squared(), 0.75, epsilon = 1e-12);
/// ```
pub fn circumsphere<T, const D: usize>(
    points: &[Point<T, D>],
) -> Result<Circumsphere<T, D>, GeometryError>
where
    T: CoordinateScalar,
{
    if points.len() != D + 1 {
        return Err(GeometryError::InvalidSimplex {
            actual: points.len(),
            expected: D + 1,
            dimension: D,
        });
    }

    let p0 = &points[0];
    let p0_f64 = coords_to_f64(p0.coords())?;

    let mut a = Matrix::<D>::zero();
    let mut b = [0.0_f64; D];
    for (row, point) in points[1..].iter().enumerate() {
        let coords = coords_to_f64(point.coords())?;
        for axis in 0..D {
            matrix_set(&mut a, row, axis, coords[axis] - p0_f64[axis]);
        }
        b[row] = scalar_to_f64(squared_norm(&point.difference(p0)))?;
    }

    // Retry with a zero pivot tolerance for badly scaled but invertible systems.
    let lu = match a.lu(DEFAULT_PIVOT_TOL) {
        Ok(lu) => lu,
        Err(LaError::Singular { .. }) => {
            tracing::trace!("circumsphere<{D}>: LU fell back to zero pivot tolerance");
            a.lu(0.0).map_err(|e| GeometryError::SingularSystem {
                details: format!("LU factorization failed: {e}"),
            })?
        }
        Err(e) => {
            return Err(GeometryError::NonFiniteSolution {
                details: format!("LU factorization failed: {e}"),
            });
        }
    };

    let x = lu
        .solve_vec(LaVector::<D>::new(b))
        .map_err(|e| GeometryError::NonFiniteSolution {
            details: format!("LU solve failed: {e}"),
        })?
        .into_array();

    let mut center = [T::zero(); D];
    for axis in 0..D {
        let half: T = scalar_from_f64(0.5 * x[axis]).map_err(|_| {
            GeometryError::NonFiniteSolution {
                details: format!("center coordinate {axis} is {}", 0.5 * x[axis]),
            }
        })?;
        center[axis] = p0.coords()[axis] + half;
    }
    let center = Point::new(center);
    let radius_squared = center.squared_distance(p0);
    if !radius_squared.is_finite() {
        return Err(GeometryError::NonFiniteSolution {
            details: "squared radius overflowed".to_string(),
        });
    }

    Ok(Circumsphere {
        center,
        radius_squared,
    })
}
