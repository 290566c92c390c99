//! Geometric predicates for d-dimensional geometry calculations.
//!
//! Orientation of a simplex and classification of a point against a
//! circumsphere with an explicit boundary band. Insertion itself uses the strict
//! [`Circumsphere::contains`] test; the banded classification is for validation.

use crate::geometry::matrix::{Matrix, determinant, matrix_set};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{CoordinateScalar, coords_to_f64};
use crate::geometry::util::{Circumsphere, GeometryError};

/// Represents the position of a point relative to a circumsphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InSphere {
    /// The point is outside the circumsphere
    OUTSIDE,
    /// The point is on the boundary of the circumsphere (within numerical tolerance)
    BOUNDARY,
    /// The point is inside the circumsphere
    INSIDE,
}

impl std::fmt::Display for InSphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Represents the orientation of a simplex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The simplex has negative orientation (determinant < 0)
    NEGATIVE,
    /// The simplex is degenerate (determinant ≈ 0)
    DEGENERATE,
    /// The simplex has positive orientation (determinant > 0)
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Determine the orientation of a simplex from the sign of its edge determinant.
///
/// For points `p0..pD` the matrix has rows `pi - p0`. In 2D a positive
/// determinant means counter-clockwise; in 3D it means `p3` lies on the side of
/// the plane `(p0, p1, p2)` that sees that triangle counter-clockwise.
///
/// A determinant whose magnitude is below a few ulps of the Hadamard bound
/// (the product of the row norms) is reported as `DEGENERATE`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidSimplex`] if the number of points is not
/// `D + 1`, or [`GeometryError::CoordinateConversion`] for non-finite input.
///
/// # Example
///
/// ```
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::predicates::{simplex_orientation, Orientation};
///
/// let ccw = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0]), Point::new([0.0, 1.0])];
/// assert_eq!(simplex_orientation(&ccw).unwrap(), Orientation::POSITIVE);
///
/// let tet = [
///     Point::new([0.0, 0.0, 0.0]),
///     Point::new([1.0, 0.0, 0.0]),
///     Point::new([0.0, 1.0, 0.0]),
///     Point::new([0.0, 0.0, 1.0]),
/// ];
/// assert_eq!(simplex_orientation(&tet).unwrap(), Orientation::POSITIVE);
/// ```
pub fn simplex_orientation<T, const D: usize>(
    simplex_points: &[Point<T, D>],
) -> Result<Orientation, GeometryError>
where
    T: CoordinateScalar,
{
    if simplex_points.len() != D + 1 {
        return Err(GeometryError::InvalidSimplex {
            actual: simplex_points.len(),
            expected: D + 1,
            dimension: D,
        });
    }

    let origin = coords_to_f64(simplex_points[0].coords())?;
    let mut matrix = Matrix::<D>::zero();
    let mut hadamard = 1.0_f64;
    for (row, point) in simplex_points[1..].iter().enumerate() {
        let coords = coords_to_f64(point.coords())?;
        let mut row_norm_sq = 0.0;
        for axis in 0..D {
            let value = coords[axis] - origin[axis];
            row_norm_sq += value * value;
            matrix_set(&mut matrix, row, axis, value);
        }
        hadamard *= row_norm_sq.sqrt();
    }

    let det = determinant(&matrix);
    let tolerance = hadamard * 16.0 * f64::EPSILON;
    Ok(if det.is_nan() || det.abs() <= tolerance {
        Orientation::DEGENERATE
    } else if det > 0.0 {
        Orientation::POSITIVE
    } else {
        Orientation::NEGATIVE
    })
}

/// Classifies `point` against `sphere` with a boundary band of
/// `relative_tolerance * r²`.
///
/// # Example
///
/// ```
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::predicates::{insphere_with_tolerance, InSphere};
/// use bowyer_watson::geometry::util::circumsphere;
///
/// let tri = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0]), Point::new([0.0, 1.0])];
/// let sphere = circumsphere(&tri).unwrap();
/// assert_eq!(insphere_with_tolerance(&sphere, &Point::new([1.0, 1.0]), 1e-10), InSphere::BOUNDARY);
/// assert_eq!(insphere_with_tolerance(&sphere, &Point::new([0.4, 0.4]), 1e-10), InSphere::INSIDE);
/// assert_eq!(insphere_with_tolerance(&sphere, &Point::new([2.0, 2.0]), 1e-10), InSphere::OUTSIDE);
/// ```
#[must_use]
pub fn insphere_with_tolerance<T, const D: usize>(
    sphere: &Circumsphere<T, D>,
    point: &Point<T, D>,
    relative_tolerance: T,
) -> InSphere
where
    T: CoordinateScalar,
{
    let power = sphere.power(point);
    let band = relative_tolerance.abs() * sphere.radius_squared();
    if power > band {
        InSphere::INSIDE
    } else if power < -band {
        InSphere::OUTSIDE
    } else {
        InSphere::BOUNDARY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::util::circumsphere;

    #[test]
    fn orientation_2d_follows_winding() {
        let ccw = [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 0.0]),
            Point::new([0.0, 1.0]),
        ];
        let cw = [ccw[0], ccw[2], ccw[1]];
        assert_eq!(simplex_orientation(&ccw).unwrap(), Orientation::POSITIVE);
        assert_eq!(simplex_orientation(&cw).unwrap(), Orientation::NEGATIVE);
    }

    #[test]
    fn orientation_3d_swapping_two_vertices_flips_sign() {
        let tet = [
            Point::new([0.0, 0.0, 0.0]),
            Point::new([1.0, 0.0, 0.0]),
            Point::new([0.0, 1.0, 0.0]),
            Point::new([0.0, 0.0, 1.0]),
        ];
        let swapped = [tet[1], tet[0], tet[2], tet[3]];
        assert_eq!(simplex_orientation(&tet).unwrap(), Orientation::POSITIVE);
        assert_eq!(simplex_orientation(&swapped).unwrap(), Orientation::NEGATIVE);
    }

    #[test]
    fn collinear_and_coplanar_are_degenerate() {
        let collinear = [
            Point::new([0.0, 0.0]),
            Point::new([1.0, 1.0]),
            Point::new([3.0, 3.0]),
        ];
        assert_eq!(simplex_orientation(&collinear).unwrap(), Orientation::DEGENERATE);

        let coplanar = [
            Point::new([0.0, 0.0, 2.0]),
            Point::new([1.0, 0.0, 2.0]),
            Point::new([0.0, 1.0, 2.0]),
            Point::new([1.0, 1.0, 2.0]),
        ];
        assert_eq!(simplex_orientation(&coplanar).unwrap(), Orientation::DEGENERATE);
    }

    #[test]
    fn orientation_rejects_wrong_point_count() {
        let pts = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0])];
        assert!(matches!(
            simplex_orientation(&pts),
            Err(GeometryError::InvalidSimplex { .. })
        ));
    }

    #[test]
    fn insphere_band_scales_with_radius() {
        let tri = [
            Point::new([0.0, 0.0]),
            Point::new([1000.0, 0.0]),
            Point::new([0.0, 1000.0]),
        ];
        let sphere = circumsphere(&tri).unwrap();
        for p in &tri {
            assert_eq!(insphere_with_tolerance(&sphere, p, 1e-10), InSphere::BOUNDARY);
        }
        assert_eq!(
            insphere_with_tolerance(&sphere, &Point::new([500.0, 500.0]), 1e-10),
            InSphere::INSIDE
        );
        assert_eq!(format!("{}", InSphere::OUTSIDE), "OUTSIDE");
        assert_eq!(format!("{}", Orientation::DEGENERATE), "DEGENERATE");
    }
}
