//! Geometric utility functions for d-dimensional geometry calculations.
//!
//! This module contains the error type shared by the geometry kernel, the affine
//! span computation used to reject collinear/coplanar input, and the
//! [`circumsphere`] and [`point_generation`] submodules.

use crate::core::collections::{SmallBuffer, MAX_SIMPLEX_VERTICES};
use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::{
    CoordinateConversionError, CoordinateScalar, coords_to_f64, scalar_to_f64,
};

pub mod circumsphere;
pub mod point_generation;

pub use circumsphere::*;
pub use point_generation::*;

/// Errors raised by the geometry kernel.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum GeometryError {
    /// A bounding box was requested for zero points.
    #[error("Cannot compute the bounding box of an empty point set")]
    EmptyPointSet,

    /// The number of points does not match a `D`-simplex.
    #[error("Invalid simplex: expected {expected} points for dimension {dimension}, found {actual}")]
    InvalidSimplex {
        /// Number of points supplied.
        actual: usize,
        /// Number of points required (`D + 1`).
        expected: usize,
        /// Dimension of the simplex.
        dimension: usize,
    },

    /// The circumcenter system is singular (collinear, coplanar or coincident points).
    #[error("Circumsphere system is singular: {details}")]
    SingularSystem {
        /// Description from the linear solver.
        details: String,
    },

    /// The solve produced NaN or infinite coordinates.
    #[error("Circumsphere solve produced a non-finite result: {details}")]
    NonFiniteSolution {
        /// Description from the linear solver.
        details: String,
    },

    /// Two input points have identical coordinates.
    #[error("Points have identical coordinates")]
    CoincidentPoints,

    /// The points span fewer than `dimension` dimensions.
    #[error("Points span an affine subspace of rank {rank}, but dimension {dimension} is required")]
    AffinelyDependent {
        /// Affine rank of the point set.
        rank: usize,
        /// Required rank.
        dimension: usize,
    },

    /// Only 2D triangulation and 3D tetrahedralization are supported.
    #[error("Unsupported dimension {dimension}: only 2 and 3 are supported")]
    UnsupportedDimension {
        /// The requested dimension.
        dimension: usize,
    },

    /// Scalar conversion to or from `f64` failed.
    #[error(transparent)]
    CoordinateConversion(#[from] CoordinateConversionError),
}

/// Errors that can occur during random point generation.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum RandomPointGenerationError {
    /// Invalid coordinate range (min >= max).
    #[error("Invalid coordinate range: minimum {min} must be less than maximum {max}")]
    InvalidRange {
        /// The minimum value of the range.
        min: String,
        /// The maximum value of the range.
        max: String,
    },
}

/// Sum of squares of a coordinate array.
#[must_use]
pub fn squared_norm<T, const D: usize>(coords: &[T; D]) -> T
where
    T: CoordinateScalar,
{
    coords.iter().fold(T::zero(), |acc, &x| acc + x * x)
}

/// Result of [`affine_span`]: the affine rank of a point set and the indices of
/// the points that realize it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AffineSpan {
    /// Affine rank (0 for a single point, `D` for a full-dimensional set).
    pub rank: usize,
    /// Indices of `rank + 1` points whose span has that rank.
    pub basis: SmallBuffer<usize, MAX_SIMPLEX_VERTICES>,
}

/// Computes the affine rank of a point set by greedy Gram-Schmidt.
///
/// Starting from `points[0]`, repeatedly adds the point whose residual after
/// projection onto the current span is largest. A residual at or below
/// `relative_tolerance * scale` (where `scale` is the largest coordinate extent)
/// counts as zero.
///
/// # Errors
///
/// Returns [`GeometryError::EmptyPointSet`] for an empty slice and
/// [`GeometryError::CoordinateConversion`] for non-finite coordinates.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::util::affine_span;
///
/// let collinear = [Point::new([0.0, 0.0]), Point::new([1.0, 1.0]), Point::new([2.0, 2.0])];
/// assert_eq!(affine_span(&collinear, 1e-10).unwrap().rank, 1);
///
/// let triangle = [Point::new([0.0, 0.0]), Point::new([1.0, 0.0]), Point::new([0.0, 1.0])];
/// assert_eq!(affine_span(&triangle, 1e-10).unwrap().rank, 2);
/// ```
pub fn affine_span<T, const D: usize>(
    points: &[Point<T, D>],
    relative_tolerance: T,
) -> Result<AffineSpan, GeometryError>
where
    T: CoordinateScalar,
{
    let first = points.first().ok_or(GeometryError::EmptyPointSet)?;
    let origin = coords_to_f64(first.coords())?;
    let relative: Vec<[f64; D]> = points
        .iter()
        .map(|p| {
            let c = coords_to_f64(p.coords())?;
            let mut out = [0.0; D];
            for axis in 0..D {
                out[axis] = c[axis] - origin[axis];
            }
            Ok(out)
        })
        .collect::<Result<_, CoordinateConversionError>>()?;

    let scale = (0..D)
        .map(|axis| {
            let (lo, hi) = relative.iter().fold((0.0_f64, 0.0_f64), |(lo, hi), r| {
                (lo.min(r[axis]), hi.max(r[axis]))
            });
            hi - lo
        })
        .fold(0.0_f64, f64::max);
    let threshold = scalar_to_f64(relative_tolerance)? * scale;

    let mut basis = SmallBuffer::new();
    basis.push(0);
    let mut directions: Vec<[f64; D]> = Vec::with_capacity(D);

    while directions.len() < D {
        let mut best: Option<(usize, f64, [f64; D])> = None;
        for (index, r) in relative.iter().enumerate() {
            let mut residual = *r;
            for dir in &directions {
                let dot: f64 = residual.iter().zip(dir).map(|(a, b)| a * b).sum();
                for axis in 0..D {
                    residual[axis] -= dot * dir[axis];
                }
            }
            let norm = residual.iter().map(|x| x * x).sum::<f64>().sqrt();
            if best.is_none_or(|(_, best_norm, _)| norm > best_norm) {
                best = Some((index, norm, residual));
            }
        }

        match best {
            Some((index, norm, residual)) if norm > threshold && norm > 0.0 => {
                let mut dir = residual;
                for value in &mut dir {
                    *value /= norm;
                }
                directions.push(dir);
                basis.push(index);
            }
            _ => break,
        }
    }

    Ok(AffineSpan {
        rank: directions.len(),
        basis,
    })
}
