//! Random point generation functions.
//!
//! Reproducible point sets for tests, benchmarks, and the demo binaries.

use num_traits::cast;
use rand::Rng;
use rand::distr::uniform::SampleUniform;

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;

pub use super::RandomPointGenerationError;

fn validate_range<T: CoordinateScalar>(range: (T, T)) -> Result<(), RandomPointGenerationError> {
    if range.0 >= range.1 || !range.0.is_finite() || !range.1.is_finite() {
        return Err(RandomPointGenerationError::InvalidRange {
            min: format!("{:?}", range.0),
            max: format!("{:?}", range.1),
        });
    }
    Ok(())
}

/// Generate random points in D-dimensional space using the thread-local RNG.
///
/// Each coordinate is drawn uniformly from `[range.0, range.1)`.
///
/// # Errors
///
/// Returns `RandomPointGenerationError::InvalidRange` if `range.0 >= range.1`
/// or either bound is not finite.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::util::generate_random_points;
///
/// let points: Vec<Point<f64, 3>> = generate_random_points(100, (-1.0, 1.0)).unwrap();
/// assert_eq!(points.len(), 100);
/// assert!(points.iter().all(|p| p.coords().iter().all(|&c| (-1.0..1.0).contains(&c))));
/// ```
pub fn generate_random_points<T: CoordinateScalar + SampleUniform, const D: usize>(
    n_points: usize,
    range: (T, T),
) -> Result<Vec<Point<T, D>>, RandomPointGenerationError> {
    validate_range(range)?;

    let mut rng = rand::rng();
    let points = (0..n_points)
        .map(|_| Point::new([T::zero(); D].map(|_| rng.random_range(range.0..range.1))))
        .collect();
    Ok(points)
}

/// Generate random points with a fixed seed.
///
/// The same `(n_points, range, seed)` always yields the same points, which is
/// what the deterministic test scenarios and benchmarks rely on.
///
/// # Errors
///
/// Returns `RandomPointGenerationError::InvalidRange` if `range.0 >= range.1`
/// or either bound is not finite.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::util::generate_random_points_seeded;
///
/// let a: Vec<Point<f64, 2>> = generate_random_points_seeded(10, (0.0, 1.0), 42).unwrap();
/// let b: Vec<Point<f64, 2>> = generate_random_points_seeded(10, (0.0, 1.0), 42).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn generate_random_points_seeded<T: CoordinateScalar + SampleUniform, const D: usize>(
    n_points: usize,
    range: (T, T),
    seed: u64,
) -> Result<Vec<Point<T, D>>, RandomPointGenerationError> {
    use rand::SeedableRng;

    validate_range(range)?;

    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(n_points);
    for _ in 0..n_points {
        let coords = [T::zero(); D].map(|_| rng.random_range(range.0..range.1));
        points.push(Point::new(coords));
    }
    Ok(points)
}

/// Generate points on a regular grid with `points_per_dim` samples per axis.
///
/// Points are emitted with the first axis varying fastest. Grids are the
/// canonical co-circular/co-spherical stress input for the strict in-sphere test.
///
/// # Errors
///
/// Returns `RandomPointGenerationError::InvalidRange` if `spacing` is not
/// positive and finite.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::point::Point;
/// use bowyer_watson::geometry::util::generate_grid_points;
///
/// let grid: Vec<Point<f64, 2>> = generate_grid_points(3, 1.0, [0.0, 0.0]).unwrap();
/// assert_eq!(grid.len(), 9);
/// assert_eq!(grid[1].to_array(), [1.0, 0.0]);
/// assert_eq!(grid[3].to_array(), [0.0, 1.0]);
/// ```
pub fn generate_grid_points<T: CoordinateScalar, const D: usize>(
    points_per_dim: usize,
    spacing: T,
    offset: [T; D],
) -> Result<Vec<Point<T, D>>, RandomPointGenerationError> {
    validate_range((T::zero(), spacing))?;

    let total = (0..D).try_fold(1_usize, |acc, _| acc.checked_mul(points_per_dim));
    let Some(total) = total else {
        return Err(RandomPointGenerationError::InvalidRange {
            min: "0".to_string(),
            max: format!("{points_per_dim}^{D}"),
        });
    };

    let mut points = Vec::with_capacity(total);
    let mut counter = [0_usize; D];
    for _ in 0..total {
        let mut coords = offset;
        for (axis, &step) in counter.iter().enumerate() {
            let step: T = cast(step).unwrap_or_else(T::zero);
            coords[axis] = coords[axis] + step * spacing;
        }
        points.push(Point::new(coords));

        // Mixed-radix increment.
        for digit in &mut counter {
            *digit += 1;
            if *digit < points_per_dim {
                break;
            }
            *digit = 0;
        }
    }
    Ok(points)
}
