//! Axis-aligned bounding boxes in D dimensions.
//!
//! Used to size the sentinel simplices that seed the triangulation and to scale
//! degeneracy tolerances to the input.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::geometry::point::Point;
use crate::geometry::traits::coordinate::CoordinateScalar;
use crate::geometry::util::GeometryError;

/// A D-dimensional axis-aligned bounding box.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::bounding_box::BoundingBox;
/// use bowyer_watson::geometry::point::Point;
///
/// let bbox = BoundingBox::from_points(&[Point::new([0.0, 1.0]), Point::new([3.0, -1.0])]).unwrap();
/// assert_eq!(bbox.min().to_array(), [0.0, -1.0]);
/// assert_eq!(bbox.max().to_array(), [3.0, 1.0]);
/// assert_eq!(bbox.longest_edge(), 3.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(bound = "T: CoordinateScalar")]
pub struct BoundingBox<T, const D: usize>
where
    T: CoordinateScalar,
{
    min: Point<T, D>,
    max: Point<T, D>,
}

impl<T, const D: usize> BoundingBox<T, D>
where
    T: CoordinateScalar,
{
    /// Number of corners of the box (`2^D`).
    pub const CORNER_COUNT: usize = 1 << D;

    /// Creates a box from two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: &Point<T, D>, b: &Point<T, D>) -> Self {
        let mut min = [T::zero(); D];
        let mut max = [T::zero(); D];
        for axis in 0..D {
            min[axis] = a.coords()[axis].min(b.coords()[axis]);
            max[axis] = a.coords()[axis].max(b.coords()[axis]);
        }
        Self {
            min: Point::new(min),
            max: Point::new(max),
        }
    }

    /// Smallest box containing every point.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::EmptyPointSet`] if `points` is empty.
    pub fn from_points(points: &[Point<T, D>]) -> Result<Self, GeometryError> {
        let (first, rest) = points.split_first().ok_or(GeometryError::EmptyPointSet)?;
        let mut bbox = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            bbox = bbox.expand_to_include(p);
        }
        Ok(bbox)
    }

    /// Returns the smallest box containing `self` and `point`.
    #[must_use]
    pub fn expand_to_include(&self, point: &Point<T, D>) -> Self {
        let mut min = self.min.to_array();
        let mut max = self.max.to_array();
        for axis in 0..D {
            min[axis] = min[axis].min(point.coords()[axis]);
            max[axis] = max[axis].max(point.coords()[axis]);
        }
        Self {
            min: Point::new(min),
            max: Point::new(max),
        }
    }

    /// Minimum corner.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> &Point<T, D> {
        &self.min
    }

    /// Maximum corner.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> &Point<T, D> {
        &self.max
    }

    /// Per-axis extent `max - min`.
    #[must_use]
    pub fn extent(&self) -> [T; D] {
        self.max.difference(&self.min)
    }

    /// Largest per-axis extent.
    #[must_use]
    pub fn longest_edge(&self) -> T {
        self.extent()
            .iter()
            .fold(T::zero(), |longest, &e| longest.max(e))
    }

    /// Grows the box additively by `amount` on every side of every axis.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::geometry::bounding_box::BoundingBox;
    /// use bowyer_watson::geometry::point::Point;
    ///
    /// let bbox = BoundingBox::from_corners(&Point::new([0.0, 0.0]), &Point::new([1.0, 2.0]));
    /// let grown = bbox.enlarged(10.0);
    /// assert_eq!(grown.min().to_array(), [-10.0, -10.0]);
    /// assert_eq!(grown.max().to_array(), [11.0, 12.0]);
    /// ```
    #[must_use]
    pub fn enlarged(&self, amount: T) -> Self {
        let mut min = self.min.to_array();
        let mut max = self.max.to_array();
        for axis in 0..D {
            min[axis] = min[axis] - amount;
            max[axis] = max[axis] + amount;
        }
        Self {
            min: Point::new(min),
            max: Point::new(max),
        }
    }

    /// Closed containment test.
    #[must_use]
    pub fn contains(&self, point: &Point<T, D>) -> bool {
        (0..D).all(|axis| {
            let c = point.coords()[axis];
            c >= self.min.coords()[axis] && c <= self.max.coords()[axis]
        })
    }

    /// Corner `index` of the box: bit `i` of `index` selects `max` on axis `i`.
    #[must_use]
    pub fn corner(&self, index: usize) -> Point<T, D> {
        let mut coords = [T::zero(); D];
        for (axis, slot) in coords.iter_mut().enumerate() {
            *slot = if index & (1 << axis) == 0 {
                self.min.coords()[axis]
            } else {
                self.max.coords()[axis]
            };
        }
        Point::new(coords)
    }

    /// All `2^D` corners, ordered by [`corner`](Self::corner) index.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::geometry::bounding_box::BoundingBox;
    /// use bowyer_watson::geometry::point::Point;
    ///
    /// let bbox = BoundingBox::from_corners(&Point::new([0.0, 0.0]), &Point::new([1.0, 1.0]));
    /// let corners: Vec<[f64; 2]> = bbox.corners().iter().map(|p| p.to_array()).collect();
    /// assert_eq!(corners, vec![[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]);
    /// ```
    #[must_use]
    pub fn corners(&self) -> Vec<Point<T, D>> {
        (0..Self::CORNER_COUNT).map(|i| self.corner(i)).collect()
    }
}
