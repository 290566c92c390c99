//! Data and operations on d-dimensional points.
//!
//! A [`Point`] is an immutable coordinate array. Points are referenced by the
//! triangulation only through their index in a vertex store, so the type stays
//! small and `Copy`.
//!
//! Ordering: [`Point::lexicographic_cmp`] compares coordinates axis by axis
//! (x first). This is the insertion order used by the triangulation driver.

#![forbid(unsafe_code)]

use crate::geometry::traits::coordinate::CoordinateScalar;
use serde::de::{Error, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A point in D-dimensional space with scalar coordinates of type `T`.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::point::Point;
///
/// let p = Point::new([1.0, 2.0]);
/// assert_eq!(p.coords(), &[1.0, 2.0]);
/// assert_eq!(p.squared_distance(&Point::new([4.0, 6.0])), 25.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point<T, const D: usize>
where
    T: CoordinateScalar,
{
    coords: [T; D],
}

impl<T, const D: usize> Point<T, D>
where
    T: CoordinateScalar,
{
    /// Creates a point from its coordinates.
    #[inline]
    #[must_use]
    pub const fn new(coords: [T; D]) -> Self {
        Self { coords }
    }

    /// The origin of the coordinate system.
    #[must_use]
    pub fn origin() -> Self {
        Self::new([T::zero(); D])
    }

    /// Borrow the coordinate array.
    #[inline]
    #[must_use]
    pub const fn coords(&self) -> &[T; D] {
        &self.coords
    }

    /// Copy the coordinate array out.
    #[inline]
    #[must_use]
    pub fn to_array(&self) -> [T; D] {
        self.coords
    }

    /// Dimension of the point.
    #[inline]
    #[must_use]
    pub const fn dim(&self) -> usize {
        D
    }

    /// Returns the first non-finite axis, if any.
    #[must_use]
    pub fn first_non_finite_axis(&self) -> Option<usize> {
        self.coords.iter().position(|c| !c.is_finite())
    }

    /// `true` when every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.first_non_finite_axis().is_none()
    }

    /// Component-wise difference `self - other` as a coordinate array.
    #[must_use]
    pub fn difference(&self, other: &Self) -> [T; D] {
        let mut out = [T::zero(); D];
        for (slot, (&a, &b)) in out.iter_mut().zip(self.coords.iter().zip(&other.coords)) {
            *slot = a - b;
        }
        out
    }

    /// Squared Euclidean distance to `other`.
    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> T {
        self.coords
            .iter()
            .zip(&other.coords)
            .fold(T::zero(), |acc, (&a, &b)| {
                let d = a - b;
                acc + d * d
            })
    }

    /// Lexicographic comparison: x first, ties broken by y, then z.
    ///
    /// Incomparable (NaN) coordinates compare as equal; callers validate
    /// finiteness before sorting.
    #[must_use]
    pub fn lexicographic_cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.coords.iter().zip(&other.coords) {
            match a.partial_cmp(b) {
                Some(Ordering::Equal) | None => {}
                Some(ordering) => return ordering,
            }
        }
        Ordering::Equal
    }

    /// Projects the point onto its first `E` axes.
    ///
    /// Used to triangulate 3D host points on their x/y coordinates.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bowyer_watson::geometry::point::Point;
    ///
    /// let p = Point::new([1.0, 2.0, 3.0]);
    /// let q: Point<f64, 2> = p.project();
    /// assert_eq!(q.to_array(), [1.0, 2.0]);
    /// ```
    #[must_use]
    pub fn project<const E: usize>(&self) -> Point<T, E> {
        let mut coords = [T::zero(); E];
        for (slot, &value) in coords.iter_mut().zip(&self.coords) {
            *slot = value;
        }
        Point::new(coords)
    }
}

impl<T, const D: usize> From<[T; D]> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn from(coords: [T; D]) -> Self {
        Self::new(coords)
    }
}

impl<T, const D: usize> From<Point<T, D>> for [T; D]
where
    T: CoordinateScalar,
{
    fn from(point: Point<T, D>) -> Self {
        point.coords
    }
}

impl<T, const D: usize> From<&Point<T, D>> for [T; D]
where
    T: CoordinateScalar,
{
    fn from(point: &Point<T, D>) -> Self {
        point.coords
    }
}

// =============================================================================
// SERIALIZATION
// =============================================================================

impl<T, const D: usize> Serialize for Point<T, D>
where
    T: CoordinateScalar,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeTuple;
        let mut tuple = serializer.serialize_tuple(D)?;
        for coord in &self.coords {
            tuple.serialize_element(coord)?;
        }
        tuple.end()
    }
}

impl<'de, T, const D: usize> Deserialize<'de> for Point<T, D>
where
    T: CoordinateScalar,
{
    fn deserialize<DE>(deserializer: DE) -> Result<Self, DE::Error>
    where
        DE: serde::Deserializer<'de>,
    {
        struct ArrayVisitor<T, const D: usize>(PhantomData<T>);

        impl<'de, T, const D: usize> Visitor<'de> for ArrayVisitor<T, D>
        where
            T: CoordinateScalar,
        {
            type Value = Point<T, D>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_fmt(format_args!("an array of {D} coordinates"))
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut coords = [T::zero(); D];
                for (i, slot) in coords.iter_mut().enumerate() {
                    *slot = seq
                        .next_element()?
                        .ok_or_else(|| Error::invalid_length(i, &self))?;
                }
                if seq.next_element::<T>()?.is_some() {
                    return Err(Error::invalid_length(D + 1, &self));
                }
                Ok(Point::new(coords))
            }
        }

        deserializer.deserialize_tuple(D, ArrayVisitor::<T, D>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn point_accessors() {
        let p = Point::new([1.0, 2.0, 3.0]);
        assert_eq!(p.dim(), 3);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
        let arr: [f64; 3] = p.into();
        assert_eq!(arr, [1.0, 2.0, 3.0]);
        assert_eq!(Point::<f64, 2>::origin().to_array(), [0.0, 0.0]);
    }

    #[test]
    fn squared_distance_and_difference() {
        let a = Point::new([1.0_f32, 1.0, 1.0]);
        let b = Point::new([2.0_f32, 3.0, 3.0]);
        assert_relative_eq!(a.squared_distance(&b), 9.0);
        assert_eq!(b.difference(&a), [1.0, 2.0, 2.0]);
    }

    #[test]
    fn finiteness_checks() {
        assert!(Point::new([0.0, 1.0]).is_finite());
        let p = Point::new([0.0, f64::INFINITY, f64::NAN]);
        assert!(!p.is_finite());
        assert_eq!(p.first_non_finite_axis(), Some(1));
    }

    #[test]
    fn lexicographic_order_breaks_ties_on_later_axes() {
        let a = Point::new([0.0, 1.0]);
        let b = Point::new([0.0, 2.0]);
        let c = Point::new([-1.0, 5.0]);
        assert_eq!(a.lexicographic_cmp(&b), Ordering::Less);
        assert_eq!(b.lexicographic_cmp(&a), Ordering::Greater);
        assert_eq!(c.lexicographic_cmp(&a), Ordering::Less);
        assert_eq!(a.lexicographic_cmp(&a), Ordering::Equal);
    }

    #[test]
    fn projection_drops_trailing_axes() {
        let p = Point::new([3.0, 4.0, 5.0]);
        let q: Point<f64, 2> = p.project();
        assert_eq!(q, Point::new([3.0, 4.0]));
    }

    #[test]
    fn serde_uses_plain_arrays() {
        let p = Point::new([1.5, -2.0, 0.25]);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "[1.5,-2.0,0.25]");
        let back: Point<f64, 3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
        assert!(serde_json::from_str::<Point<f64, 3>>("[1.0,2.0]").is_err());
        assert!(serde_json::from_str::<Point<f64, 2>>("[1.0,2.0,3.0]").is_err());
    }
}
