//! Scalar coordinate abstraction for geometric computations.
//!
//! Points are generic over a floating-point scalar `T`. Every scalar type used
//! with this crate implements [`CoordinateScalar`], which bundles the numeric,
//! formatting, threading, and serialization bounds the rest of the crate relies
//! on. Linear solves are carried out in `f64` (the `la-stack` backend is
//! `f64`-only), so this module also provides the checked conversions between `T`
//! and `f64` used at that boundary.
//!
//! # Examples
//!
//! ```rust
//! use bowyer_watson::geometry::traits::coordinate::{CoordinateScalar, scalar_to_f64};
//!
//! fn half<T: CoordinateScalar>(value: T) -> f64 {
//!     scalar_to_f64(value).unwrap() / 2.0
//! }
//!
//! assert_eq!(half(3.0_f32), 1.5);
//! assert_eq!(f64::default_tolerance(), 1e-15);
//! ```

use num_traits::{Float, cast};
use serde::{Serialize, de::DeserializeOwned};
use std::fmt::Debug;

/// Errors that can occur while converting coordinates between scalar types.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoordinateConversionError {
    /// The value could not be represented in the target type.
    #[error(
        "Failed to convert coordinate at index {coordinate_index} from {from_type} to {to_type}: {coordinate_value}"
    )]
    ConversionFailed {
        /// Index of the coordinate that failed to convert
        coordinate_index: usize,
        /// String representation of the problematic coordinate value
        coordinate_value: String,
        /// Source type name
        from_type: &'static str,
        /// Target type name
        to_type: &'static str,
    },
    /// Non-finite value (NaN or infinity) encountered during conversion.
    #[error(
        "Non-finite value (NaN or infinity) at coordinate index {coordinate_index}: {coordinate_value}"
    )]
    NonFiniteValue {
        /// Index of the coordinate that contains the non-finite value
        coordinate_index: usize,
        /// String representation of the non-finite coordinate value
        coordinate_value: String,
    },
}

/// Default tolerance for `f32` comparisons.
pub const DEFAULT_TOLERANCE_F32: f32 = 1e-6;

/// Default tolerance for `f64` comparisons.
pub const DEFAULT_TOLERANCE_F64: f64 = 1e-15;

/// Trait alias for the scalar type of point coordinates.
///
/// Requires:
/// - `Float`: floating-point arithmetic (includes `NumCast`)
/// - `Default`, `Debug`
/// - `Send + Sync + 'static`
/// - `Serialize`, `DeserializeOwned`
pub trait CoordinateScalar:
    Float + Default + Debug + Send + Sync + Serialize + DeserializeOwned + 'static
{
    /// Returns the default comparison tolerance for this scalar type.
    ///
    /// - `f32`: `1e-6`
    /// - `f64`: `1e-15`
    fn default_tolerance() -> Self;
}

impl CoordinateScalar for f32 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F32
    }
}

impl CoordinateScalar for f64 {
    fn default_tolerance() -> Self {
        DEFAULT_TOLERANCE_F64
    }
}

/// Converts a single scalar to `f64`, rejecting non-finite values.
///
/// # Errors
///
/// Returns [`CoordinateConversionError::NonFiniteValue`] for NaN or infinity and
/// [`CoordinateConversionError::ConversionFailed`] if the cast itself fails.
pub fn scalar_to_f64<T: CoordinateScalar>(value: T) -> Result<f64, CoordinateConversionError> {
    if !value.is_finite() {
        return Err(CoordinateConversionError::NonFiniteValue {
            coordinate_index: 0,
            coordinate_value: format!("{value:?}"),
        });
    }
    cast(value).ok_or_else(|| CoordinateConversionError::ConversionFailed {
        coordinate_index: 0,
        coordinate_value: format!("{value:?}"),
        from_type: std::any::type_name::<T>(),
        to_type: "f64",
    })
}

/// Converts an `f64` back into the coordinate scalar type.
///
/// # Errors
///
/// Returns [`CoordinateConversionError::NonFiniteValue`] if `value` is NaN or
/// infinite, or [`CoordinateConversionError::ConversionFailed`] if `T` cannot
/// represent it.
pub fn scalar_from_f64<T: CoordinateScalar>(value: f64) -> Result<T, CoordinateConversionError> {
    if !value.is_finite() {
        return Err(CoordinateConversionError::NonFiniteValue {
            coordinate_index: 0,
            coordinate_value: format!("{value:?}"),
        });
    }
    let converted: T = cast(value).ok_or_else(|| CoordinateConversionError::ConversionFailed {
        coordinate_index: 0,
        coordinate_value: format!("{value:?}"),
        from_type: "f64",
        to_type: std::any::type_name::<T>(),
    })?;
    if converted.is_finite() {
        Ok(converted)
    } else {
        Err(CoordinateConversionError::ConversionFailed {
            coordinate_index: 0,
            coordinate_value: format!("{value:?}"),
            from_type: "f64",
            to_type: std::any::type_name::<T>(),
        })
    }
}

/// Converts a coordinate array to `f64`, reporting the failing index.
///
/// # Errors
///
/// Returns the first conversion error, with `coordinate_index` set to the
/// offending axis.
pub fn coords_to_f64<T: CoordinateScalar, const D: usize>(
    coords: &[T; D],
) -> Result<[f64; D], CoordinateConversionError> {
    let mut out = [0.0_f64; D];
    for (axis, (slot, &value)) in out.iter_mut().zip(coords).enumerate() {
        *slot = scalar_to_f64(value).map_err(|err| match err {
            CoordinateConversionError::ConversionFailed {
                coordinate_value,
                from_type,
                to_type,
                ..
            } => CoordinateConversionError::ConversionFailed {
                coordinate_index: axis,
                coordinate_value,
                from_type,
                to_type,
            },
            CoordinateConversionError::NonFiniteValue {
                coordinate_value, ..
            } => CoordinateConversionError::NonFiniteValue {
                coordinate_index: axis,
                coordinate_value,
            },
        })?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tolerances_match_precision() {
        assert!(f32::default_tolerance() > 0.0);
        assert!(f64::default_tolerance() < 1e-12);
    }

    #[test]
    fn scalar_round_trip_through_f64() {
        let value = scalar_to_f64(2.5_f32).unwrap();
        assert!((value - 2.5).abs() < f64::EPSILON);
        let back: f32 = scalar_from_f64(value).unwrap();
        assert!((back - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn non_finite_values_are_rejected() {
        assert!(matches!(
            scalar_to_f64(f64::NAN),
            Err(CoordinateConversionError::NonFiniteValue { .. })
        ));
        assert!(matches!(
            scalar_from_f64::<f64>(f64::INFINITY),
            Err(CoordinateConversionError::NonFiniteValue { .. })
        ));
    }

    #[test]
    fn f64_overflowing_f32_is_a_conversion_failure() {
        let result = scalar_from_f64::<f32>(1e300);
        assert!(result.is_err());
    }

    #[test]
    fn coords_to_f64_reports_failing_axis() {
        let err = coords_to_f64(&[1.0, f64::NAN, 3.0]).unwrap_err();
        assert_eq!(
            err,
            CoordinateConversionError::NonFiniteValue {
                coordinate_index: 1,
                coordinate_value: "NaN".to_string(),
            }
        );
    }
}
