//! Triangulation configuration.
//!
//! [`TriangulationConfig`] collects the numeric knobs of a triangulation run.
//! Build one with [`TriangulationConfigBuilder`] (fields left unset take their
//! defaults, and `build()` rejects out-of-range values) or start from a preset in
//! [`config_presets`].
//!
//! # Examples
//!
//! ```rust
//! use bowyer_watson::core::config::{TriangulationConfig, TriangulationConfigBuilder};
//!
//! let config: TriangulationConfig<f64> = TriangulationConfigBuilder::default()
//!     .sentinel_margin_factor(5000.0)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.sentinel_margin_factor, 5000.0);
//! assert_eq!(config.degeneracy_tolerance, 1e-10);
//!
//! assert!(TriangulationConfigBuilder::<f64>::default()
//!     .sentinel_margin_factor(0.5)
//!     .build()
//!     .is_err());
//! ```

use num_traits::cast;

use crate::geometry::traits::coordinate::CoordinateScalar;

/// Default sentinel margin, as a multiple of the input's longest bounding-box edge.
///
/// A sentinel-incident circumsphere cuts into the input hull by roughly
/// `longest_edge / factor`; an input point closer than that to a hull facet loses
/// the hull simplex over that facet.
pub const DEFAULT_SENTINEL_MARGIN_FACTOR: f64 = 1.0e6;

/// Default relative tolerance for the up-front affine rank check.
pub const DEFAULT_DEGENERACY_TOLERANCE: f64 = 1e-10;

/// Default relative tolerance (times r²) for Delaunay validation.
pub const DEFAULT_VALIDATION_TOLERANCE: f64 = 1e-10;

fn default_scalar<T: CoordinateScalar>(value: f64) -> T {
    cast(value).unwrap_or_else(T::default_tolerance)
}

/// Numeric configuration for one triangulation run.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct TriangulationConfig<T>
where
    T: CoordinateScalar,
{
    /// Sentinels sit at `bbox.enlarged(sentinel_margin_factor * bbox.longest_edge())`.
    ///
    /// Larger margins keep sentinel-incident circumspheres from cutting into the
    /// convex hull of the input. Must be finite and at least 1.
    #[builder(default = "default_scalar(DEFAULT_SENTINEL_MARGIN_FACTOR)")]
    pub sentinel_margin_factor: T,

    /// Relative tolerance (times the longest bounding-box edge) below which a
    /// direction is considered absent in the affine rank check. Must be finite
    /// and non-negative.
    #[builder(default = "default_scalar(DEFAULT_DEGENERACY_TOLERANCE)")]
    pub degeneracy_tolerance: T,

    /// Relative tolerance (times r²) below which an in-circumsphere excess is not
    /// reported as a Delaunay violation. Must be finite and non-negative.
    #[builder(default = "default_scalar(DEFAULT_VALIDATION_TOLERANCE)")]
    pub validation_tolerance: T,
}

impl<T> TriangulationConfigBuilder<T>
where
    T: CoordinateScalar,
{
    fn validate(&self) -> Result<(), String> {
        if let Some(factor) = self.sentinel_margin_factor
            && !(factor.is_finite() && factor >= T::one())
        {
            return Err(format!(
                "sentinel_margin_factor must be finite and >= 1, got {factor:?}"
            ));
        }
        for (name, value) in [
            ("degeneracy_tolerance", self.degeneracy_tolerance),
            ("validation_tolerance", self.validation_tolerance),
        ] {
            if let Some(value) = value
                && !(value.is_finite() && value >= T::zero())
            {
                return Err(format!("{name} must be finite and >= 0, got {value:?}"));
            }
        }
        Ok(())
    }
}

impl<T> Default for TriangulationConfig<T>
where
    T: CoordinateScalar,
{
    fn default() -> Self {
        config_presets::general_triangulation()
    }
}

/// Preset configurations.
pub mod config_presets {
    use super::{
        DEFAULT_DEGENERACY_TOLERANCE, DEFAULT_SENTINEL_MARGIN_FACTOR,
        DEFAULT_VALIDATION_TOLERANCE, TriangulationConfig, default_scalar,
    };
    use crate::geometry::traits::coordinate::CoordinateScalar;

    /// Configuration for general-purpose triangulation.
    #[must_use]
    pub fn general_triangulation<T: CoordinateScalar>() -> TriangulationConfig<T> {
        TriangulationConfig {
            sentinel_margin_factor: default_scalar(DEFAULT_SENTINEL_MARGIN_FACTOR),
            degeneracy_tolerance: default_scalar(DEFAULT_DEGENERACY_TOLERANCE),
            validation_tolerance: default_scalar(DEFAULT_VALIDATION_TOLERANCE),
        }
    }

    /// Pushes the sentinels ten times further out, for inputs with points lying
    /// extremely close to their hull facets.
    #[must_use]
    pub fn tight_hull<T: CoordinateScalar>() -> TriangulationConfig<T> {
        TriangulationConfig {
            sentinel_margin_factor: default_scalar(1.0e7),
            ..general_triangulation()
        }
    }

    /// Only rejects exactly (or nearly exactly) degenerate input.
    #[must_use]
    pub fn strict_degeneracy<T: CoordinateScalar>() -> TriangulationConfig<T> {
        TriangulationConfig {
            degeneracy_tolerance: default_scalar(1.0e-14),
            ..general_triangulation()
        }
    }
}
