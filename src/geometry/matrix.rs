//! Matrix operations.
//!
//! Small, stack-allocated linear algebra helpers built on `la-stack`, used by the
//! circumsphere solve and the orientation predicate.

#![forbid(unsafe_code)]

use la_stack::{LaError, Matrix as LaMatrix};

/// Internal linear algebra matrix type used by this crate for fixed-size operations.
pub type Matrix<const D: usize> = LaMatrix<D>;

#[inline]
pub(crate) fn matrix_set<const D: usize>(m: &mut Matrix<D>, r: usize, c: usize, value: f64) {
    let ok = m.set(r, c, value);
    assert!(ok, "matrix index out of bounds: ({r}, {c}) for {D}x{D}");
}

/// Builds the `D×D` matrix whose row `i` is `rows[i]`.
#[must_use]
pub fn matrix_from_rows<const D: usize>(rows: &[[f64; D]; D]) -> Matrix<D> {
    let mut m = Matrix::<D>::zero();
    for (r, row) in rows.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            matrix_set(&mut m, r, c, value);
        }
    }
    m
}

/// Compute an LU-based determinant, returning 0.0 for singular matrices.
///
/// # Examples
///
/// ```rust
/// use bowyer_watson::geometry::matrix::{determinant, Matrix};
///
/// let m = Matrix::<2>::zero();
/// assert_eq!(determinant(&m), 0.0);
/// ```
#[inline]
#[must_use]
pub fn determinant<const D: usize>(m: &Matrix<D>) -> f64 {
    match m.det(0.0) {
        Ok(det) => det,
        Err(LaError::Singular { .. }) => 0.0,
        Err(LaError::NonFinite { .. }) => f64::NAN,
    }
}
