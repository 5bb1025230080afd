//! Finite-value guards.
//!
//! Numerically delicate iterations can silently produce infinities or NaN
//! through divisions and cumulative drift. [`FiniteChecker`] verifies that
//! scalars and vectors are finite before they participate in further
//! computation, raising a classified [`InfinityError`] otherwise.
//!
//! Checks chain through `?` in a single logical statement:
//!
//! ```
//! use crf_core::math::finite::FiniteChecker;
//!
//! # fn demo() -> Result<(), crf_core::types::InfinityError> {
//! let value = 1.5;
//! let gradient = vec![0.25, -0.75];
//! FiniteChecker.check_scalar(value)?.check_vector(&gradient)?;
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

use crate::types::{InfinityError, InfinityErrorKind};

/// Stateless guard verifying that values are neither infinite nor NaN.
///
/// A zero-sized unit struct: it carries no state, is `Copy`, and is safe to
/// share across threads. Each check either returns the checker again (so
/// further checks can be chained with `?`) or fails with an
/// [`InfinityError`] classifying the violation. Successful checks have no
/// side effects.
///
/// # Example
///
/// ```
/// use crf_core::math::finite::FiniteChecker;
/// use crf_core::types::InfinityErrorKind;
///
/// let err = FiniteChecker.check_scalar(f64::NAN).unwrap_err();
/// assert_eq!(err.kind, InfinityErrorKind::ScalarNan);
///
/// let err = FiniteChecker.check_vector(&[0.0, f64::INFINITY]).unwrap_err();
/// assert_eq!(err.kind, InfinityErrorKind::VectorInfinite);
/// assert_eq!(err.index, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FiniteChecker;

impl FiniteChecker {
    /// Check that a single scalar is finite.
    ///
    /// # Returns
    ///
    /// * `Ok(FiniteChecker)` - The value is finite; chain further checks
    /// * `Err(InfinityError)` - The value is infinite or NaN
    pub fn check_scalar(self, value: f64) -> Result<Self, InfinityError> {
        if value.is_infinite() {
            return Err(InfinityError::scalar(InfinityErrorKind::ScalarInfinite));
        }
        if value.is_nan() {
            return Err(InfinityError::scalar(InfinityErrorKind::ScalarNan));
        }
        Ok(self)
    }

    /// Check that several scalars are all finite.
    ///
    /// Values are checked in order; the first violation wins.
    pub fn check_scalars(self, values: &[f64]) -> Result<Self, InfinityError> {
        for &value in values {
            self.check_scalar(value)?;
        }
        Ok(self)
    }

    /// Check that every element of a vector is finite.
    ///
    /// # Returns
    ///
    /// * `Ok(FiniteChecker)` - All elements are finite; chain further checks
    /// * `Err(InfinityError)` - Some element is infinite or NaN; the error
    ///   records the index of the first offending element
    pub fn check_vector(self, vector: &[f64]) -> Result<Self, InfinityError> {
        for (index, &value) in vector.iter().enumerate() {
            if value.is_infinite() {
                return Err(InfinityError::vector(
                    InfinityErrorKind::VectorInfinite,
                    index,
                ));
            }
            if value.is_nan() {
                return Err(InfinityError::vector(InfinityErrorKind::VectorNan, index));
            }
        }
        Ok(self)
    }

    /// Check that every element of every given vector is finite.
    pub fn check_vectors(self, vectors: &[&[f64]]) -> Result<Self, InfinityError> {
        for vector in vectors {
            self.check_vector(vector)?;
        }
        Ok(self)
    }
}
