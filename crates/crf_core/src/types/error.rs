//! Error types for structured error handling.
//!
//! This module provides:
//! - `AlgebraError`: Errors from vector algebra primitives
//! - `InfinityError`: Errors from finite-value checks
//! - `InfinityErrorKind`: Classification of a finite-value violation

use thiserror::Error;

/// Vector algebra errors.
///
/// Provides structured error handling for the algebra primitives in
/// [`crate::math::vector`] with descriptive context for each failure mode.
///
/// # Variants
/// - `DimensionMismatch`: Vectors of unequal length passed to a primitive
///
/// # Examples
/// ```
/// use crf_core::types::AlgebraError;
///
/// let err = AlgebraError::DimensionMismatch { left: 3, right: 4 };
/// assert_eq!(format!("{}", err), "Dimension mismatch: left vector has length 3, right vector has length 4");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AlgebraError {
    /// Vectors of unequal length passed to an algebra primitive.
    #[error("Dimension mismatch: left vector has length {left}, right vector has length {right}")]
    DimensionMismatch {
        /// Length of the left operand
        left: usize,
        /// Length of the right operand
        right: usize,
    },
}

impl AlgebraError {
    /// Create a dimension mismatch error.
    pub fn dimension_mismatch(left: usize, right: usize) -> Self {
        Self::DimensionMismatch { left, right }
    }

    /// Check if this is a dimension mismatch.
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }
}

/// Classification of a finite-value violation.
///
/// Distinguishes the context of the failed check (scalar vs vector) and the
/// nature of the offending value (infinite vs NaN), replacing the ambiguous
/// boolean-flag encoding with four distinct cases.
///
/// # Variants
/// - `ScalarInfinite`: A checked scalar was positive or negative infinity
/// - `ScalarNan`: A checked scalar was NaN
/// - `VectorInfinite`: A checked vector element was positive or negative infinity
/// - `VectorNan`: A checked vector element was NaN
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfinityErrorKind {
    /// A checked scalar was positive or negative infinity.
    ScalarInfinite,
    /// A checked scalar was NaN.
    ScalarNan,
    /// A checked vector element was positive or negative infinity.
    VectorInfinite,
    /// A checked vector element was NaN.
    VectorNan,
}

impl InfinityErrorKind {
    /// Check if the violation occurred in a scalar-context check.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Self::ScalarInfinite | Self::ScalarNan)
    }

    /// Check if the violation occurred in a vector-context check.
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::VectorInfinite | Self::VectorNan)
    }

    /// Check if the offending value was NaN (as opposed to infinite).
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::ScalarNan | Self::VectorNan)
    }
}

/// Finite-value check error.
///
/// Raised by [`crate::math::finite::FiniteChecker`] when a value that must be
/// finite turns out to be infinite or NaN. Carries enough detail to diagnose
/// which computation produced the bad value.
///
/// # Examples
/// ```
/// use crf_core::types::{InfinityError, InfinityErrorKind};
///
/// let err = InfinityError::vector(InfinityErrorKind::VectorNan, 2);
/// assert!(err.kind.is_nan());
/// assert_eq!(err.index, Some(2));
/// assert!(format!("{}", err).contains("index 2"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfinityError {
    /// Classification of the violation.
    pub kind: InfinityErrorKind,
    /// Index of the offending element for vector-context checks.
    pub index: Option<usize>,
}

impl InfinityError {
    /// Create an error for a scalar-context violation.
    pub fn scalar(kind: InfinityErrorKind) -> Self {
        Self { kind, index: None }
    }

    /// Create an error for a vector-context violation at the given index.
    pub fn vector(kind: InfinityErrorKind, index: usize) -> Self {
        Self {
            kind,
            index: Some(index),
        }
    }
}

impl std::fmt::Display for InfinityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let what = if self.kind.is_nan() { "NaN" } else { "infinite value" };
        match (self.kind.is_vector(), self.index) {
            (true, Some(i)) => write!(f, "Non-finite check failed: {} in vector at index {}", what, i),
            (true, None) => write!(f, "Non-finite check failed: {} in vector", what),
            (false, _) => write!(f, "Non-finite check failed: scalar is {}", what),
        }
    }
}

impl std::error::Error for InfinityError {}
