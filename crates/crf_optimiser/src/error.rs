//! Optimiser-specific error types.
//!
//! This module provides structured error handling for the minimisation
//! engine with diagnostic information for each failure mode. Lower-layer
//! errors from `crf_core` (dimension mismatches, non-finite values) convert
//! automatically via `From`.

use crf_core::types::{AlgebraError, InfinityError};
use thiserror::Error;

/// Errors that can occur during function minimisation.
///
/// All variants are unrecoverable at the point they occur: the engine
/// performs no retries, and a failed `run()` leaves no partial result.
///
/// # Variants
///
/// - `NotCalculated`: Result accessor called before a successful run
/// - `LineSearchFailed`: No decreasing step exists along the search direction
/// - `MaxIterationsExceeded`: Configured iteration cap was exhausted
/// - `InvariantViolation`: Internal bookkeeping defect (not a user error)
/// - `Algebra`: Wrapped dimension mismatch from a vector primitive
/// - `NonFinite`: Wrapped finite-value check failure
///
/// # Examples
///
/// ```
/// use crf_optimiser::OptimiserError;
///
/// let err = OptimiserError::NotCalculated;
/// assert!(format!("{}", err).contains("has not completed"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// Result accessor called before a successful run completed.
    #[error("Result not available: run() has not completed successfully")]
    NotCalculated,

    /// Line search could not find any step with sufficient decrease.
    #[error("Line search failed: no sufficient decrease along the search direction (last step tried: {final_step:e})")]
    LineSearchFailed {
        /// The smallest step length that was tried before giving up
        final_step: f64,
    },

    /// Configured iteration cap exhausted before convergence.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations performed
        iterations: usize,
    },

    /// Internal bookkeeping defect; indicates a bug, not a user error.
    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),

    /// Wrapped dimension mismatch from a vector algebra primitive.
    #[error("Algebra error: {0}")]
    Algebra(#[from] AlgebraError),

    /// Wrapped finite-value check failure.
    #[error("Non-finite value: {0}")]
    NonFinite(#[from] InfinityError),
}

impl OptimiserError {
    /// Create a line search failure error.
    pub fn line_search_failed(final_step: f64) -> Self {
        Self::LineSearchFailed { final_step }
    }

    /// Create a max iterations exceeded error.
    pub fn max_iterations_exceeded(iterations: usize) -> Self {
        Self::MaxIterationsExceeded { iterations }
    }

    /// Create an internal invariant violation error.
    pub fn invariant_violation(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Check if this is a not-calculated error.
    pub fn is_not_calculated(&self) -> bool {
        matches!(self, Self::NotCalculated)
    }

    /// Check if this is a line search failure.
    pub fn is_line_search_failed(&self) -> bool {
        matches!(self, Self::LineSearchFailed { .. })
    }

    /// Check if this is a max iterations exceeded error.
    pub fn is_max_iterations_exceeded(&self) -> bool {
        matches!(self, Self::MaxIterationsExceeded { .. })
    }

    /// Check if this is an internal invariant violation.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, Self::InvariantViolation(_))
    }
}
