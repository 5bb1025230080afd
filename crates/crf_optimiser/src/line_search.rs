//! Step-length selection along a search direction.
//!
//! Given the current point and a (not necessarily normalised) search
//! direction, a [`LineSearch`] implementation picks a positive step length
//! `α` whose move `point + α·direction` achieves sufficient decrease in the
//! objective. [`ArmijoLineSearch`] implements the classic backtracking
//! scheme: start from a unit step and contract until the Armijo inequality
//!
//! ```text
//! f(x + α·d) ≤ f(x) + c·α·(∇f(x)·d)
//! ```
//!
//! holds. Failing to find any decreasing step is fatal for the caller and is
//! reported as [`OptimiserError::LineSearchFailed`].

use crate::error::OptimiserError;
use crate::function::DerivableFunction;
use crf_core::math::vector::{add, dot, scale};

/// Strategy choosing a step length along a descent direction.
pub trait LineSearch {
    /// Find a positive step length `α` with sufficient decrease.
    ///
    /// # Arguments
    ///
    /// * `function` - Objective being minimised
    /// * `point` - Current iterate
    /// * `direction` - Search direction from `point` (not necessarily normalised)
    ///
    /// # Returns
    ///
    /// * `Ok(α)` - A positive step length satisfying the decrease condition
    /// * `Err(OptimiserError::LineSearchFailed)` - No acceptable step exists
    fn find_step_length<F: DerivableFunction>(
        &self,
        function: &F,
        point: &[f64],
        direction: &[f64],
    ) -> Result<f64, OptimiserError>;
}

/// Configuration for Armijo backtracking.
///
/// # Fields
///
/// * `initial_step` - Step length tried first (1.0 suits quasi-Newton directions)
/// * `sufficient_decrease` - The Armijo constant `c` in `(0, 1)`
/// * `contraction` - Factor multiplying the step on each backtrack, in `(0, 1)`
/// * `max_backtracks` - Backtracking attempts before giving up
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmijoConfig {
    /// Step length tried first.
    pub initial_step: f64,
    /// Sufficient-decrease constant `c`.
    pub sufficient_decrease: f64,
    /// Step contraction factor per backtrack.
    pub contraction: f64,
    /// Maximum number of backtracking attempts.
    pub max_backtracks: usize,
}

impl Default for ArmijoConfig {
    fn default() -> Self {
        Self {
            initial_step: 1.0,
            sufficient_decrease: 1e-4,
            contraction: 0.5,
            max_backtracks: 60,
        }
    }
}

impl ArmijoConfig {
    /// Create a configuration with explicit decrease and contraction constants.
    ///
    /// # Panics
    ///
    /// Panics if either constant lies outside `(0, 1)`.
    pub fn new(sufficient_decrease: f64, contraction: f64) -> Self {
        assert!(
            sufficient_decrease > 0.0 && sufficient_decrease < 1.0,
            "sufficient_decrease must be in (0, 1)"
        );
        assert!(
            contraction > 0.0 && contraction < 1.0,
            "contraction must be in (0, 1)"
        );
        Self {
            sufficient_decrease,
            contraction,
            ..Default::default()
        }
    }
}

/// Backtracking line search enforcing the Armijo condition.
///
/// # Example
///
/// ```
/// use crf_optimiser::function::DerivableFunction;
/// use crf_optimiser::line_search::{ArmijoLineSearch, LineSearch};
///
/// /// f(x) = x², minimised along the downhill direction from x = 1
/// struct Square;
/// impl DerivableFunction for Square {
///     fn dimensionality(&self) -> usize {
///         1
///     }
///     fn value(&self, p: &[f64]) -> f64 {
///         p[0] * p[0]
///     }
///     fn gradient(&self, p: &[f64]) -> Vec<f64> {
///         vec![2.0 * p[0]]
///     }
/// }
///
/// let search = ArmijoLineSearch::with_defaults();
/// let step = search.find_step_length(&Square, &[1.0], &[-2.0]).unwrap();
/// assert!(step > 0.0);
/// // Sufficient decrease achieved
/// assert!(Square.value(&[1.0 - 2.0 * step]) < Square.value(&[1.0]));
/// ```
#[derive(Debug, Clone)]
pub struct ArmijoLineSearch {
    config: ArmijoConfig,
}

impl ArmijoLineSearch {
    /// Create a line search with the given configuration.
    pub fn new(config: ArmijoConfig) -> Self {
        Self { config }
    }

    /// Create a line search with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: ArmijoConfig::default(),
        }
    }

    /// Get the line search configuration.
    pub fn config(&self) -> &ArmijoConfig {
        &self.config
    }
}

impl Default for ArmijoLineSearch {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl LineSearch for ArmijoLineSearch {
    fn find_step_length<F: DerivableFunction>(
        &self,
        function: &F,
        point: &[f64],
        direction: &[f64],
    ) -> Result<f64, OptimiserError> {
        let value_at_point = function.value(point);
        let gradient = function.gradient(point);
        let directional_derivative = dot(&gradient, direction)?;

        let mut step = self.config.initial_step;
        for _ in 0..self.config.max_backtracks {
            let trial = add(point, &scale(step, direction))?;
            let trial_value = function.value(&trial);
            let required =
                value_at_point + self.config.sufficient_decrease * step * directional_derivative;
            if trial_value <= required {
                return Ok(step);
            }
            step *= self.config.contraction;
        }

        Err(OptimiserError::line_search_failed(step))
    }
}
