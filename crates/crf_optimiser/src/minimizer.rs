//! L-BFGS minimisation engine.
//!
//! This module provides [`LbfgsMinimizer`], an unconstrained minimiser using
//! the limited-memory BFGS quasi-Newton method.
//!
//! # Algorithm
//!
//! BFGS approximates Newton's method by maintaining an approximation of the
//! inverse Hessian. The limited-memory variant never materialises that
//! matrix: it reconstructs the inverse-Hessian-vector product from a bounded
//! window of the last *m* `(Δpoint, Δgradient)` pairs via the two-loop
//! recursion, costing `O(m·n)` arithmetic and memory instead of `O(n²)`.
//!
//! Each iteration:
//!
//! ```text
//! d = −H⁻¹_approx · ∇f(x)      (two-loop recursion over the history window)
//! α = line_search(f, x, d)
//! x ← x + α·d
//! push (Δx, Δ∇f) into the history window
//! ```
//!
//! until `‖∇f(x)‖² ≤ threshold²`. The method is described in Nocedal &
//! Wright, *Numerical Optimization*, chapter on large-scale quasi-Newton
//! methods.

use crate::error::OptimiserError;
use crate::function::{CachedFunction, DerivableFunction};
use crate::history::{HistoryWindow, IterationRecord};
use crate::line_search::{ArmijoLineSearch, LineSearch};
use crf_core::math::finite::FiniteChecker;
use crf_core::math::vector::{add, dot, norm_squared, safe_divide, scale, subtract};

/// Configuration for the L-BFGS minimiser.
///
/// # Fields
///
/// * `history_size` - Number of previous iterations to memorise (*m*)
/// * `convergence_threshold` - Gradient-norm stopping tolerance
/// * `max_iterations` - Optional iteration cap; `None` runs to convergence
///
/// # Example
///
/// ```
/// use crf_optimiser::minimizer::LbfgsConfig;
///
/// let config = LbfgsConfig::default();
/// assert_eq!(config.history_size, 20);
/// assert_eq!(config.convergence_threshold, 0.01);
/// assert_eq!(config.max_iterations, None);
///
/// let capped = LbfgsConfig::new(10, 1e-4).with_max_iterations(500);
/// assert_eq!(capped.max_iterations, Some(500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LbfgsConfig {
    /// Number of `(Δpoint, Δgradient)` pairs to memorise.
    pub history_size: usize,
    /// Convergence tolerance on the gradient norm.
    ///
    /// The engine stops when `‖gradient‖² ≤ threshold²`.
    pub convergence_threshold: f64,
    /// Optional iteration cap.
    ///
    /// `None` (the default) preserves run-to-convergence semantics: a
    /// non-converging objective loops forever. `Some(k)` makes `run()` fail
    /// with [`OptimiserError::MaxIterationsExceeded`] after `k` iterations.
    pub max_iterations: Option<usize>,
}

impl Default for LbfgsConfig {
    /// Default configuration: history of 20 pairs, gradient tolerance 0.01,
    /// no iteration cap.
    fn default() -> Self {
        Self {
            history_size: 20,
            convergence_threshold: 0.01,
            max_iterations: None,
        }
    }
}

impl LbfgsConfig {
    /// Create a configuration with the given history size and tolerance.
    ///
    /// # Panics
    ///
    /// Panics if `history_size == 0` or `convergence_threshold <= 0`.
    pub fn new(history_size: usize, convergence_threshold: f64) -> Self {
        assert!(history_size > 0, "history_size must be > 0");
        assert!(
            convergence_threshold > 0.0,
            "convergence_threshold must be positive"
        );
        Self {
            history_size,
            convergence_threshold,
            max_iterations: None,
        }
    }

    /// Set an iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }
}

/// L-BFGS unconstrained minimiser.
///
/// Owns the objective function (wrapped in a last-evaluation cache), the
/// line search strategy, and all per-run state. Minimisation starts from the
/// zero vector of the function's declared dimensionality and iterates until
/// the gradient norm falls below the configured tolerance.
///
/// Results are gated: [`value`](Self::value) and [`point`](Self::point)
/// return [`OptimiserError::NotCalculated`] until a [`run`](Self::run)
/// completes successfully.
///
/// # Example
///
/// ```
/// use crf_optimiser::prelude::*;
///
/// // f(x) = (x₀ - 3)² + (x₁ + 2)²
/// struct Paraboloid;
/// impl DerivableFunction for Paraboloid {
///     fn dimensionality(&self) -> usize {
///         2
///     }
///     fn value(&self, p: &[f64]) -> f64 {
///         (p[0] - 3.0).powi(2) + (p[1] + 2.0).powi(2)
///     }
///     fn gradient(&self, p: &[f64]) -> Vec<f64> {
///         vec![2.0 * (p[0] - 3.0), 2.0 * (p[1] + 2.0)]
///     }
/// }
///
/// let mut minimizer = LbfgsMinimizer::new(Paraboloid);
/// assert!(minimizer.value().is_err()); // nothing calculated yet
///
/// minimizer.run().unwrap();
/// assert!(minimizer.value().unwrap() < 1e-4);
/// let point = minimizer.point().unwrap();
/// assert!((point[0] - 3.0).abs() < 0.01);
/// assert!((point[1] + 2.0).abs() < 0.01);
/// ```
pub struct LbfgsMinimizer<F, L = ArmijoLineSearch> {
    function: CachedFunction<F>,
    line_search: L,
    config: LbfgsConfig,
    history: HistoryWindow,
    point: Vec<f64>,
    value: f64,
    iterations: usize,
    calculated: bool,
    observer: Option<Box<dyn FnMut(&[f64])>>,
}

impl<F: DerivableFunction> LbfgsMinimizer<F> {
    /// Create a minimiser with default configuration and Armijo line search.
    pub fn new(function: F) -> Self {
        Self::with_config(function, LbfgsConfig::default())
    }

    /// Create a minimiser with the given configuration and Armijo line search.
    pub fn with_config(function: F, config: LbfgsConfig) -> Self {
        Self::with_line_search(function, config, ArmijoLineSearch::with_defaults())
    }
}

impl<F: DerivableFunction, L: LineSearch> LbfgsMinimizer<F, L> {
    /// Create a minimiser with an explicit line search strategy.
    pub fn with_line_search(function: F, config: LbfgsConfig, line_search: L) -> Self {
        let history = HistoryWindow::new(config.history_size);
        Self {
            function: CachedFunction::new(function),
            line_search,
            config,
            history,
            point: Vec::new(),
            value: 0.0,
            iterations: 0,
            calculated: false,
            observer: None,
        }
    }

    /// Get the minimiser configuration.
    pub fn config(&self) -> &LbfgsConfig {
        &self.config
    }

    /// Register an observer receiving the current point after every iteration.
    ///
    /// Diagnostic only; has no effect on the algorithm. Absence of an
    /// observer (the default) is side-effect free.
    pub fn set_observer(&mut self, observer: impl FnMut(&[f64]) + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Number of iterations completed by the most recent run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Run the minimisation to convergence.
    ///
    /// Starts from the zero vector and iterates until
    /// `‖gradient‖² ≤ convergence_threshold²` (or the optional iteration cap
    /// is exhausted). On success the final point and value become queryable.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Converged; [`value`](Self::value) and
    ///   [`point`](Self::point) are now valid
    /// * `Err(OptimiserError)` - Line search failure, dimension mismatch,
    ///   non-finite value, internal invariant violation, or exhausted
    ///   iteration cap; no partial result is retained
    pub fn run(&mut self) -> Result<(), OptimiserError> {
        let dimensionality = self.function.dimensionality();
        self.calculated = false;
        self.iterations = 0;
        self.history = HistoryWindow::new(self.config.history_size);

        self.point = vec![0.0; dimensionality];
        self.value = self.function.value(&self.point);
        let mut gradient = self.function.gradient(&self.point);
        FiniteChecker.check_scalar(self.value)?.check_vector(&gradient)?;
        tracing::info!(value = self.value, "L-BFGS: initial value");

        let threshold_squared = self.config.convergence_threshold * self.config.convergence_threshold;
        while norm_squared(&gradient) > threshold_squared {
            if let Some(cap) = self.config.max_iterations {
                if self.iterations >= cap {
                    return Err(OptimiserError::max_iterations_exceeded(cap));
                }
            }
            tracing::debug!(
                gradient_norm_squared = norm_squared(&gradient),
                "L-BFGS: gradient norm square"
            );

            let previous_value = self.value;
            let previous_point = self.point.clone();
            let previous_gradient = gradient.clone();

            let direction = scale(-1.0, &self.two_loop_recursion(&gradient)?);
            FiniteChecker.check_vector(&direction)?;

            let step = self
                .line_search
                .find_step_length(&self.function, &self.point, &direction)?;
            self.point = add(&self.point, &scale(step, &direction))?;

            self.value = self.function.value(&self.point);
            gradient = self.function.gradient(&self.point);
            FiniteChecker.check_scalar(self.value)?.check_vector(&gradient)?;

            self.history.push(IterationRecord::new(
                subtract(&self.point, &previous_point)?,
                subtract(&gradient, &previous_gradient)?,
            ));
            if self.history.len() > self.config.history_size {
                return Err(OptimiserError::invariant_violation(
                    "history window exceeded its bound after eviction",
                ));
            }

            self.iterations += 1;
            if self.value > previous_value {
                tracing::warn!(
                    iteration = self.iterations,
                    value = self.value,
                    previous_value,
                    "L-BFGS: value did not decrease"
                );
            }
            tracing::info!(iteration = self.iterations, value = self.value, "L-BFGS iteration");
            if let Some(observer) = self.observer.as_mut() {
                observer(&self.point);
            }
        }

        self.calculated = true;
        Ok(())
    }

    /// Final value of the objective at the minimum.
    ///
    /// # Returns
    ///
    /// * `Ok(value)` - After a successful [`run`](Self::run)
    /// * `Err(OptimiserError::NotCalculated)` - Before one
    pub fn value(&self) -> Result<f64, OptimiserError> {
        if !self.calculated {
            return Err(OptimiserError::NotCalculated);
        }
        Ok(self.value)
    }

    /// Final point at which the minimum was attained.
    ///
    /// # Returns
    ///
    /// * `Ok(point)` - After a successful [`run`](Self::run)
    /// * `Err(OptimiserError::NotCalculated)` - Before one
    pub fn point(&self) -> Result<&[f64], OptimiserError> {
        if !self.calculated {
            return Err(OptimiserError::NotCalculated);
        }
        Ok(&self.point)
    }

    /// Compute `H⁻¹_approx · gradient` via the two-loop recursion.
    ///
    /// The first pass walks the history newest → oldest accumulating
    /// `(ρ, α)` per record; the second pass walks oldest → newest (the exact
    /// reverse) consuming them. A mismatch between the two passes is an
    /// internal defect and fails loudly. With an empty history the result is
    /// the gradient itself (`γ = 1`), so the caller's negation reduces to
    /// steepest descent.
    fn two_loop_recursion(&self, gradient: &[f64]) -> Result<Vec<f64>, OptimiserError> {
        let mut q = gradient.to_vec();
        let mut rho_alpha: Vec<(f64, f64)> = Vec::with_capacity(self.history.len());

        for record in self.history.iter_newest_first() {
            let rho = safe_divide(1.0, dot(record.gradient_delta(), record.point_delta())?);
            let alpha = rho * dot(record.point_delta(), &q)?;
            q = subtract(&q, &scale(alpha, record.gradient_delta()))?;
            rho_alpha.push((rho, alpha));
        }

        // Initial scaling from the most recent curvature pair
        let gamma = match self.history.newest() {
            Some(record) => safe_divide(
                dot(record.point_delta(), record.gradient_delta())?,
                dot(record.gradient_delta(), record.gradient_delta())?,
            ),
            None => 1.0,
        };
        let mut r = scale(gamma, &q);

        let mut pairs = rho_alpha.iter().rev();
        for record in self.history.iter_oldest_first() {
            let &(rho, alpha) = pairs.next().ok_or_else(|| {
                OptimiserError::invariant_violation(
                    "two-loop passes visited different record counts",
                )
            })?;
            let beta = rho * dot(record.gradient_delta(), &r)?;
            r = add(&r, &scale(alpha - beta, record.point_delta()))?;
        }
        if pairs.next().is_some() {
            return Err(OptimiserError::invariant_violation(
                "two-loop passes visited different record counts",
            ));
        }

        Ok(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// f(x) = Σ (xᵢ − tᵢ)²
    struct ShiftedQuadratic {
        target: Vec<f64>,
    }

    impl DerivableFunction for ShiftedQuadratic {
        fn dimensionality(&self) -> usize {
            self.target.len()
        }

        fn value(&self, point: &[f64]) -> f64 {
            point
                .iter()
                .zip(&self.target)
                .map(|(x, t)| (x - t) * (x - t))
                .sum()
        }

        fn gradient(&self, point: &[f64]) -> Vec<f64> {
            point
                .iter()
                .zip(&self.target)
                .map(|(x, t)| 2.0 * (x - t))
                .collect()
        }
    }

    /// f(x) = (x − 0.7)⁴, slow to converge near the minimum.
    struct Quartic;

    impl DerivableFunction for Quartic {
        fn dimensionality(&self) -> usize {
            1
        }

        fn value(&self, point: &[f64]) -> f64 {
            (point[0] - 0.7).powi(4)
        }

        fn gradient(&self, point: &[f64]) -> Vec<f64> {
            vec![4.0 * (point[0] - 0.7).powi(3)]
        }
    }

    // ========================================
    // LbfgsConfig Tests
    // ========================================

    #[test]
    fn test_config_default() {
        let config = LbfgsConfig::default();
        assert_eq!(config.history_size, 20);
        assert_relative_eq!(config.convergence_threshold, 0.01);
        assert_eq!(config.max_iterations, None);
    }

    #[test]
    fn test_config_new() {
        let config = LbfgsConfig::new(5, 1e-6);
        assert_eq!(config.history_size, 5);
        assert_relative_eq!(config.convergence_threshold, 1e-6);
    }

    #[test]
    fn test_config_with_max_iterations() {
        let config = LbfgsConfig::default().with_max_iterations(100);
        assert_eq!(config.max_iterations, Some(100));
    }

    #[test]
    #[should_panic(expected = "history_size must be > 0")]
    fn test_config_zero_history_panics() {
        let _ = LbfgsConfig::new(0, 0.01);
    }

    #[test]
    #[should_panic(expected = "convergence_threshold must be positive")]
    fn test_config_zero_threshold_panics() {
        let _ = LbfgsConfig::new(20, 0.0);
    }

    // ========================================
    // Two-Loop Recursion Tests
    // ========================================

    #[test]
    fn test_empty_history_reduces_to_gradient() {
        let minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![1.0, 2.0],
        });
        let gradient = [3.0, -4.0];
        let r = minimizer.two_loop_recursion(&gradient).unwrap();
        assert_eq!(r, vec![3.0, -4.0]);
    }

    #[test]
    fn test_single_identity_pair_keeps_gradient_scale() {
        // With s = y the pair encodes an identity Hessian: γ = 1 and the
        // correction terms cancel, so r must equal the gradient.
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![0.0, 0.0],
        });
        minimizer
            .history
            .push(IterationRecord::new(vec![1.0, 2.0], vec![1.0, 2.0]));

        let gradient = [0.5, -1.0];
        let r = minimizer.two_loop_recursion(&gradient).unwrap();
        for (a, b) in r.iter().zip(&gradient) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_scaled_pair_applies_inverse_curvature() {
        // s = [1, 0...], y = 2s encodes H = 2I along every direction the
        // pair spans: expect r ≈ g / 2.
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic { target: vec![0.0] });
        minimizer
            .history
            .push(IterationRecord::new(vec![1.0], vec![2.0]));

        let r = minimizer.two_loop_recursion(&[4.0]).unwrap();
        assert_relative_eq!(r[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_mismatched_history_dimensions_fail() {
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![0.0, 0.0],
        });
        minimizer
            .history
            .push(IterationRecord::new(vec![1.0], vec![1.0]));

        let result = minimizer.two_loop_recursion(&[1.0, 2.0]);
        assert!(matches!(result, Err(OptimiserError::Algebra(_))));
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_zero_start_already_converged() {
        // f(x) = ‖x‖² has zero gradient at the zero start point.
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![0.0, 0.0, 0.0],
        });
        minimizer.run().unwrap();
        assert_eq!(minimizer.value().unwrap(), 0.0);
        assert_eq!(minimizer.point().unwrap(), &[0.0, 0.0, 0.0]);
        assert_eq!(minimizer.iterations(), 0);
    }

    #[test]
    fn test_paraboloid_converges() {
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![3.0, -2.0],
        });
        minimizer.run().unwrap();

        let point = minimizer.point().unwrap();
        assert!((point[0] - 3.0).abs() < 0.01);
        assert!((point[1] + 2.0).abs() < 0.01);
        assert!(minimizer.value().unwrap() < 1e-3);
        assert!(minimizer.iterations() >= 1);
    }

    #[test]
    fn test_rerun_is_consistent() {
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![1.0, 1.0],
        });
        minimizer.run().unwrap();
        let first = minimizer.point().unwrap().to_vec();
        minimizer.run().unwrap();
        assert_eq!(minimizer.point().unwrap(), first.as_slice());
    }

    // ========================================
    // Result Gating Tests
    // ========================================

    #[test]
    fn test_value_before_run_is_invalid_state() {
        let minimizer = LbfgsMinimizer::new(ShiftedQuadratic { target: vec![1.0] });
        assert!(minimizer.value().unwrap_err().is_not_calculated());
    }

    #[test]
    fn test_point_before_run_is_invalid_state() {
        let minimizer = LbfgsMinimizer::new(ShiftedQuadratic { target: vec![1.0] });
        assert!(minimizer.point().unwrap_err().is_not_calculated());
    }

    // ========================================
    // Iteration Cap Tests
    // ========================================

    #[test]
    fn test_iteration_cap_exceeded() {
        let config = LbfgsConfig::new(20, 1e-14).with_max_iterations(3);
        let mut minimizer = LbfgsMinimizer::with_config(Quartic, config);

        let err = minimizer.run().unwrap_err();
        assert_eq!(err, OptimiserError::max_iterations_exceeded(3));
        // No partial result is retained
        assert!(minimizer.value().unwrap_err().is_not_calculated());
        assert!(minimizer.point().unwrap_err().is_not_calculated());
    }

    #[test]
    fn test_generous_cap_does_not_interfere() {
        let config = LbfgsConfig::default().with_max_iterations(1000);
        let mut minimizer = LbfgsMinimizer::with_config(
            ShiftedQuadratic {
                target: vec![3.0, -2.0],
            },
            config,
        );
        minimizer.run().unwrap();
        assert!(minimizer.value().unwrap() < 1e-3);
    }

    // ========================================
    // Observer Tests
    // ========================================

    #[test]
    fn test_observer_called_once_per_iteration() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<Vec<f64>>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic {
            target: vec![3.0, -2.0],
        });
        minimizer.set_observer(move |point| sink.borrow_mut().push(point.to_vec()));
        minimizer.run().unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), minimizer.iterations());
        assert_eq!(seen.last().unwrap().as_slice(), minimizer.point().unwrap());
    }

    #[test]
    fn test_no_observer_is_default() {
        let mut minimizer = LbfgsMinimizer::new(ShiftedQuadratic { target: vec![1.0] });
        minimizer.run().unwrap();
        assert!(minimizer.value().is_ok());
    }

    // ========================================
    // Failure Propagation Tests
    // ========================================

    /// Function reporting dimensionality 2 but producing 1-element gradients.
    struct WrongGradientLength;

    impl DerivableFunction for WrongGradientLength {
        fn dimensionality(&self) -> usize {
            2
        }

        fn value(&self, point: &[f64]) -> f64 {
            point.iter().map(|x| (x - 1.0) * (x - 1.0)).sum()
        }

        fn gradient(&self, _point: &[f64]) -> Vec<f64> {
            vec![1.0]
        }
    }

    #[test]
    fn test_dimension_mismatch_aborts_run() {
        let mut minimizer = LbfgsMinimizer::new(WrongGradientLength);
        let err = minimizer.run().unwrap_err();
        assert!(matches!(err, OptimiserError::Algebra(_)));
        assert!(minimizer.value().unwrap_err().is_not_calculated());
    }

    /// Function whose value is NaN everywhere.
    struct NanValue;

    impl DerivableFunction for NanValue {
        fn dimensionality(&self) -> usize {
            1
        }

        fn value(&self, _point: &[f64]) -> f64 {
            f64::NAN
        }

        fn gradient(&self, _point: &[f64]) -> Vec<f64> {
            vec![1.0]
        }
    }

    #[test]
    fn test_non_finite_value_aborts_run() {
        let mut minimizer = LbfgsMinimizer::new(NanValue);
        let err = minimizer.run().unwrap_err();
        assert!(matches!(err, OptimiserError::NonFinite(_)));
    }

    /// Function with a gradient that never decays, so curvature pairs have
    /// zero gradient difference and ρ hits the zero-divisor sentinel.
    struct LinearSlope;

    impl DerivableFunction for LinearSlope {
        fn dimensionality(&self) -> usize {
            1
        }

        fn value(&self, point: &[f64]) -> f64 {
            -point[0]
        }

        fn gradient(&self, _point: &[f64]) -> Vec<f64> {
            vec![-1.0]
        }
    }

    #[test]
    fn test_zero_curvature_rejected_at_direction_guard() {
        // After one step, Δgradient = 0 makes ρ infinite; the direction
        // guard must reject the resulting non-finite direction instead of
        // passing it to the line search.
        let config = LbfgsConfig::new(20, 1e-9).with_max_iterations(50);
        let mut minimizer = LbfgsMinimizer::with_config(LinearSlope, config);
        let err = minimizer.run().unwrap_err();
        assert!(matches!(err, OptimiserError::NonFinite(_)));
    }
}
