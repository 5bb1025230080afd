//! The objective-function contract and a last-evaluation cache.
//!
//! The minimisation engine consumes any type implementing
//! [`DerivableFunction`]: a scalar function over a fixed-length parameter
//! vector that can also report its gradient. [`CachedFunction`] wraps an
//! implementation and memoises the most recently evaluated point, so that
//! back-to-back requests for the same point (the engine and the line search
//! both evaluate the current iterate) cost a single inner evaluation.

use std::cell::RefCell;

/// A scalar function of a fixed-length parameter vector with a gradient.
///
/// The dimensionality is fixed for the lifetime of one minimisation run;
/// `gradient` must return a vector of exactly that length for any point of
/// that length.
///
/// # Example
///
/// ```
/// use crf_optimiser::function::DerivableFunction;
///
/// /// f(x) = ‖x‖²
/// struct SquaredNorm(usize);
///
/// impl DerivableFunction for SquaredNorm {
///     fn dimensionality(&self) -> usize {
///         self.0
///     }
///     fn value(&self, point: &[f64]) -> f64 {
///         point.iter().map(|x| x * x).sum()
///     }
///     fn gradient(&self, point: &[f64]) -> Vec<f64> {
///         point.iter().map(|x| 2.0 * x).collect()
///     }
/// }
///
/// let f = SquaredNorm(3);
/// assert_eq!(f.value(&[1.0, 2.0, 2.0]), 9.0);
/// assert_eq!(f.gradient(&[1.0, 0.0, 0.0]), vec![2.0, 0.0, 0.0]);
/// ```
pub trait DerivableFunction {
    /// Number of parameters the function is defined over.
    fn dimensionality(&self) -> usize;

    /// Value of the function at the given point.
    fn value(&self, point: &[f64]) -> f64;

    /// Gradient of the function at the given point.
    ///
    /// The returned vector has length [`dimensionality`](Self::dimensionality).
    fn gradient(&self, point: &[f64]) -> Vec<f64>;
}

impl<F: DerivableFunction + ?Sized> DerivableFunction for &F {
    fn dimensionality(&self) -> usize {
        (**self).dimensionality()
    }

    fn value(&self, point: &[f64]) -> f64 {
        (**self).value(point)
    }

    fn gradient(&self, point: &[f64]) -> Vec<f64> {
        (**self).gradient(point)
    }
}

#[derive(Debug, Default)]
struct LastEvaluation {
    value: Option<(Vec<f64>, f64)>,
    gradient: Option<(Vec<f64>, Vec<f64>)>,
}

/// Wrapper memoising the most recently evaluated point of an inner function.
///
/// Value and gradient are cached independently, each keyed by the exact point
/// (bitwise equality) it was computed at. This is a pure optimisation: results
/// are identical to calling the inner function directly, but repeated
/// evaluation at the same point performs no redundant work.
///
/// Interior mutability via `RefCell` keeps the [`DerivableFunction`] surface
/// `&self`; one wrapper therefore belongs to one minimisation run and is not
/// shared across threads.
///
/// # Example
///
/// ```
/// use crf_optimiser::function::{CachedFunction, DerivableFunction};
///
/// struct Identity;
/// impl DerivableFunction for Identity {
///     fn dimensionality(&self) -> usize {
///         1
///     }
///     fn value(&self, point: &[f64]) -> f64 {
///         point[0]
///     }
///     fn gradient(&self, _point: &[f64]) -> Vec<f64> {
///         vec![1.0]
///     }
/// }
///
/// let cached = CachedFunction::new(Identity);
/// assert_eq!(cached.value(&[2.0]), 2.0);
/// assert_eq!(cached.value(&[2.0]), 2.0); // served from cache
/// ```
#[derive(Debug)]
pub struct CachedFunction<F> {
    inner: F,
    last: RefCell<LastEvaluation>,
}

impl<F: DerivableFunction> CachedFunction<F> {
    /// Wrap a function with a last-evaluation cache.
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            last: RefCell::new(LastEvaluation::default()),
        }
    }

    /// Consume the wrapper and return the inner function.
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// Borrow the inner function.
    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: DerivableFunction> DerivableFunction for CachedFunction<F> {
    fn dimensionality(&self) -> usize {
        self.inner.dimensionality()
    }

    fn value(&self, point: &[f64]) -> f64 {
        if let Some((cached_point, cached_value)) = &self.last.borrow().value {
            if cached_point == point {
                return *cached_value;
            }
        }
        let value = self.inner.value(point);
        self.last.borrow_mut().value = Some((point.to_vec(), value));
        value
    }

    fn gradient(&self, point: &[f64]) -> Vec<f64> {
        if let Some((cached_point, cached_gradient)) = &self.last.borrow().gradient {
            if cached_point == point {
                return cached_gradient.clone();
            }
        }
        let gradient = self.inner.gradient(point);
        self.last.borrow_mut().gradient = Some((point.to_vec(), gradient.clone()));
        gradient
    }
}
