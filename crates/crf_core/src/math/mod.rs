//! Numerical primitives for parameter-vector arithmetic.
//!
//! This module provides the arithmetic layer underneath the trainer's
//! optimisation algorithms:
//!
//! - [`vector`]: Pure algebra primitives over fixed-length `f64` vectors
//!   (inner product, scalar multiply, element-wise add/subtract, squared norm)
//! - [`finite`]: Guards rejecting infinity and NaN before they propagate
//!   into further computation
//!
//! All vector operations allocate fresh output vectors and never mutate
//! their inputs, so callers can freely reuse operands across iterations.

pub mod finite;
pub mod vector;

// Re-export commonly used items at module level
pub use finite::FiniteChecker;
pub use vector::{add, dot, norm_squared, safe_divide, scale, subtract};
