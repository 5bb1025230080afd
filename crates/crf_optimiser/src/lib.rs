//! # crf_optimiser
//!
//! Unconstrained function minimisation for the sequence-model trainer.
//!
//! This crate sits above `crf_core` in the trainer architecture, turning an
//! objective function with gradients into a trained parameter vector.
//!
//! ## Modules
//!
//! - `function`: The objective-function contract and a last-evaluation cache
//! - `history`: Bounded window of per-iteration curvature records
//! - `line_search`: Step-length selection (Armijo backtracking)
//! - `minimizer`: The L-BFGS minimisation engine
//!
//! ## Example
//!
//! ```rust
//! use crf_optimiser::prelude::*;
//!
//! // f(x) = (x₀ - 3)² + (x₁ + 2)², minimum at (3, -2)
//! struct Paraboloid;
//!
//! impl DerivableFunction for Paraboloid {
//!     fn dimensionality(&self) -> usize {
//!         2
//!     }
//!     fn value(&self, point: &[f64]) -> f64 {
//!         (point[0] - 3.0).powi(2) + (point[1] + 2.0).powi(2)
//!     }
//!     fn gradient(&self, point: &[f64]) -> Vec<f64> {
//!         vec![2.0 * (point[0] - 3.0), 2.0 * (point[1] + 2.0)]
//!     }
//! }
//!
//! let mut minimizer = LbfgsMinimizer::new(Paraboloid);
//! minimizer.run().unwrap();
//!
//! let point = minimizer.point().unwrap();
//! assert!((point[0] - 3.0).abs() < 0.01);
//! assert!((point[1] + 2.0).abs() < 0.01);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod function;
pub mod history;
pub mod line_search;
pub mod minimizer;

mod error;

pub use error::OptimiserError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::function::{CachedFunction, DerivableFunction};
    pub use crate::history::{HistoryWindow, IterationRecord};
    pub use crate::line_search::{ArmijoConfig, ArmijoLineSearch, LineSearch};
    pub use crate::minimizer::{LbfgsConfig, LbfgsMinimizer};
    pub use crate::OptimiserError;
}
