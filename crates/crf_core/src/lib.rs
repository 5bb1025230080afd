//! # crf_core: Numerical Foundation for the Sequence-Model Trainer
//!
//! ## Layer 1 (Foundation) Role
//!
//! crf_core serves as the bottom layer of the trainer workspace, providing:
//! - Vector algebra primitives over `f64` parameter vectors (`math::vector`)
//! - Finite-value guards rejecting infinity/NaN (`math::finite`)
//! - Error types: `AlgebraError`, `InfinityError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other trainer crates, with minimal external
//! dependencies:
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use crf_core::math::vector::{add, dot, subtract};
//! use crf_core::math::finite::FiniteChecker;
//!
//! let a = vec![1.0, 2.0];
//! let b = vec![3.0, 4.0];
//!
//! let inner = dot(&a, &b).unwrap();
//! assert_eq!(inner, 11.0);
//!
//! let sum = add(&a, &b).unwrap();
//! assert_eq!(sum, vec![4.0, 6.0]);
//!
//! // Guard against non-finite values
//! FiniteChecker.check_scalar(inner).unwrap().check_vector(&sum).unwrap();
//! # let _ = subtract(&a, &b);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
