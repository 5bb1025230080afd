//! Core error types for the numerical foundation.
//!
//! This module provides:
//! - `error`: Structured error types for vector algebra and finite-value checks
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`AlgebraError`], [`InfinityError`], [`InfinityErrorKind`] from `error`

pub mod error;

// Re-export commonly used types at module level
pub use error::{AlgebraError, InfinityError, InfinityErrorKind};
