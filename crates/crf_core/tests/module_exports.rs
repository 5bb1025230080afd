//! Integration tests for module exports.
//!
//! Verify that all public modules and types are correctly exported and
//! accessible via absolute paths.

/// Test that vector primitives are accessible via absolute path.
#[test]
fn test_vector_module_exports() {
    use crf_core::math::vector::{add, dot, norm_squared, safe_divide, scale, subtract};

    let a = [1.0, 2.0];
    let b = [3.0, 4.0];

    let _ = dot(&a, &b).unwrap();
    let _ = add(&a, &b).unwrap();
    let _ = subtract(&a, &b).unwrap();
    let _ = scale(2.0, &a);
    let _ = norm_squared(&a);
    let _ = safe_divide(1.0, 2.0);
}

/// Test that module-level re-exports match the nested paths.
#[test]
fn test_math_reexports() {
    use crf_core::math::{dot, FiniteChecker};

    let inner = dot(&[1.0], &[2.0]).unwrap();
    assert_eq!(inner, 2.0);
    assert!(FiniteChecker.check_scalar(inner).is_ok());
}

/// Test that error types are accessible and convertible.
#[test]
fn test_error_exports() {
    use crf_core::types::{AlgebraError, InfinityError, InfinityErrorKind};

    let algebra: AlgebraError = AlgebraError::dimension_mismatch(2, 3);
    assert!(algebra.is_dimension_mismatch());

    let infinity = InfinityError::scalar(InfinityErrorKind::ScalarInfinite);
    let _: &dyn std::error::Error = &infinity;
}
