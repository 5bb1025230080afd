//! Pure algebra primitives over fixed-length `f64` vectors.
//!
//! Every operation returns a newly allocated vector (or a scalar) and leaves
//! its inputs untouched. Length mismatches between operands are reported as
//! [`AlgebraError::DimensionMismatch`] rather than panicking, so the caller
//! can propagate them with `?`.

use crate::types::AlgebraError;

/// Returns the inner product of the two given vectors.
///
/// # Arguments
///
/// * `a` - Left operand
/// * `b` - Right operand
///
/// # Returns
///
/// * `Ok(x)` - The inner product Σ aᵢ·bᵢ
/// * `Err(AlgebraError::DimensionMismatch)` - If the lengths differ
///
/// # Example
///
/// ```
/// use crf_core::math::vector::dot;
///
/// let x = dot(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
/// assert_eq!(x, 32.0);
/// ```
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64, AlgebraError> {
    if a.len() != b.len() {
        return Err(AlgebraError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Returns a new vector which is the multiplication of the given vector by a scalar.
///
/// # Example
///
/// ```
/// use crf_core::math::vector::scale;
///
/// assert_eq!(scale(2.0, &[1.0, -3.0]), vec![2.0, -6.0]);
/// ```
pub fn scale(scalar: f64, vector: &[f64]) -> Vec<f64> {
    vector.iter().map(|x| scalar * x).collect()
}

/// Returns the element-wise sum of the two vectors, as a new vector.
///
/// # Returns
///
/// * `Ok(v)` - The element-wise sum, e.g. `[1,2] + [3,4] = [4,6]`
/// * `Err(AlgebraError::DimensionMismatch)` - If the lengths differ
///
/// # Example
///
/// ```
/// use crf_core::math::vector::add;
///
/// assert_eq!(add(&[1.0, 2.0], &[3.0, 4.0]).unwrap(), vec![4.0, 6.0]);
/// ```
pub fn add(a: &[f64], b: &[f64]) -> Result<Vec<f64>, AlgebraError> {
    if a.len() != b.len() {
        return Err(AlgebraError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// Returns the element-wise difference of the two vectors, as a new vector.
///
/// # Returns
///
/// * `Ok(v)` - The element-wise difference, e.g. `[10,20] - [5,6] = [5,14]`
/// * `Err(AlgebraError::DimensionMismatch)` - If the lengths differ
///
/// # Example
///
/// ```
/// use crf_core::math::vector::subtract;
///
/// assert_eq!(subtract(&[10.0, 20.0], &[5.0, 6.0]).unwrap(), vec![5.0, 14.0]);
/// ```
pub fn subtract(a: &[f64], b: &[f64]) -> Result<Vec<f64>, AlgebraError> {
    if a.len() != b.len() {
        return Err(AlgebraError::dimension_mismatch(a.len(), b.len()));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x - y).collect())
}

/// Returns the squared Euclidean norm of the vector, equal to `dot(v, v)`.
///
/// # Example
///
/// ```
/// use crf_core::math::vector::norm_squared;
///
/// assert_eq!(norm_squared(&[3.0, 4.0]), 25.0);
/// ```
pub fn norm_squared(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum()
}

/// Division with defined behaviour on a zero divisor.
///
/// Returns `numerator / divisor`, except when the divisor is exactly zero:
/// a zero numerator yields `0.0`, and a non-zero numerator yields the signed
/// IEEE infinity. This lets iterative algorithms keep natural floating-point
/// propagation instead of crashing mid-loop; callers that cannot tolerate
/// infinities must re-check results with
/// [`FiniteChecker`](crate::math::finite::FiniteChecker).
///
/// # Example
///
/// ```
/// use crf_core::math::vector::safe_divide;
///
/// assert_eq!(safe_divide(1.0, 4.0), 0.25);
/// assert_eq!(safe_divide(0.0, 0.0), 0.0);
/// assert_eq!(safe_divide(2.0, 0.0), f64::INFINITY);
/// assert_eq!(safe_divide(-2.0, 0.0), f64::NEG_INFINITY);
/// ```
pub fn safe_divide(numerator: f64, divisor: f64) -> f64 {
    if divisor == 0.0 {
        if numerator == 0.0 {
            0.0
        } else if numerator > 0.0 {
            f64::INFINITY
        } else {
            f64::NEG_INFINITY
        }
    } else {
        numerator / divisor
    }
}
