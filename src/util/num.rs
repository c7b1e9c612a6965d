use crate::{error::RuntimeError, interpreter::evaluator::core::EvalResult};

/// Largest signed integer exactly representable as an `f64` (`2^53 - 1`).
pub const MAX_SAFE_I64_INT: i64 = 9_007_199_254_740_991;

/// Safely converts an `i64` to `f64` if and only if it is exactly
/// representable.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `MAX_SAFE_I64_INT` in absolute
/// value.
///
/// ## Example
/// ```
/// use kpl::util::num::{MAX_SAFE_I64_INT, i64_to_f64_checked};
///
/// assert_eq!(i64_to_f64_checked(42, "too big!").unwrap(), 42.0);
/// assert!(i64_to_f64_checked(MAX_SAFE_I64_INT + 1, "too big!").is_err());
/// ```
#[allow(clippy::cast_precision_loss)]
pub fn i64_to_f64_checked<E>(value: i64, error: E) -> Result<f64, E> {
    if value.unsigned_abs() > MAX_SAFE_I64_INT.unsigned_abs() {
        return Err(error);
    }
    Ok(value as f64)
}

/// Safely converts an `f64` to `i64` if the value is finite, within the
/// exactly representable range, and not fractional.
///
/// # Errors
/// Returns an error for non-finite, out-of-range, or fractional values.
///
/// # Parameters
/// - `value`: The floating-point value to convert.
/// - `line`: Source code line number for error reporting.
///
/// # Example
/// ```
/// use kpl::{error::RuntimeError, util::num::f64_to_i64_checked};
///
/// assert_eq!(f64_to_i64_checked(1000.0, 1).unwrap(), 1000);
///
/// let err = f64_to_i64_checked(1.5, 123).unwrap_err();
/// assert!(matches!(err, RuntimeError::RealIsFractional { line: 123 }));
///
/// let err = f64_to_i64_checked(1e20, 5).unwrap_err();
/// assert!(matches!(err, RuntimeError::LiteralTooLarge { line: 5 }));
/// ```
#[allow(clippy::cast_possible_truncation)]
#[allow(clippy::cast_precision_loss)]
pub fn f64_to_i64_checked(value: f64, line: usize) -> EvalResult<i64> {
    if !value.is_finite() {
        return Err(RuntimeError::TypeError { details: format!("Cannot convert non-finite value {value} to an integer"),
                                             line });
    }
    if value.abs() > MAX_SAFE_I64_INT as f64 {
        return Err(RuntimeError::LiteralTooLarge { line });
    }
    if value.fract() != 0.0 {
        return Err(RuntimeError::RealIsFractional { line });
    }
    Ok(value as i64)
}
