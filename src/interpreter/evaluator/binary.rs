/// Equality between any two values.
pub mod comparison;
/// Operator dispatch.
pub mod core;
/// Numeric arithmetic.
pub mod scalar;
