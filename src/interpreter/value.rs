/// The `Value` enum and its conversions, equality and display.
pub mod core;
/// Callable values.
///
/// Defines user and native function records, the native calling convention
/// and arity checks.
pub mod function;
/// Typed variable records stored in the environment.
pub mod variable;
