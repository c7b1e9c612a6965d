/// The `push` and `index` native implementations.
///
/// Appends to an array variable in place, and reads an element by position.
pub mod array;
/// Function call dispatch.
///
/// Holds the native table, the `Caller` capability handed to natives, and the
/// calling convention for user-defined functions.
pub mod core;
/// The `shon` native implementation.
///
/// Writes values to the output sink or standard output.
pub mod print;
