/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of KPL
/// source. Parse errors cover syntax mistakes such as unbalanced parentheses or
/// wrappers, malformed parameter lists, and malformed loop headers.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while executing a program:
/// type mismatches, undeclared identifiers, bad loop bounds, native argument
/// misuse, and arithmetic faults.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
